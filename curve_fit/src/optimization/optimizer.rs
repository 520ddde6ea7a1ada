use crate::Coefficients;

/// Defines the strategy for updating the coefficients based on the loss gradient.
pub trait Optimizer {
    /// Takes one step over `params` given the gradient of the loss at `params`.
    ///
    /// # Arguments
    /// * `params` - The coefficients to update.
    /// * `grad` - The gradient used for taking the step.
    fn update_params(&mut self, params: &mut Coefficients, grad: &Coefficients);
}

impl<O: Optimizer + ?Sized> Optimizer for Box<O> {
    fn update_params(&mut self, params: &mut Coefficients, grad: &Coefficients) {
        (**self).update_params(params, grad);
    }
}
