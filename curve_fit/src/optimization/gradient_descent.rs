use super::Optimizer;
use crate::Coefficients;

/// Gradient descent optimization algorithm.
#[derive(Debug, Clone, Copy)]
pub struct GradientDescent {
    learning_rate: f32,
}

impl GradientDescent {
    /// Returns a new `GradientDescent`.
    ///
    /// # Arguments
    /// * `learning_rate` - The *length* of the steps taken on `update_params`.
    pub fn new(learning_rate: f32) -> Self {
        Self { learning_rate }
    }
}

impl Optimizer for GradientDescent {
    /// Makes a step in the opposite direction of the gradient, scaled by `learning_rate`.
    fn update_params(&mut self, params: &mut Coefficients, grad: &Coefficients) {
        let lr = self.learning_rate;
        let mut p = params.to_array();

        for (w, g) in p.iter_mut().zip(grad.to_array()) {
            *w -= lr * g;
        }

        *params = p.into();
    }
}
