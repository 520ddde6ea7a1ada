use super::Optimizer;
use crate::Coefficients;

/// Gradient descent that accumulates a velocity across steps.
#[derive(Debug, Clone)]
pub struct GradientDescentWithMomentum {
    learning_rate: f32,
    momentum: f32,
    velocity: [f32; Coefficients::LEN],
}

impl GradientDescentWithMomentum {
    /// Creates a new `GradientDescentWithMomentum` optimizer.
    ///
    /// # Arguments
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    /// * `momentum` - How much of the previous velocity is kept on each step.
    pub fn new(learning_rate: f32, momentum: f32) -> Self {
        Self {
            learning_rate,
            momentum,
            velocity: [0.; Coefficients::LEN],
        }
    }
}

impl Optimizer for GradientDescentWithMomentum {
    fn update_params(&mut self, params: &mut Coefficients, grad: &Coefficients) {
        let lr = self.learning_rate;
        let mu = self.momentum;
        let mut p = params.to_array();

        p.iter_mut()
            .zip(grad.to_array())
            .zip(self.velocity.iter_mut())
            .for_each(|((p, g), v)| {
                *v = (mu * *v) + g;
                *p -= lr * *v;
            });

        *params = p.into();
    }
}
