use rand::RngCore;

use crate::Coefficients;

/// A `CoeffGen` generates the initial state of the learnable coefficients.
pub trait CoeffGen {
    /// Samples a full set of coefficients.
    ///
    /// # Arguments
    /// * `rng` - The random source, ignored by deterministic generators.
    fn sample(&mut self, rng: &mut dyn RngCore) -> Coefficients;
}

/// A known set of coefficients is its own generator.
impl CoeffGen for Coefficients {
    fn sample(&mut self, _rng: &mut dyn RngCore) -> Coefficients {
        *self
    }
}
