use rand::RngCore;

use super::CoeffGen;
use crate::Coefficients;

/// A coefficient generator that sets every coefficient to the same value.
pub struct ConstCoeffGen {
    value: f32,
}

impl ConstCoeffGen {
    pub fn new(value: f32) -> Self {
        Self { value }
    }
}

impl CoeffGen for ConstCoeffGen {
    fn sample(&mut self, _rng: &mut dyn RngCore) -> Coefficients {
        Coefficients::from([self.value; Coefficients::LEN])
    }
}
