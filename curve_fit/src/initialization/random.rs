use rand::RngCore;
use rand_distr::{Distribution, Normal, Uniform};

use super::CoeffGen;
use crate::{Coefficients, Result};

/// A coefficient generator that follows a certain probabilistic distribution.
pub struct RandCoeffGen<D: Distribution<f32>> {
    distribution: D,
}

impl<D: Distribution<f32>> RandCoeffGen<D> {
    /// Creates a new `RandCoeffGen` coefficient generator.
    ///
    /// # Arguments
    /// * `distribution` - The distribution to sample every coefficient from.
    pub fn new(distribution: D) -> Self {
        Self { distribution }
    }
}

impl RandCoeffGen<Uniform<f32>> {
    /// Creates a new `RandCoeffGen` coefficient generator with a uniform distribution.
    ///
    /// # Arguments
    /// * `low` - The inclusive lower limit.
    /// * `high` - The exclusive upper limit.
    ///
    /// # Returns
    /// An error if the range is invalid (low >= high).
    pub fn uniform(low: f32, high: f32) -> Result<Self> {
        Ok(Self::new(Uniform::new(low, high)?))
    }
}

impl RandCoeffGen<Normal<f32>> {
    /// Creates a new `RandCoeffGen` coefficient generator with a normal distribution.
    ///
    /// # Arguments
    /// * `mean` - The mean of the distribution.
    /// * `std_dev` - The standard deviation of the distribution.
    ///
    /// # Returns
    /// An error if `std_dev` is not finite (Nan or infinite).
    pub fn normal(mean: f32, std_dev: f32) -> Result<Self> {
        Ok(Self::new(Normal::new(mean, std_dev)?))
    }
}

impl<D: Distribution<f32>> CoeffGen for RandCoeffGen<D> {
    fn sample(&mut self, rng: &mut dyn RngCore) -> Coefficients {
        let mut coeffs = [0.; Coefficients::LEN];
        coeffs
            .iter_mut()
            .for_each(|c| *c = self.distribution.sample(rng));
        coeffs.into()
    }
}
