use log::info;
use ndarray::Array1;
use rand::Rng;
use rand_distr::{Distribution, Normal, Uniform};
use serde::{Deserialize, Serialize};

use super::SampleSet;
use crate::{Coefficients, FitErr, Result, predictor};

/// The closed interval the inputs are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub low: f32,
    pub high: f32,
}

impl Domain {
    pub fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, x: f32) -> bool {
        (self.low..=self.high).contains(&x)
    }

    fn validate(&self) -> Result<()> {
        if !self.low.is_finite() || !self.high.is_finite() || self.low >= self.high {
            return Err(FitErr::invalid(format!(
                "domain [{}, {}] must be a finite, non empty interval",
                self.low, self.high
            )));
        }

        Ok(())
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self::new(-1., 1.)
    }
}

/// The additive noise simulating measurement error on the targets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Noise {
    None,
    Uniform { amplitude: f32 },
    Normal { std_dev: f32 },
}

impl Noise {
    fn validate(&self) -> Result<()> {
        let scale = match *self {
            Noise::None => return Ok(()),
            Noise::Uniform { amplitude } => amplitude,
            Noise::Normal { std_dev } => std_dev,
        };

        if !scale.is_finite() || scale < 0. {
            return Err(FitErr::invalid(format!(
                "noise scale must be finite and non negative, got {scale}"
            )));
        }

        Ok(())
    }
}

impl Default for Noise {
    fn default() -> Self {
        Noise::Normal { std_dev: 0.04 }
    }
}

/// Generates noisy samples of a known cubic.
pub struct DataGenerator<R: Rng> {
    rng: R,
    domain: Domain,
    noise: Noise,
    normalize: bool,
}

impl<R: Rng> DataGenerator<R> {
    /// Creates a new `DataGenerator` drawing inputs from `[-1, 1]` with a small gaussian noise.
    ///
    /// # Arguments
    /// * `rng` - The random source, seed it for reproducible samples.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            domain: Domain::default(),
            noise: Noise::default(),
            normalize: false,
        }
    }

    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domain = domain;
        self
    }

    pub fn with_noise(mut self, noise: Noise) -> Self {
        self.noise = noise;
        self
    }

    /// Rescales the generated targets into `[0, 1]`.
    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Generates `n` samples of the cubic given by `true_coeffs`.
    ///
    /// # Arguments
    /// * `n` - The amount of samples.
    /// * `true_coeffs` - The ground truth coefficients.
    ///
    /// # Returns
    /// The samples, or `FitErr::InvalidArgument` if `n` is zero or the domain or noise are invalid.
    pub fn generate(&mut self, n: usize, true_coeffs: &Coefficients) -> Result<SampleSet> {
        if n == 0 {
            return Err(FitErr::invalid("the amount of samples must be positive"));
        }

        self.domain.validate()?;
        self.noise.validate()?;

        let Domain { low, high } = self.domain;
        let x_dist = Uniform::new_inclusive(low, high)?;
        let xs = Array1::from_shape_simple_fn(n, || x_dist.sample(&mut self.rng));

        let mut ys = predictor::predict(true_coeffs, xs.view()) + self.sample_noise(n)?;

        if self.normalize {
            normalize(&mut ys);
        }

        info!(samples = n, normalized = self.normalize; "generated synthetic samples");
        SampleSet::new(xs, ys)
    }

    fn sample_noise(&mut self, n: usize) -> Result<Array1<f32>> {
        let noise = match self.noise {
            Noise::None => Array1::zeros(n),
            Noise::Uniform { amplitude } => {
                let dist = Uniform::new_inclusive(-amplitude, amplitude)?;
                Array1::from_shape_simple_fn(n, || dist.sample(&mut self.rng))
            }
            Noise::Normal { std_dev } => {
                let dist = Normal::new(0., std_dev)?;
                Array1::from_shape_simple_fn(n, || dist.sample(&mut self.rng))
            }
        };

        Ok(noise)
    }
}

/// Min-max normalization, a constant column maps to zeros.
fn normalize(ys: &mut Array1<f32>) {
    let min = ys.fold(f32::INFINITY, |acc, &y| acc.min(y));
    let max = ys.fold(f32::NEG_INFINITY, |acc, &y| acc.max(y));
    let range = max - min;

    if range > 0. {
        ys.mapv_inplace(|y| (y - min) / range);
    } else {
        ys.fill(0.);
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn truth() -> Coefficients {
        Coefficients::new(-0.8, -0.2, 0.9, 0.5)
    }

    #[test]
    fn generates_exactly_n_samples_within_the_domain() {
        let domain = Domain::new(-1., 1.);
        let mut generator = DataGenerator::new(seeded_rng()).with_domain(domain);

        for n in [1, 7, 100] {
            let samples = generator.generate(n, &truth()).unwrap();
            assert_eq!(samples.len(), n);
            assert!(samples.xs().iter().all(|&x| domain.contains(x)));
        }
    }

    #[test]
    fn zero_samples_fail() {
        let mut generator = DataGenerator::new(seeded_rng());
        let err = generator.generate(0, &truth()).unwrap_err();
        assert!(matches!(err, FitErr::InvalidArgument(_)));
    }

    #[test]
    fn noise_free_samples_lie_on_the_cubic() {
        let mut generator = DataGenerator::new(seeded_rng()).with_noise(Noise::None);
        let samples = generator.generate(50, &truth()).unwrap();

        for (x, y) in samples.iter() {
            assert_eq!(y, predictor::predict_one(&truth(), x));
        }
    }

    #[test]
    fn uniform_noise_is_bounded_by_its_amplitude() {
        let amplitude = 0.1;
        let mut generator =
            DataGenerator::new(seeded_rng()).with_noise(Noise::Uniform { amplitude });
        let samples = generator.generate(200, &truth()).unwrap();

        for (x, y) in samples.iter() {
            let err = (y - predictor::predict_one(&truth(), x)).abs();
            assert!(err <= amplitude + 1e-6, "noise {err} above {amplitude}");
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let first = DataGenerator::new(seeded_rng())
            .generate(20, &truth())
            .unwrap();
        let second = DataGenerator::new(seeded_rng())
            .generate(20, &truth())
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn normalized_targets_span_the_unit_interval() {
        let mut generator = DataGenerator::new(seeded_rng()).with_normalization(true);
        let samples = generator.generate(100, &truth()).unwrap();
        let ys = samples.ys();

        assert!(ys.iter().all(|&y| (0. ..=1.).contains(&y)));
        assert!(ys.iter().any(|&y| y == 0.));
        assert!(ys.iter().any(|&y| y == 1.));
    }

    #[test]
    fn normalizing_a_constant_column_yields_zeros() {
        let mut generator = DataGenerator::new(seeded_rng())
            .with_noise(Noise::None)
            .with_normalization(true);
        let flat = Coefficients::new(0., 0., 0., 3.);

        let samples = generator.generate(10, &flat).unwrap();
        assert!(samples.ys().iter().all(|&y| y == 0.));
    }

    #[test]
    fn invalid_domain_and_noise_fail() {
        let mut generator = DataGenerator::new(seeded_rng()).with_domain(Domain::new(1., -1.));
        assert!(generator.generate(5, &truth()).is_err());

        let mut generator =
            DataGenerator::new(seeded_rng()).with_noise(Noise::Normal { std_dev: -1. });
        assert!(generator.generate(5, &truth()).is_err());
    }
}
