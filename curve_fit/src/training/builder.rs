use rand::{Rng, RngCore, SeedableRng, rngs::StdRng};

use super::Trainer;
use crate::{
    Result,
    config::{FitConfig, InitConfig, OptimizerConfig},
    data::DataGenerator,
    initialization::{CoeffGen, ConstCoeffGen, RandCoeffGen},
    optimization::{Adam, GradientDescent, GradientDescentWithMomentum, Optimizer},
};

/// A trainer whose optimizer is chosen at runtime.
pub type DynTrainer = Trainer<Box<dyn Optimizer + Send>>;

/// Builds the components of a run given its configuration.
#[derive(Default)]
pub struct TrainerBuilder;

impl TrainerBuilder {
    /// Creates a new `TrainerBuilder`.
    pub fn new() -> Self {
        Self
    }

    /// Builds a new `Trainer` following a configuration.
    ///
    /// # Arguments
    /// * `config` - The run configuration.
    /// * `rng` - The random source for the initial coefficients.
    ///
    /// # Returns
    /// An error if the initialization distribution is invalid.
    pub fn build(&self, config: &FitConfig, rng: &mut dyn RngCore) -> Result<DynTrainer> {
        let coeffs = self.resolve_init(config.init)?.sample(rng);
        let optimizer = self.resolve_optimizer(config.optimizer);

        Ok(Trainer::new(coeffs, optimizer).with_yield_every(config.yield_every))
    }

    /// Builds the data generator described by `config`.
    pub fn build_generator<R: Rng>(&self, config: &FitConfig, rng: R) -> DataGenerator<R> {
        DataGenerator::new(rng)
            .with_domain(config.domain)
            .with_noise(config.noise)
            .with_normalization(config.normalize)
    }

    /// Seeds the run's random source, falling back to OS entropy.
    pub fn generate_rng(&self, seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    fn resolve_init(&self, init: InitConfig) -> Result<Box<dyn CoeffGen>> {
        let coeff_gen: Box<dyn CoeffGen> = match init {
            InitConfig::Const { value } => Box::new(ConstCoeffGen::new(value)),
            InitConfig::Uniform { low, high } => Box::new(RandCoeffGen::uniform(low, high)?),
            InitConfig::Normal { mean, std_dev } => Box::new(RandCoeffGen::normal(mean, std_dev)?),
            InitConfig::Given(coeffs) => Box::new(coeffs),
        };

        Ok(coeff_gen)
    }

    fn resolve_optimizer(&self, spec: OptimizerConfig) -> Box<dyn Optimizer + Send> {
        match spec {
            OptimizerConfig::GradientDescent { learning_rate } => {
                Box::new(GradientDescent::new(learning_rate))
            }
            OptimizerConfig::GradientDescentWithMomentum {
                learning_rate,
                momentum,
            } => Box::new(GradientDescentWithMomentum::new(learning_rate, momentum)),
            OptimizerConfig::Adam {
                learning_rate,
                beta1,
                beta2,
                epsilon,
            } => Box::new(Adam::new(learning_rate, beta1, beta2, epsilon)),
        }
    }
}
