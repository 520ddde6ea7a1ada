use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::{
    Coefficients, FitErr, Result,
    data::{Domain, Noise},
};

/// How the learnable coefficients are initialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitConfig {
    Const { value: f32 },
    Uniform { low: f32, high: f32 },
    Normal { mean: f32, std_dev: f32 },
    Given(Coefficients),
}

impl Default for InitConfig {
    fn default() -> Self {
        InitConfig::Uniform { low: 0., high: 1. }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizerConfig {
    GradientDescent {
        learning_rate: f32,
    },
    GradientDescentWithMomentum {
        learning_rate: f32,
        momentum: f32,
    },
    Adam {
        learning_rate: f32,
        beta1: f32,
        beta2: f32,
        epsilon: f32,
    },
}

impl OptimizerConfig {
    pub fn learning_rate(&self) -> f32 {
        match *self {
            OptimizerConfig::GradientDescent { learning_rate }
            | OptimizerConfig::GradientDescentWithMomentum { learning_rate, .. }
            | OptimizerConfig::Adam { learning_rate, .. } => learning_rate,
        }
    }

    /// Checks the hyperparameters: the learning rate must be finite and non negative, decay
    /// rates must lie in `[0, 1)` and `epsilon` must be finite and positive.
    pub fn validate(&self) -> Result<()> {
        let lr = self.learning_rate();
        if !lr.is_finite() || lr < 0. {
            return Err(FitErr::invalid(format!(
                "learning rate must be finite and non negative, got {lr}"
            )));
        }

        match *self {
            OptimizerConfig::GradientDescent { .. } => Ok(()),
            OptimizerConfig::GradientDescentWithMomentum { momentum, .. } => {
                check_decay("momentum", momentum)
            }
            OptimizerConfig::Adam {
                beta1,
                beta2,
                epsilon,
                ..
            } => {
                check_decay("beta1", beta1)?;
                check_decay("beta2", beta2)?;

                if !epsilon.is_finite() || epsilon <= 0. {
                    return Err(FitErr::invalid(format!(
                        "epsilon must be finite and positive, got {epsilon}"
                    )));
                }

                Ok(())
            }
        }
    }
}

fn check_decay(name: &str, value: f32) -> Result<()> {
    if !(0. ..1.).contains(&value) {
        return Err(FitErr::invalid(format!(
            "{name} must be in [0, 1), got {value}"
        )));
    }

    Ok(())
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        OptimizerConfig::GradientDescent { learning_rate: 0.5 }
    }
}

/// The full description of a curve fitting run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    pub samples: usize,
    pub true_coefficients: Coefficients,
    pub domain: Domain,
    pub noise: Noise,
    pub normalize: bool,
    pub init: InitConfig,
    pub optimizer: OptimizerConfig,
    pub iterations: usize,
    pub yield_every: NonZeroUsize,
    pub seed: Option<u64>,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            samples: 100,
            true_coefficients: Coefficients::new(-0.8, -0.2, 0.9, 0.5),
            domain: Domain::default(),
            noise: Noise::default(),
            normalize: false,
            init: InitConfig::default(),
            optimizer: OptimizerConfig::default(),
            iterations: 75,
            yield_every: NonZeroUsize::MIN,
            seed: None,
        }
    }
}

impl FitConfig {
    /// Parses and validates a JSON configuration, missing fields take their default value.
    ///
    /// # Errors
    /// `FitErr::Config` if the JSON is malformed, `FitErr::InvalidArgument` if it's invalid.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values no type can rule out.
    pub fn validate(&self) -> Result<()> {
        if self.samples == 0 {
            return Err(FitErr::invalid("samples must be positive"));
        }

        self.optimizer.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_the_defaults() {
        assert_eq!(FitConfig::from_json("{}").unwrap(), FitConfig::default());
    }

    #[test]
    fn partial_json_overrides_only_its_fields() {
        let json = r#"{
            "samples": 20,
            "noise": "none",
            "init": { "given": { "a": 1.0, "b": 2.0, "c": 3.0, "d": 4.0 } },
            "optimizer": { "adam": { "learning_rate": 0.1, "beta1": 0.9, "beta2": 0.999, "epsilon": 1e-8 } },
            "seed": 42
        }"#;

        let config = FitConfig::from_json(json).unwrap();

        assert_eq!(config.samples, 20);
        assert_eq!(config.noise, Noise::None);
        assert_eq!(
            config.init,
            InitConfig::Given(Coefficients::new(1., 2., 3., 4.))
        );
        assert_eq!(config.optimizer.learning_rate(), 0.1);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.iterations, 75);
    }

    #[test]
    fn round_trips_through_json() {
        let config = FitConfig {
            noise: Noise::Uniform { amplitude: 0.2 },
            optimizer: OptimizerConfig::GradientDescentWithMomentum {
                learning_rate: 0.1,
                momentum: 0.9,
            },
            ..FitConfig::default()
        };

        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(FitConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = FitConfig::from_json(r#"{ "samples": 0 }"#).unwrap_err();
        assert!(matches!(err, FitErr::InvalidArgument(_)));

        let json = r#"{ "optimizer": { "gradient_descent": { "learning_rate": -1.0 } } }"#;
        let err = FitConfig::from_json(json).unwrap_err();
        assert!(matches!(err, FitErr::InvalidArgument(_)));

        let err = FitConfig::from_json(r#"{ "yield_every": 0 }"#).unwrap_err();
        assert!(matches!(err, FitErr::Config(_)));

        let err = FitConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, FitErr::Config(_)));
    }

    #[test]
    fn optimizer_hyperparameters_are_checked() {
        let adam = |beta1: f32, beta2: f32, epsilon: f32| OptimizerConfig::Adam {
            learning_rate: 0.05,
            beta1,
            beta2,
            epsilon,
        };

        assert!(adam(0.9, 0.999, 1e-8).validate().is_ok());
        for invalid in [
            adam(1., 0.999, 1e-8),
            adam(-0.1, 0.999, 1e-8),
            adam(0.9, 1.5, 1e-8),
            adam(0.9, 0.999, 0.),
            adam(0.9, 0.999, f32::NAN),
            OptimizerConfig::GradientDescentWithMomentum {
                learning_rate: 0.1,
                momentum: 1.,
            },
        ] {
            let err = invalid.validate().unwrap_err();
            assert!(matches!(err, FitErr::InvalidArgument(_)), "{invalid:?}");
        }
    }

    #[test]
    fn degenerate_adam_fails_on_load() {
        let json = r#"{ "optimizer": { "adam": { "learning_rate": 0.05, "beta1": 1.0, "beta2": 0.999, "epsilon": 1e-8 } } }"#;

        let err = FitConfig::from_json(json).unwrap_err();
        assert!(matches!(err, FitErr::InvalidArgument(_)));
    }
}
