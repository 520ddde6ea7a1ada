mod builder;
mod gradient;
mod stats;
mod trainer;

pub use builder::{DynTrainer, TrainerBuilder};
pub use gradient::{loss_and_gradient, mse_gradient};
pub use stats::{RunSummary, StepReport};
pub use trainer::{Steps, Trainer, train};
