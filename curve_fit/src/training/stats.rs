use serde::Serialize;

use crate::Coefficients;

/// What a single training step observed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepReport {
    /// One based index of the step within the trainer's lifetime.
    pub step: usize,
    /// The loss of the coefficients the step started from.
    pub loss: f32,
    /// The coefficients after the update.
    pub coefficients: Coefficients,
}

/// The outcome of a whole training run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunSummary {
    pub steps: usize,
    pub initial_loss: f32,
    pub final_loss: f32,
    pub coefficients: Coefficients,
    /// Whether the run was cancelled before doing every requested step.
    pub stopped_early: bool,
}

impl RunSummary {
    /// The fraction of the initial loss that remains after training.
    ///
    /// # Returns
    /// `None` if the initial loss was already zero.
    pub fn loss_ratio(&self) -> Option<f32> {
        (self.initial_loss > 0.).then(|| self.final_loss / self.initial_loss)
    }
}
