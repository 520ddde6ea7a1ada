use std::{num::NonZeroUsize, ops::ControlFlow};

use log::{debug, info, warn};
use ndarray::ArrayView1;
use tokio::task;

use super::{
    gradient::loss_and_gradient,
    stats::{RunSummary, StepReport},
};
use crate::{
    Coefficients, FitErr, Result,
    data::SampleSet,
    loss::{LossFn, Mse},
    optimization::{GradientDescent, Optimizer},
};

/// Owns the live coefficients of a training run and updates them one step at a time.
///
/// Nothing else holds a mutable reference to the coefficients: predictions and losses are
/// computed over snapshots handed out by `coefficients`.
pub struct Trainer<O: Optimizer, L: LossFn = Mse> {
    coeffs: Coefficients,
    optimizer: O,
    loss_fn: L,
    steps_taken: usize,
    yield_every: NonZeroUsize,
}

impl<O: Optimizer> Trainer<O> {
    /// Returns a new `Trainer` minimizing the mean squared error.
    ///
    /// # Arguments
    /// * `coeffs` - The initial coefficients.
    /// * `optimizer` - How to move the coefficients given the gradient.
    pub fn new(coeffs: Coefficients, optimizer: O) -> Self {
        Self::with_loss_fn(coeffs, optimizer, Mse)
    }
}

impl<O: Optimizer, L: LossFn> Trainer<O, L> {
    /// Returns a new `Trainer` minimizing an arbitrary loss function.
    pub fn with_loss_fn(coeffs: Coefficients, optimizer: O, loss_fn: L) -> Self {
        Self {
            coeffs,
            optimizer,
            loss_fn,
            steps_taken: 0,
            yield_every: NonZeroUsize::MIN,
        }
    }

    /// Sets how many steps `run` takes between suspension points.
    pub fn with_yield_every(mut self, yield_every: NonZeroUsize) -> Self {
        self.yield_every = yield_every;
        self
    }

    pub fn coefficients(&self) -> &Coefficients {
        &self.coeffs
    }

    pub fn into_coefficients(self) -> Coefficients {
        self.coeffs
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Computes the loss of the current coefficients without updating them.
    pub fn evaluate(&self, samples: &SampleSet) -> Result<f32> {
        loss_and_gradient(&self.loss_fn, &self.coeffs, samples).map(|(loss, _)| loss)
    }

    /// Performs a single batch gradient descent step over `samples`.
    ///
    /// # Returns
    /// The step's report, `FitErr::InvalidArgument` if there are no samples or
    /// `FitErr::Diverged` if the loss, the gradient or the updated coefficients are no longer
    /// finite, in which case the coefficients are left untouched.
    pub fn step(&mut self, samples: &SampleSet) -> Result<StepReport> {
        if samples.is_empty() {
            return Err(FitErr::invalid("cannot train over an empty sample set"));
        }

        let (loss, grad) = loss_and_gradient(&self.loss_fn, &self.coeffs, samples)?;
        self.steps_taken += 1;
        let step = self.steps_taken;

        if !loss.is_finite() || !grad.is_finite() {
            warn!(step = step, loss = loss; "training diverged");
            return Err(FitErr::Diverged { step, loss });
        }

        let mut updated = self.coeffs;
        self.optimizer.update_params(&mut updated, &grad);

        if !updated.is_finite() {
            warn!(step = step, loss = loss; "coefficients overflowed");
            return Err(FitErr::Diverged { step, loss });
        }

        self.coeffs = updated;
        debug!(step = step, loss = loss; "training step");

        Ok(StepReport {
            step,
            loss,
            coefficients: self.coeffs,
        })
    }

    /// Lazily performs up to `iterations` steps, one per call to `next`.
    ///
    /// Dropping the iterator stops the training between two steps. After an error no more steps
    /// are taken.
    pub fn steps<'t, 's>(
        &'t mut self,
        samples: &'s SampleSet,
        iterations: usize,
    ) -> Steps<'t, 's, O, L> {
        Steps {
            trainer: self,
            samples,
            remaining: iterations,
        }
    }

    /// Trains for `iterations` steps, suspending every `yield_every` steps so that other tasks on
    /// the same executor make progress.
    ///
    /// # Arguments
    /// * `samples` - The batch used on every step.
    /// * `iterations` - The maximum amount of steps.
    /// * `on_step` - Called with every report, returning `ControlFlow::Break` cancels the run.
    ///
    /// # Returns
    /// A summary of the run or the first error found.
    pub async fn run<F>(
        &mut self,
        samples: &SampleSet,
        iterations: usize,
        mut on_step: F,
    ) -> Result<RunSummary>
    where
        F: FnMut(&StepReport) -> ControlFlow<()>,
    {
        let initial_loss = self.evaluate(samples)?;
        info!(iterations = iterations, loss = initial_loss; "starting training run");

        let mut steps = 0;
        let mut stopped_early = false;

        while steps < iterations {
            let report = self.step(samples)?;
            steps += 1;

            let flow = on_step(&report);

            if steps % self.yield_every.get() == 0 {
                task::yield_now().await;
            }

            if flow.is_break() {
                info!(step = report.step; "training cancelled");
                stopped_early = true;
                break;
            }
        }

        let final_loss = self.evaluate(samples)?;
        info!(steps = steps, loss = final_loss; "training run finished");

        Ok(RunSummary {
            steps,
            initial_loss,
            final_loss,
            coefficients: self.coeffs,
            stopped_early,
        })
    }
}

/// Iterator over the steps of a training run, see `Trainer::steps`.
pub struct Steps<'t, 's, O: Optimizer, L: LossFn> {
    trainer: &'t mut Trainer<O, L>,
    samples: &'s SampleSet,
    remaining: usize,
}

impl<O: Optimizer, L: LossFn> Iterator for Steps<'_, '_, O, L> {
    type Item = Result<StepReport>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let report = self.trainer.step(self.samples);
        self.remaining = if report.is_ok() { self.remaining - 1 } else { 0 };
        Some(report)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

/// Fits `coeffs` to the `(xs, ys)` pairs with `iterations` steps of plain gradient descent.
///
/// The coefficients are updated in place, also when an error interrupts the training, in which
/// case they hold the result of the last successful step.
///
/// # Errors
/// * `FitErr::DimensionMismatch` if `xs` and `ys` differ in length.
/// * `FitErr::InvalidArgument` if the learning rate is negative or not finite, or there are no
///   samples to train with.
/// * `FitErr::Diverged` if the loss stops being finite.
pub fn train(
    coeffs: &mut Coefficients,
    xs: ArrayView1<f32>,
    ys: ArrayView1<f32>,
    iterations: usize,
    learning_rate: f32,
) -> Result<()> {
    if !learning_rate.is_finite() || learning_rate < 0. {
        return Err(FitErr::invalid(format!(
            "learning rate must be finite and non negative, got {learning_rate}"
        )));
    }

    let samples = SampleSet::new(xs.to_owned(), ys.to_owned())?;
    let mut trainer = Trainer::new(*coeffs, GradientDescent::new(learning_rate));

    let result = trainer
        .steps(&samples, iterations)
        .try_for_each(|report| report.map(|_| ()));

    *coeffs = trainer.into_coefficients();
    result
}
