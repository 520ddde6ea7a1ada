use std::ops::ControlFlow;

use log::info;

use crate::{
    Result,
    config::FitConfig,
    predictor,
    render::Renderer,
    training::{RunSummary, StepReport, TrainerBuilder},
};

/// Container showing the synthetic samples and the true coefficients.
pub const DATA_CONTAINER: &str = "data";
/// Container showing the fit of the initial, random coefficients.
pub const RANDOM_CONTAINER: &str = "random";
/// Container showing the fit after training.
pub const TRAINED_CONTAINER: &str = "trained";

/// A complete curve fitting run: generates the samples, fits them and reports every stage to a
/// `Renderer`.
pub struct FitSession {
    config: FitConfig,
}

impl FitSession {
    /// Creates a new `FitSession`.
    ///
    /// # Errors
    /// `FitErr::InvalidArgument` if the configuration is invalid.
    pub fn new(config: FitConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    /// Runs the session to completion.
    ///
    /// # Arguments
    /// * `renderer` - Receives the data, the initial fit and the trained fit.
    /// * `on_step` - Observes every training step and may cancel the training.
    ///
    /// # Returns
    /// The training summary or the first error found.
    pub async fn run<Rd, F>(&self, renderer: &mut Rd, on_step: F) -> Result<RunSummary>
    where
        Rd: Renderer + ?Sized,
        F: FnMut(&StepReport) -> ControlFlow<()>,
    {
        let config = &self.config;
        let builder = TrainerBuilder::new();
        let mut rng = builder.generate_rng(config.seed);

        let truth = config.true_coefficients;
        let samples = builder
            .build_generator(config, &mut rng)
            .generate(config.samples, &truth)?;

        renderer.render_coefficients(DATA_CONTAINER, &truth);
        renderer.render_chart(DATA_CONTAINER, samples.xs(), samples.ys(), None);

        let mut trainer = builder.build(config, &mut rng)?;
        info!(coefficients:% = trainer.coefficients(); "initialized coefficients");

        let before = predictor::predict(trainer.coefficients(), samples.xs());
        renderer.render_coefficients(RANDOM_CONTAINER, trainer.coefficients());
        renderer.render_chart(
            RANDOM_CONTAINER,
            samples.xs(),
            samples.ys(),
            Some(before.view()),
        );

        let summary = trainer.run(&samples, config.iterations, on_step).await?;

        let after = predictor::predict(&summary.coefficients, samples.xs());
        renderer.render_coefficients(TRAINED_CONTAINER, &summary.coefficients);
        renderer.render_chart(
            TRAINED_CONTAINER,
            samples.xs(),
            samples.ys(),
            Some(after.view()),
        );

        Ok(summary)
    }
}
