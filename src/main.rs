mod console;
mod settings;

use std::{io, ops::ControlFlow};

use curve_fit::{session::FitSession, training::StepReport};
use log::{debug, info};
use tokio::signal;

use console::ConsoleRenderer;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = settings::load()?;
    let session = FitSession::new(config)?;
    let mut renderer = ConsoleRenderer::new(io::stdout().lock());

    tokio::select! {
        ret = session.run(&mut renderer, log_step) => {
            let summary = ret?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        _ = signal::ctrl_c() => {
            info!("received SIGINT, stopping the training");
        }
    }

    Ok(())
}

fn log_step(report: &StepReport) -> ControlFlow<()> {
    debug!(step = report.step, loss = report.loss; "step done");
    ControlFlow::Continue(())
}
