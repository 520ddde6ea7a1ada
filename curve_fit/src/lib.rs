mod coefficients;
pub mod config;
pub mod data;
pub mod dataset;
mod error;
pub mod initialization;
pub mod loss;
pub mod optimization;
pub mod predictor;
pub mod render;
pub mod session;
pub mod training;

pub use coefficients::Coefficients;
pub use error::{FitErr, Result};
