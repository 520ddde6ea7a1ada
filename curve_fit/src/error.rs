use std::{
    error::Error,
    fmt::{self, Display},
};

use rand_distr::{NormalError, uniform::Error as UniformError};

/// The result type used in the entire curve fitting crate.
pub type Result<T> = std::result::Result<T, FitErr>;

/// The curve fitting crate's error type.
#[derive(Debug)]
pub enum FitErr {
    /// An argument is outside of its valid domain (e.g. zero samples).
    InvalidArgument(String),

    /// Two sequences that should have the same length don't.
    DimensionMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },

    /// The loss stopped being a finite number during training.
    Diverged { step: usize, loss: f32 },

    /// The run configuration could not be parsed.
    Config(serde_json::Error),
}

impl FitErr {
    pub(crate) fn invalid<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

impl Display for FitErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitErr::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            FitErr::DimensionMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "dimension mismatch for {what}: got {got}, expected {expected}"
            ),
            FitErr::Diverged { step, loss } => {
                write!(f, "training diverged at step {step}, loss is {loss}")
            }
            FitErr::Config(e) => write!(f, "invalid configuration: {e}"),
        }
    }
}

impl Error for FitErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FitErr::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FitErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Config(value)
    }
}

impl From<NormalError> for FitErr {
    fn from(value: NormalError) -> Self {
        Self::InvalidArgument(value.to_string())
    }
}

impl From<UniformError> for FitErr {
    fn from(value: UniformError) -> Self {
        Self::InvalidArgument(value.to_string())
    }
}
