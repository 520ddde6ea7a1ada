use ndarray::{Array1, ArrayView1};

use crate::Result;

pub trait LossFn {
    /// Measures how far `y_pred` is from `y`.
    ///
    /// # Errors
    /// `FitErr::DimensionMismatch` if both sequences have different lengths.
    fn loss(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> Result<f32>;

    /// The derivative of `loss` with respect to each prediction.
    ///
    /// # Errors
    /// `FitErr::DimensionMismatch` if both sequences have different lengths.
    fn loss_prime(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> Result<Array1<f32>>;
}
