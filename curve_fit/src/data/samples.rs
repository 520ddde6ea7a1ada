use ndarray::{Array1, ArrayView1};

use crate::{FitErr, Result};

/// An ordered, immutable set of `(x, y)` samples.
///
/// The two columns are kept apart so that predictions and losses can be computed over the whole
/// batch at once.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    xs: Array1<f32>,
    ys: Array1<f32>,
}

impl SampleSet {
    /// Creates a new `SampleSet`.
    ///
    /// # Arguments
    /// * `xs` - The inputs.
    /// * `ys` - The targets, one per input.
    ///
    /// # Errors
    /// `FitErr::DimensionMismatch` if `xs` and `ys` differ in length.
    pub fn new(xs: Array1<f32>, ys: Array1<f32>) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(FitErr::DimensionMismatch {
                what: "xs and ys",
                got: xs.len(),
                expected: ys.len(),
            });
        }

        Ok(Self { xs, ys })
    }

    pub fn xs(&self) -> ArrayView1<'_, f32> {
        self.xs.view()
    }

    pub fn ys(&self) -> ArrayView1<'_, f32> {
        self.ys.view()
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Iterates over the `(x, y)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn pairs_keep_their_order() {
        let samples = SampleSet::new(array![1., 2.], array![3., 4.]).unwrap();
        let pairs: Vec<_> = samples.iter().collect();

        assert_eq!(samples.len(), 2);
        assert_eq!(pairs, [(1., 3.), (2., 4.)]);
    }

    #[test]
    fn mismatched_columns_fail() {
        let err = SampleSet::new(array![1., 2., 3.], array![1.]).unwrap_err();
        assert!(matches!(err, FitErr::DimensionMismatch { .. }));
    }
}
