use ndarray::{Array2, Axis};

use crate::{FitErr, Result};

/// A batch of examples with their one-hot labels, one row per example.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub xs: Array2<f32>,
    pub labels: Array2<f32>,
}

/// The dataset loader of the classifier flow.
///
/// Only the boundary is modelled here: file formats and the classifier itself are left to the
/// host.
#[trait_variant::make(TestBatchSource: Send)]
pub trait LocalTestBatchSource {
    /// Makes the source ready to hand out batches.
    async fn load(&mut self) -> Result<()>;

    /// Takes the next `n` test examples.
    ///
    /// # Errors
    /// `FitErr::InvalidArgument` if `n` is zero or the source hasn't been loaded.
    fn next_test_batch(&mut self, n: usize) -> Result<Batch>;
}

/// A test batch source over rows already held in memory, cycling back to the first row once
/// every row was handed out.
pub struct InMemoryBatches {
    xs: Array2<f32>,
    labels: Array2<f32>,
    cursor: usize,
    loaded: bool,
}

impl InMemoryBatches {
    /// Creates a new `InMemoryBatches`.
    ///
    /// # Errors
    /// `FitErr::DimensionMismatch` if `xs` and `labels` have different amounts of rows.
    pub fn new(xs: Array2<f32>, labels: Array2<f32>) -> Result<Self> {
        if xs.nrows() != labels.nrows() {
            return Err(FitErr::DimensionMismatch {
                what: "examples and labels",
                got: xs.nrows(),
                expected: labels.nrows(),
            });
        }

        Ok(Self {
            xs,
            labels,
            cursor: 0,
            loaded: false,
        })
    }
}

impl TestBatchSource for InMemoryBatches {
    async fn load(&mut self) -> Result<()> {
        if self.xs.nrows() == 0 {
            return Err(FitErr::invalid("the dataset has no examples"));
        }

        self.cursor = 0;
        self.loaded = true;
        Ok(())
    }

    fn next_test_batch(&mut self, n: usize) -> Result<Batch> {
        if !self.loaded {
            return Err(FitErr::invalid("the dataset must be loaded first"));
        }

        if n == 0 {
            return Err(FitErr::invalid("the batch size must be positive"));
        }

        let rows = self.xs.nrows();
        let indices: Vec<_> = (0..n).map(|i| (self.cursor + i) % rows).collect();
        self.cursor = (self.cursor + n) % rows;

        Ok(Batch {
            xs: self.xs.select(Axis(0), &indices),
            labels: self.labels.select(Axis(0), &indices),
        })
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};

    use super::{FitErr, InMemoryBatches, TestBatchSource};

    fn source() -> InMemoryBatches {
        let xs = array![[0., 0.], [1., 1.], [2., 2.]];
        let labels = array![[1., 0.], [0., 1.], [1., 0.]];
        InMemoryBatches::new(xs, labels).unwrap()
    }

    #[tokio::test]
    async fn batches_cycle_over_the_rows() {
        let mut source = source();
        source.load().await.unwrap();

        let batch = source.next_test_batch(2).unwrap();
        assert_eq!(batch.xs, array![[0., 0.], [1., 1.]]);

        let batch = source.next_test_batch(2).unwrap();
        assert_eq!(batch.xs, array![[2., 2.], [0., 0.]]);
        assert_eq!(batch.labels, array![[1., 0.], [1., 0.]]);
    }

    #[tokio::test]
    async fn batches_require_loading_and_a_positive_size() {
        let mut source = source();
        assert!(source.next_test_batch(1).is_err());

        source.load().await.unwrap();
        assert!(source.next_test_batch(0).is_err());
    }

    #[test]
    fn mismatched_rows_fail() {
        let err = InMemoryBatches::new(Array2::zeros((3, 2)), Array2::zeros((2, 2)))
            .err()
            .unwrap();
        assert!(matches!(err, FitErr::DimensionMismatch { .. }));
    }
}
