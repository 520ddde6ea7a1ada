use std::fmt;

use serde::{Deserialize, Serialize};

/// The four coefficients of the cubic `a·x³ + b·x² + c·x + d`.
///
/// The same shape is used for the ground truth fed to the data generator, for the learnable
/// parameters owned by a `Trainer` and for the gradient of the loss with respect to them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
}

impl Coefficients {
    /// The number of scalar parameters of the model.
    pub const LEN: usize = 4;

    /// Creates a new `Coefficients`.
    ///
    /// # Arguments
    /// * `a` - The cubic term.
    /// * `b` - The quadratic term.
    /// * `c` - The linear term.
    /// * `d` - The constant term.
    pub fn new(a: f32, b: f32, c: f32, d: f32) -> Self {
        Self { a, b, c, d }
    }

    /// Returns the coefficients ordered from the highest degree to the lowest.
    pub fn to_array(self) -> [f32; Self::LEN] {
        [self.a, self.b, self.c, self.d]
    }

    /// Whether every coefficient is a finite number.
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }

    /// The largest absolute difference between two coefficient sets.
    pub fn max_abs_diff(&self, other: &Self) -> f32 {
        self.to_array()
            .iter()
            .zip(other.to_array())
            .map(|(x, y)| (x - y).abs())
            .fold(0., f32::max)
    }
}

impl From<[f32; 4]> for Coefficients {
    fn from([a, b, c, d]: [f32; 4]) -> Self {
        Self { a, b, c, d }
    }
}

impl fmt::Display for Coefficients {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "a={:.4} b={:.4} c={:.4} d={:.4}",
            self.a, self.b, self.c, self.d
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_conversion_keeps_the_degree_ordering() {
        let coeffs = Coefficients::new(1., 2., 3., 4.);
        assert_eq!(coeffs.to_array(), [1., 2., 3., 4.]);
        assert_eq!(Coefficients::from([1., 2., 3., 4.]), coeffs);
    }

    #[test]
    fn max_abs_diff() {
        let lhs = Coefficients::new(1., 2., 3., 4.);
        let rhs = Coefficients::new(1.5, 2., 1., 4.);
        assert_eq!(lhs.max_abs_diff(&rhs), 2.);
    }

    #[test]
    fn non_finite_coefficients_are_detected() {
        assert!(Coefficients::default().is_finite());
        assert!(!Coefficients::new(f32::NAN, 0., 0., 0.).is_finite());
    }
}
