use ndarray::{Array1, ArrayView1};

use crate::Coefficients;

/// Evaluates the cubic at a single point using Horner's rule.
///
/// # Arguments
/// * `coeffs` - The coefficients of the cubic.
/// * `x` - The point to evaluate.
#[inline]
pub fn predict_one(coeffs: &Coefficients, x: f32) -> f32 {
    let &Coefficients { a, b, c, d } = coeffs;
    ((a * x + b) * x + c) * x + d
}

/// Evaluates the cubic over a whole batch of points.
///
/// # Arguments
/// * `coeffs` - The coefficients of the cubic.
/// * `xs` - The points to evaluate.
///
/// # Returns
/// One prediction per point, in the same order.
pub fn predict(coeffs: &Coefficients, xs: ArrayView1<f32>) -> Array1<f32> {
    xs.mapv(|x| predict_one(coeffs, x))
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn evaluates_every_term() {
        let coeffs = Coefficients::new(1., 2., 3., 4.);
        let xs = array![0., 1., -1., 2.];

        let ys = predict(&coeffs, xs.view());

        assert_eq!(ys, array![4., 10., 2., 26.]);
    }

    #[test]
    fn is_deterministic_and_leaves_inputs_untouched() {
        let coeffs = Coefficients::new(-0.8, -0.2, 0.9, 0.5);
        let xs = array![-1., -0.25, 0.3, 0.75];
        let before = xs.clone();

        let first = predict(&coeffs, xs.view());
        let second = predict(&coeffs, xs.view());

        assert_eq!(first, second);
        assert_eq!(xs, before);
    }

    #[test]
    fn empty_batch() {
        let xs = Array1::<f32>::zeros(0);
        assert!(predict(&Coefficients::default(), xs.view()).is_empty());
    }
}
