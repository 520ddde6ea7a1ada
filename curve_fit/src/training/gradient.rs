use crate::{
    Coefficients, Result,
    data::SampleSet,
    loss::{LossFn, Mse},
    predictor,
};

/// Computes the loss of `coeffs` over `samples` together with its gradient.
///
/// The cubic is linear in its coefficients, so the chain rule reduces to weighting the loss
/// derivative of each prediction by `[x³, x², x, 1]` and summing over the batch.
///
/// # Arguments
/// * `loss_fn` - The loss function.
/// * `coeffs` - The point to evaluate the gradient at.
/// * `samples` - The batch of samples.
///
/// # Returns
/// A tuple with the loss and the gradient.
pub fn loss_and_gradient<L: LossFn>(
    loss_fn: &L,
    coeffs: &Coefficients,
    samples: &SampleSet,
) -> Result<(f32, Coefficients)> {
    let xs = samples.xs();
    let ys = samples.ys();

    let y_pred = predictor::predict(coeffs, xs);
    let loss = loss_fn.loss(y_pred.view(), ys)?;
    let d = loss_fn.loss_prime(y_pred.view(), ys)?;

    let mut grad = [0.; Coefficients::LEN];
    for (&x, &di) in xs.iter().zip(&d) {
        let x2 = x * x;
        grad[0] += di * x2 * x;
        grad[1] += di * x2;
        grad[2] += di * x;
        grad[3] += di;
    }

    Ok((loss, grad.into()))
}

/// The gradient of the mean squared error with respect to each coefficient.
///
/// # Errors
/// Same as `LossFn::loss`.
pub fn mse_gradient(coeffs: &Coefficients, samples: &SampleSet) -> Result<Coefficients> {
    loss_and_gradient(&Mse, coeffs, samples).map(|(_, grad)| grad)
}

#[cfg(test)]
mod tests {
    use ndarray::Array1;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::*;

    const EPS: f32 = 1e-2;
    const TOLERANCE: f32 = 1e-3;

    fn samples() -> SampleSet {
        let xs = Array1::linspace(-1., 1., 41);
        let truth = Coefficients::new(-0.8, -0.2, 0.9, 0.5);
        let ys = predictor::predict(&truth, xs.view()) + 0.05 * xs.mapv(|x| (7. * x).sin());
        SampleSet::new(xs, ys).unwrap()
    }

    fn mse(coeffs: &Coefficients, samples: &SampleSet) -> f32 {
        let y_pred = predictor::predict(coeffs, samples.xs());
        Mse.loss(y_pred.view(), samples.ys()).unwrap()
    }

    fn finite_differences(coeffs: &Coefficients, samples: &SampleSet) -> Coefficients {
        let mut grad = [0.; Coefficients::LEN];

        for (i, g) in grad.iter_mut().enumerate() {
            let mut plus = coeffs.to_array();
            let mut minus = coeffs.to_array();
            plus[i] += EPS;
            minus[i] -= EPS;

            *g = (mse(&plus.into(), samples) - mse(&minus.into(), samples)) / (2. * EPS);
        }

        grad.into()
    }

    #[test]
    fn analytic_gradient_matches_finite_differences() {
        let samples = samples();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..8 {
            let coeffs = Coefficients::new(
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
            );

            let analytic = mse_gradient(&coeffs, &samples).unwrap();
            let numeric = finite_differences(&coeffs, &samples);

            assert!(
                analytic.max_abs_diff(&numeric) < TOLERANCE,
                "analytic {analytic} vs numeric {numeric} at {coeffs}"
            );
        }
    }

    #[test]
    fn gradient_vanishes_at_the_exact_fit() {
        let truth = Coefficients::new(1., -2., 0.5, 3.);
        let xs = Array1::linspace(-1., 1., 11);
        let ys = predictor::predict(&truth, xs.view());
        let samples = SampleSet::new(xs, ys).unwrap();

        let (loss, grad) = loss_and_gradient(&Mse, &truth, &samples).unwrap();

        assert_eq!(loss, 0.);
        assert_eq!(grad, Coefficients::default());
    }
}
