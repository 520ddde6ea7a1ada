use ndarray::ArrayView1;

use crate::Coefficients;

/// The plotting service the curve fitting flow reports to.
///
/// Implementations own their failures: nothing they return is consumed by the training flow.
pub trait Renderer {
    /// Renders a scatter plot of the samples, optionally together with a fitted curve.
    ///
    /// # Arguments
    /// * `container_id` - Where to draw the chart.
    /// * `xs` - The sample inputs.
    /// * `ys` - The sample targets.
    /// * `predictions` - The model output for each of the inputs.
    fn render_chart(
        &mut self,
        container_id: &str,
        xs: ArrayView1<f32>,
        ys: ArrayView1<f32>,
        predictions: Option<ArrayView1<f32>>,
    );

    /// Renders a textual summary of a set of coefficients.
    fn render_coefficients(&mut self, container_id: &str, coeffs: &Coefficients);
}
