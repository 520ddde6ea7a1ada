use std::io::{self, Write};

use curve_fit::{Coefficients, render::Renderer};
use log::warn;
use ndarray::ArrayView1;

const WIDTH: usize = 64;
const HEIGHT: usize = 20;

const SAMPLE: char = 'o';
const PREDICTION: char = '*';

/// Renders charts as ASCII scatter plots on any writer.
pub struct ConsoleRenderer<W: Write> {
    out: W,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_chart(
        &mut self,
        container_id: &str,
        xs: ArrayView1<f32>,
        ys: ArrayView1<f32>,
        predictions: Option<ArrayView1<f32>>,
    ) -> io::Result<()> {
        let (x_min, x_max) = bounds(xs.iter());
        let (y_min, y_max) = bounds(ys.iter().chain(predictions.iter().flatten()));
        let mut grid = vec![[' '; WIDTH]; HEIGHT];

        let mut put = |x: f32, y: f32, mark: char| {
            if x.is_finite() && y.is_finite() {
                let row = HEIGHT - 1 - cell(y, y_min, y_max, HEIGHT);
                grid[row][cell(x, x_min, x_max, WIDTH)] = mark;
            }
        };

        if let Some(predictions) = predictions {
            for (&x, &p) in xs.iter().zip(predictions) {
                put(x, p, PREDICTION);
            }
        }

        for (&x, &y) in xs.iter().zip(ys) {
            put(x, y, SAMPLE);
        }

        writeln!(self.out, "[{container_id}] {} samples", xs.len())?;
        writeln!(self.out, "y in [{y_min:.3}, {y_max:.3}]")?;

        for row in &grid {
            let line: String = row.iter().collect();
            writeln!(self.out, "|{}", line.trim_end())?;
        }

        writeln!(self.out, "+{}", "-".repeat(WIDTH))?;
        writeln!(self.out, "x in [{x_min:.3}, {x_max:.3}]")?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn render_chart(
        &mut self,
        container_id: &str,
        xs: ArrayView1<f32>,
        ys: ArrayView1<f32>,
        predictions: Option<ArrayView1<f32>>,
    ) {
        if let Err(e) = self.write_chart(container_id, xs, ys, predictions) {
            warn!("failed to render chart {container_id}: {e}");
        }
    }

    fn render_coefficients(&mut self, container_id: &str, coeffs: &Coefficients) {
        if let Err(e) = writeln!(self.out, "[{container_id}] {coeffs}") {
            warn!("failed to render coefficients {container_id}: {e}");
        }
    }
}

/// The finite range covered by `values`, `(0, 0)` if there is none.
fn bounds<'a, I: Iterator<Item = &'a f32>>(values: I) -> (f32, f32) {
    values
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((f32::min(lo, v), f32::max(hi, v))),
        })
        .unwrap_or((0., 0.))
}

/// Maps `v` into one of `cells` buckets spanning `[min, max]`.
fn cell(v: f32, min: f32, max: f32, cells: usize) -> usize {
    if max <= min {
        return 0;
    }

    let t = (v - min) / (max - min);
    ((t * (cells - 1) as f32).round() as usize).min(cells - 1)
}
