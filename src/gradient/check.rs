use rand::Rng;
use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::error::LossError;
use crate::math::matrix::Matrix;

/// One sampled comparison between a finite-difference and an analytic
/// gradient entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradCheckSample {
    pub row: usize,
    pub col: usize,
    pub numerical: f64,
    pub analytic: f64,
    pub rel_error: f64,
}

/// `|a - b| / (|a| + |b|)`, or 0 when both are exactly 0.
pub fn rel_error(a: f64, b: f64) -> f64 {
    let denom = a.abs() + b.abs();
    if denom == 0.0 { 0.0 } else { (a - b).abs() / denom }
}

/// Central difference `(f(w + h·e) - f(w - h·e)) / 2h` at entry `(row, col)`.
fn central_difference<F>(f: &mut F, w: &Matrix, row: usize, col: usize, h: f64) -> Result<f64, LossError>
where
    F: FnMut(&Matrix) -> Result<f64, LossError>,
{
    let mut probe = w.clone();
    let original = probe[(row, col)];

    probe[(row, col)] = original + h;
    let plus = f(&probe)?;
    probe[(row, col)] = original - h;
    let minus = f(&probe)?;

    Ok((plus - minus) / (2.0 * h))
}

/// Finite-difference estimate of the full gradient of `f` at `w`.
///
/// Costs two evaluations of `f` per entry; meant for small matrices.
pub fn numerical_gradient<F>(mut f: F, w: &Matrix, h: f64) -> Result<Matrix, LossError>
where
    F: FnMut(&Matrix) -> Result<f64, LossError>,
{
    let mut grad = Matrix::zeros(w.rows(), w.cols());
    for i in 0..w.rows() {
        for j in 0..w.cols() {
            grad[(i, j)] = central_difference(&mut f, w, i, j, h)?;
        }
    }
    Ok(grad)
}

/// Compares `analytic` against finite differences at `num_checks` random
/// entries of `w`.
pub fn grad_check_sparse<F, R>(
    mut f: F,
    w: &Matrix,
    analytic: &Matrix,
    num_checks: usize,
    h: f64,
    rng: &mut R,
) -> Result<Vec<GradCheckSample>, LossError>
where
    F: FnMut(&Matrix) -> Result<f64, LossError>,
    R: Rng + ?Sized,
{
    if analytic.shape() != w.shape() {
        return Err(LossError::DimensionMismatch {
            context: "analytic gradient element count",
            expected: w.rows() * w.cols(),
            found: analytic.rows() * analytic.cols(),
        });
    }
    if w.rows() == 0 || w.cols() == 0 {
        return Err(LossError::EmptyMatrix);
    }

    (0..num_checks)
        .map(|_| {
            let row = rng.gen_range(0..w.rows());
            let col = rng.gen_range(0..w.cols());
            let numerical = central_difference(&mut f, w, row, col, h)?;
            let analytic = analytic[(row, col)];
            let sample = GradCheckSample {
                row,
                col,
                numerical,
                analytic,
                rel_error: rel_error(numerical, analytic),
            };
            debug!(row, col, numerical, analytic, rel_error = sample.rel_error, "gradient check");
            Ok(sample)
        })
        .collect()
}
