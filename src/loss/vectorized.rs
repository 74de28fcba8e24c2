use ndarray::Axis;
use tracing::debug;

use crate::error::LossError;
use crate::loss::validate::check_inputs;
use crate::math::matrix::Matrix;

/// Whole-array form of [`softmax_loss_naive`](crate::loss::naive::softmax_loss_naive).
///
/// Same inputs, same outputs. Scores come from one matrix product, the
/// gradient from `Xᵀ · residual`, with no per-sample accumulation.
pub fn softmax_loss_vectorized(w: &Matrix, x: &Matrix, y: &[usize], reg: f64) -> Result<(f64, Matrix), LossError> {
    let dims = check_inputs(w, x, y, reg)?;
    let w = w.view()?;
    let x = x.view()?;
    let n = dims.n as f64;

    let mut scores = x.dot(&w);
    let row_max = scores.fold_axis(Axis(1), f64::NEG_INFINITY, |&acc, &s| acc.max(s));
    scores -= &row_max.insert_axis(Axis(1));

    let mut loss = -y.iter().enumerate().map(|(i, &label)| scores[[i, label]]).sum::<f64>();

    scores.mapv_inplace(f64::exp);
    // Computed once; both the log-partition and the normalization reuse it.
    let row_sum = scores.sum_axis(Axis(1));
    loss += row_sum.mapv(f64::ln).sum();
    loss /= n;
    loss += reg * w.iter().map(|v| v * v).sum::<f64>();

    scores /= &row_sum.insert_axis(Axis(1));
    for (mut row, &label) in scores.outer_iter_mut().zip(y) {
        row[label] -= 1.0;
    }

    let mut dw = x.t().dot(&scores);
    dw /= n;
    dw.scaled_add(2.0 * reg, &w);

    debug!(n = dims.n, d = dims.d, c = dims.c, reg, loss, "vectorized softmax loss");
    Ok((loss, Matrix::from(dw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn uniform_scores_give_log_c() {
        let w = Matrix::zeros(3, 4);
        let x = Matrix::from_data(vec![vec![1.0, 2.0, 3.0]]).unwrap();
        let (loss, dw) = softmax_loss_vectorized(&w, &x, &[2], 0.0).unwrap();
        assert_relative_eq!(loss, 4f64.ln(), max_relative = 1e-12);
        // Residual is [1/4, 1/4, -3/4, 1/4] scaled by each feature.
        assert_relative_eq!(dw[(1, 2)], -1.5, max_relative = 1e-12);
        assert_relative_eq!(dw[(2, 0)], 0.75, max_relative = 1e-12);
    }

    #[test]
    fn regularization_only_when_data_term_vanishes() {
        // Zero features give uniform probabilities and a zero data gradient.
        let w = Matrix::from_data(vec![vec![1.0, -2.0], vec![0.5, 0.0]]).unwrap();
        let x = Matrix::zeros(3, 2);
        let (loss, dw) = softmax_loss_vectorized(&w, &x, &[0, 1, 1], 0.1).unwrap();
        assert_relative_eq!(loss, 2f64.ln() + 0.1 * 5.25, max_relative = 1e-12);
        assert_relative_eq!(dw[(0, 1)], -0.4, max_relative = 1e-12);
        assert_relative_eq!(dw[(1, 0)], 0.1, max_relative = 1e-12);
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let w = Matrix::zeros(3, 2);
        let x = Matrix::zeros(2, 4);
        assert!(matches!(
            softmax_loss_vectorized(&w, &x, &[0, 1], 0.0),
            Err(LossError::DimensionMismatch { .. })
        ));
    }
}
