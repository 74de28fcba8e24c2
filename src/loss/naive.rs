use tracing::debug;

use crate::error::LossError;
use crate::loss::validate::check_inputs;
use crate::math::matrix::Matrix;

/// Softmax loss and weight gradient computed with explicit loops.
///
/// `w` is (D, C), `x` is (N, D), `y[i]` is the class of sample `i`.
/// Returns `(loss, dW)` with `dW` shaped like `w`:
///
///   loss = mean_i( -s[i, y_i] + log Σ_j exp(s[i, j]) ) + reg·Σ W²
///   dW   = Xᵀ·(P - onehot(y)) / N + 2·reg·W
///
/// where `s` are the row-max-shifted scores and `P` their softmax.
pub fn softmax_loss_naive(w: &Matrix, x: &Matrix, y: &[usize], reg: f64) -> Result<(f64, Matrix), LossError> {
    let dims = check_inputs(w, x, y, reg)?;

    let mut loss = 0.0;
    let mut dw = Matrix::zeros(dims.d, dims.c);

    let mut scores = x.matmul(w)?;
    for i in 0..dims.n {
        let row = scores.row_mut(i);
        let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        row.iter_mut().for_each(|s| *s -= max);
    }

    for i in 0..dims.n {
        let label = y[i];
        let row = scores.row_mut(i);

        loss -= row[label];
        row.iter_mut().for_each(|s| *s = s.exp());
        let sum: f64 = row.iter().sum();
        loss += sum.ln();
        row.iter_mut().for_each(|s| *s /= sum);
        // Probabilities become the residual P - onehot(y).
        row[label] -= 1.0;

        for j in 0..dims.c {
            let residual = scores[(i, j)];
            for k in 0..dims.d {
                dw[(k, j)] += residual * x[(i, k)];
            }
        }
    }

    let inv_n = 1.0 / dims.n as f64;
    loss *= inv_n;
    loss += reg * w.sum_squares();
    dw.scale(inv_n);
    dw.add_scaled(2.0 * reg, w)?;

    debug!(n = dims.n, d = dims.d, c = dims.c, reg, loss, "naive softmax loss");
    Ok((loss, dw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn uniform_scores_give_log_c() {
        let w = Matrix::zeros(2, 5);
        let x = Matrix::from_data(vec![vec![1.0, -1.0], vec![0.3, 2.0]]).unwrap();
        let (loss, dw) = softmax_loss_naive(&w, &x, &[0, 4], 0.0).unwrap();
        assert_relative_eq!(loss, 5f64.ln(), max_relative = 1e-12);
        assert_eq!(dw.shape(), (2, 5));
    }

    #[test]
    fn gradient_of_single_sample_matches_hand_computation() {
        // Scores are [1, 0]; p = [e/(e+1), 1/(e+1)].
        let w = Matrix::from_data(vec![vec![1.0, 0.0]]).unwrap();
        let x = Matrix::from_data(vec![vec![1.0]]).unwrap();
        let (_, dw) = softmax_loss_naive(&w, &x, &[1], 0.0).unwrap();
        let e = 1f64.exp();
        assert_relative_eq!(dw[(0, 0)], e / (e + 1.0), max_relative = 1e-12);
        assert_relative_eq!(dw[(0, 1)], 1.0 / (e + 1.0) - 1.0, max_relative = 1e-12);
    }

    #[test]
    fn huge_scores_stay_finite() {
        let w = Matrix::from_data(vec![vec![1000.0, -1000.0, 800.0]]).unwrap();
        let x = Matrix::from_data(vec![vec![1.0], vec![2.0]]).unwrap();
        let (loss, dw) = softmax_loss_naive(&w, &x, &[1, 2], 0.0).unwrap();
        assert!(loss.is_finite());
        assert!(dw.as_slice().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn invalid_inputs_are_errors() {
        let w = Matrix::zeros(2, 3);
        let x = Matrix::zeros(1, 2);
        assert!(matches!(
            softmax_loss_naive(&w, &x, &[3], 0.0),
            Err(LossError::LabelOutOfRange { .. })
        ));
        assert!(matches!(
            softmax_loss_naive(&w, &Matrix::zeros(0, 2), &[], 0.0),
            Err(LossError::EmptyBatch)
        ));
    }
}
