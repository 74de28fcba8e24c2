use serde::{Serialize, Deserialize};

use crate::error::LossError;
use crate::loss::naive::softmax_loss_naive;
use crate::loss::vectorized::softmax_loss_vectorized;
use crate::math::matrix::Matrix;

/// Selects which softmax loss implementation evaluates a minibatch.
///
/// - `Naive`      — explicit loops over samples and classes; the reference.
/// - `Vectorized` — matrix products and broadcasting; same result, faster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossKernel {
    Naive,
    #[default]
    Vectorized,
}

impl LossKernel {
    pub fn evaluate(self, w: &Matrix, x: &Matrix, y: &[usize], reg: f64) -> Result<(f64, Matrix), LossError> {
        match self {
            LossKernel::Naive => softmax_loss_naive(w, x, y, reg),
            LossKernel::Vectorized => softmax_loss_vectorized(w, x, y, reg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_snake_case() {
        assert_eq!(serde_json::to_string(&LossKernel::Vectorized).unwrap(), "\"vectorized\"");
        let k: LossKernel = serde_json::from_str("\"naive\"").unwrap();
        assert_eq!(k, LossKernel::Naive);
    }

    #[test]
    fn dispatches_to_both_kernels() {
        let w = Matrix::zeros(1, 2);
        let x = Matrix::from_data(vec![vec![1.0]]).unwrap();
        for kernel in [LossKernel::Naive, LossKernel::Vectorized] {
            let (loss, _) = kernel.evaluate(&w, &x, &[0], 0.0).unwrap();
            assert!((loss - 2f64.ln()).abs() < 1e-12);
        }
    }
}
