use crate::error::LossError;
use crate::math::matrix::Matrix;

/// Minibatch dimensions: `n` samples, `d` features, `c` classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchDims {
    pub n: usize,
    pub d: usize,
    pub c: usize,
}

/// Checks the evaluator inputs before any arithmetic happens.
///
/// Order: regularization, W/X agreement, y/X agreement, non-empty batch,
/// then every label. The first failure is returned.
pub fn check_inputs(w: &Matrix, x: &Matrix, y: &[usize], reg: f64) -> Result<BatchDims, LossError> {
    if !reg.is_finite() || reg < 0.0 {
        return Err(LossError::InvalidRegularization(reg));
    }
    if w.rows() != x.cols() {
        return Err(LossError::DimensionMismatch {
            context: "weight rows vs feature columns",
            expected: x.cols(),
            found: w.rows(),
        });
    }
    if y.len() != x.rows() {
        return Err(LossError::DimensionMismatch {
            context: "label count vs sample rows",
            expected: x.rows(),
            found: y.len(),
        });
    }
    if x.rows() == 0 {
        return Err(LossError::EmptyBatch);
    }
    let classes = w.cols();
    if let Some(sample) = y.iter().position(|&label| label >= classes) {
        return Err(LossError::LabelOutOfRange { sample, label: y[sample], classes });
    }

    Ok(BatchDims { n: x.rows(), d: x.cols(), c: classes })
}
