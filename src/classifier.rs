use crate::error::LossError;
use crate::math::matrix::Matrix;

/// Predicted class per sample: argmax over each row of `X·W`.
/// Ties resolve to the lowest class index.
pub fn predict(w: &Matrix, x: &Matrix) -> Result<Vec<usize>, LossError> {
    let scores = x.matmul(w)?;
    Ok((0..scores.rows()).map(|i| argmax(scores.row(i))).collect())
}

/// Fraction of samples whose predicted class equals `y`.
pub fn accuracy(w: &Matrix, x: &Matrix, y: &[usize]) -> Result<f64, LossError> {
    if y.len() != x.rows() {
        return Err(LossError::DimensionMismatch {
            context: "label count vs sample rows",
            expected: x.rows(),
            found: y.len(),
        });
    }
    if y.is_empty() {
        return Err(LossError::EmptyBatch);
    }
    let predicted = predict(w, x)?;
    let correct = predicted.iter().zip(y).filter(|(p, t)| p == t).count();
    Ok(correct as f64 / y.len() as f64)
}

fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}
