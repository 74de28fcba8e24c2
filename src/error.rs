use thiserror::Error;

/// Errors raised by matrix construction and loss evaluation.
///
/// Every evaluator validates its inputs up front, so a returned error means
/// nothing was computed.
#[derive(Debug, Error)]
pub enum LossError {
    /// Two shapes that must agree do not.
    #[error("dimension mismatch in {context}: expected {expected}, found {found}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },
    /// `y[sample]` is not a valid class index.
    #[error("label {label} of sample {sample} is outside [0, {classes})")]
    LabelOutOfRange {
        sample: usize,
        label: usize,
        classes: usize,
    },
    /// The minibatch has no samples, so the 1/N average is undefined.
    #[error("minibatch is empty")]
    EmptyBatch,
    /// Regularization strength must be finite and non-negative.
    #[error("invalid regularization strength {0}")]
    InvalidRegularization(f64),
    #[error("rows have differing lengths")]
    RaggedRows,
    #[error("matrix has no rows")]
    EmptyMatrix,
    /// A flat buffer does not hold `rows * cols` values.
    #[error("buffer of length {found} cannot hold a {rows}x{cols} matrix")]
    LengthMismatch {
        rows: usize,
        cols: usize,
        found: usize,
    },
    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}
