pub mod validate;
pub mod naive;
pub mod vectorized;
pub mod kernel;

pub use naive::softmax_loss_naive;
pub use vectorized::softmax_loss_vectorized;
pub use kernel::LossKernel;
pub use validate::{check_inputs, BatchDims};
