pub mod error;
pub mod math;
pub mod loss;
pub mod gradient;
pub mod classifier;
pub mod config;
pub mod logging;

// Convenience re-exports
pub use error::LossError;
pub use math::matrix::Matrix;
pub use loss::naive::softmax_loss_naive;
pub use loss::vectorized::softmax_loss_vectorized;
pub use loss::kernel::LossKernel;
pub use config::{ConfigError, SoftmaxConfig};
