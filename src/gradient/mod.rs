pub mod check;

pub use check::{grad_check_sparse, numerical_gradient, rel_error, GradCheckSample};
