use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::error::LossError;
use crate::loss::kernel::LossKernel;
use crate::math::matrix::Matrix;

/// Errors raised while loading or saving a [`SoftmaxConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed config {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Invalid(#[from] LossError),
}

/// Loss evaluation settings.
///
/// - `reg`    — L2 regularization strength, finite and non-negative
/// - `kernel` — which implementation evaluates the loss
///
/// Missing fields fall back to [`SoftmaxConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoftmaxConfig {
    pub reg: f64,
    pub kernel: LossKernel,
}

impl Default for SoftmaxConfig {
    fn default() -> Self {
        SoftmaxConfig { reg: 0.0, kernel: LossKernel::Vectorized }
    }
}

impl SoftmaxConfig {
    pub fn new(reg: f64, kernel: LossKernel) -> Self {
        SoftmaxConfig { reg, kernel }
    }

    pub fn validate(&self) -> Result<(), LossError> {
        if !self.reg.is_finite() || self.reg < 0.0 {
            return Err(LossError::InvalidRegularization(self.reg));
        }
        Ok(())
    }

    /// Loss and gradient of `w` on the minibatch `(x, y)` under these settings.
    pub fn evaluate(&self, w: &Matrix, x: &Matrix, y: &[usize]) -> Result<(f64, Matrix), LossError> {
        self.kernel.evaluate(w, x, y, self.reg)
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|source| ConfigError::Json { path: path.to_path_buf(), source })
    }

    /// Deserializes and validates a config previously written by `save_json`.
    pub fn load_json(path: impl AsRef<Path>) -> Result<SoftmaxConfig, ConfigError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let reader = std::io::BufReader::new(file);
        let config: SoftmaxConfig = serde_json::from_reader(reader)
            .map_err(|source| ConfigError::Json { path: path.to_path_buf(), source })?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config: SoftmaxConfig = serde_json::from_str(r#"{"reg": 0.25}"#).unwrap();
        assert_eq!(config, SoftmaxConfig::new(0.25, LossKernel::Vectorized));
        let config: SoftmaxConfig = serde_json::from_str(r#"{"kernel": "naive"}"#).unwrap();
        assert_eq!(config, SoftmaxConfig::new(0.0, LossKernel::Naive));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("softmax.json");
        let config = SoftmaxConfig::new(5e-6, LossKernel::Naive);
        config.save_json(&path).unwrap();
        assert_eq!(SoftmaxConfig::load_json(&path).unwrap(), config);
    }

    #[test]
    fn load_rejects_negative_reg_and_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("neg.json");
        std::fs::write(&path, r#"{"reg": -1.0}"#).unwrap();
        assert!(matches!(
            SoftmaxConfig::load_json(&path),
            Err(ConfigError::Invalid(LossError::InvalidRegularization(_)))
        ));

        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(SoftmaxConfig::load_json(&path), Err(ConfigError::Json { .. })));

        assert!(matches!(
            SoftmaxConfig::load_json(dir.path().join("missing.json")),
            Err(ConfigError::Io { .. })
        ));
    }
}
