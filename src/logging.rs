//! Tracing subscriber setup for the binary.
//!
//! The library only emits events; installing a subscriber is left to the
//! caller. The filter defaults to `info` and honours `RUST_LOG`.

use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_FILTER: &str = "info";

/// Outcome of the one install attempt, shared by every caller.
static INSTALLED: OnceLock<Result<(), String>> = OnceLock::new();

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Another global subscriber was installed first.
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(String),
}

/// Installs a stdout fmt subscriber.
///
/// Only the first call installs; concurrent and later calls wait for it and
/// report the same outcome.
pub fn init() -> Result<(), LoggingError> {
    INSTALLED
        .get_or_init(install)
        .clone()
        .map_err(LoggingError::SetGlobal)
}

fn install() -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init()
        .map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concurrent_init_calls_all_succeed() {
        let handles: Vec<_> = (0..8).map(|_| std::thread::spawn(init)).collect();
        for handle in handles {
            assert!(handle.join().unwrap().is_ok());
        }
        assert!(init().is_ok());
    }
}
