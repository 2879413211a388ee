//! Domain error types.

use crate::domain::universe::UniverseError;

/// Top-level error type for trendrank.
#[derive(Debug, thiserror::Error)]
pub enum TrendrankError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Universe(#[from] UniverseError),

    #[error("price provider error for {ticker}: {reason}")]
    Provider { ticker: String, reason: String },

    #[error("no price data could be loaded for any of the {attempted} configured symbols")]
    EmptyResult { attempted: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TrendrankError {
    pub fn provider(ticker: &str, reason: impl Into<String>) -> Self {
        TrendrankError::Provider {
            ticker: ticker.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&TrendrankError> for std::process::ExitCode {
    fn from(err: &TrendrankError) -> Self {
        let code: u8 = match err {
            // An empty screen is a reported outcome, not a failure.
            TrendrankError::EmptyResult { .. } => 0,
            TrendrankError::Io(_) | TrendrankError::Provider { .. } => 1,
            TrendrankError::ConfigParse { .. }
            | TrendrankError::ConfigMissing { .. }
            | TrendrankError::ConfigInvalid { .. }
            | TrendrankError::Universe(_) => 2,
        };
        std::process::ExitCode::from(code)
    }
}
