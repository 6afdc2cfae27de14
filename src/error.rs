//! @ai:module:intent Define error types for corpus loading, tokenization and result storage
//! @ai:module:layer domain
//! @ai:module:public_api BenchError, Result
//! @ai:module:stateless true

use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Unified error type for all benchmark operations
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Configuration file not found: {}", path.display())]
    ConfigurationMissing { path: PathBuf },

    #[error("Invalid configuration in {}: {message}", path.display())]
    InvalidConfiguration { path: PathBuf, message: String },

    #[error("Unknown tokenizer: {0}")]
    UnknownTokenizer(String),

    #[error("Tokenizer '{id}' unavailable: {reason}")]
    TokenizerUnavailable { id: String, reason: String },

    #[error("Tokenization of '{input}' with {id} failed: {reason}")]
    SampleTokenizationFailure {
        id: String,
        input: String,
        reason: String,
    },

    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl BenchError {
    /// @ai:intent Wrap an IO error with the path it concerns
    /// @ai:effects pure
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// @ai:intent Whether this error should abort the whole command
    /// @ai:effects pure
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            BenchError::ConfigurationMissing { .. }
                | BenchError::InvalidConfiguration { .. }
                | BenchError::UnknownTokenizer(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, BenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_failures_are_fatal() {
        let missing = BenchError::ConfigurationMissing {
            path: PathBuf::from("data/test_cases.json"),
        };
        assert!(missing.is_fatal());
        assert!(BenchError::UnknownTokenizer("gpt9".to_string()).is_fatal());
    }

    #[test]
    fn test_per_item_failures_are_not_fatal() {
        let unavailable = BenchError::TokenizerUnavailable {
            id: "llama3".to_string(),
            reason: "401 Unauthorized".to_string(),
        };
        assert!(!unavailable.is_fatal());
        assert!(unavailable.to_string().contains("llama3"));
    }
}
