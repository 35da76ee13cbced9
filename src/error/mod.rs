//! Error types for bufcheck

use thiserror::Error;

/// Main error type for bufcheck
#[derive(Debug, Error)]
pub enum BufcheckError {
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Remote command failed in pod {pod}: {reason}")]
    RemoteExec { pod: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for BufcheckError {
    fn from(e: serde_json::Error) -> Self {
        BufcheckError::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for BufcheckError {
    fn from(e: serde_yaml::Error) -> Self {
        BufcheckError::Serialization(e.to_string())
    }
}

/// Result type alias for bufcheck
pub type Result<T> = std::result::Result<T, BufcheckError>;
