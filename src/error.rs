use std::io;
use thiserror::Error;

/// Custom error type for motdstats
#[derive(Error, Debug)]
pub enum MotdError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration syntax error in {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid threshold [{section}] {key}: {reason}")]
    InvalidThreshold {
        section: String,
        key: String,
        reason: String,
    },

    #[error("Metric collection failed: {0}")]
    Collection(String),

    #[error("Not supported on this platform: {0}")]
    Unsupported(String),
}

/// Result type alias for motdstats
pub type Result<T> = std::result::Result<T, MotdError>;

impl MotdError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        MotdError::Config(msg.into())
    }

    /// Create a threshold validation error
    pub fn invalid_threshold<A, B, C>(section: A, key: B, reason: C) -> Self
    where
        A: Into<String>,
        B: Into<String>,
        C: Into<String>,
    {
        MotdError::InvalidThreshold {
            section: section.into(),
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn collection<S: Into<String>>(msg: S) -> Self {
        MotdError::Collection(msg.into())
    }

    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        MotdError::Unsupported(msg.into())
    }

    /// Fatal errors abort the run; everything else degrades a single metric.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            MotdError::Config(_) | MotdError::Parse { .. } | MotdError::InvalidThreshold { .. }
        )
    }
}
