//! Error types for the parley bot.
//!
//! [`ParleyError`] covers the failures that can happen before the bot
//! starts dispatching: reading and validating configuration. Dispatch
//! itself has no error path.

use thiserror::Error;

/// Top-level error type for the parley bot.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParleyError {
    /// Configuration is malformed or semantically invalid.
    #[error("invalid config: {reason}")]
    ConfigInvalid {
        /// What is wrong with the configuration.
        reason: String,
    },

    /// Underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization / deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ParleyError>;
