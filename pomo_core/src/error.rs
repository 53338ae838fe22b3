//! Error types for the pomo_core library.
//!
//! Engine commands never fail: every command in every state has a defined
//! (possibly no-op) outcome. Errors here cover the ambient concerns around
//! the engine: configuration files and the CLI script runner.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for pomo_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed command script (CLI script mode)
    #[error("Script error: {0}")]
    Script(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
