//! Error types for the smartfit_core library.

use std::io;
use uuid::Uuid;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for smartfit_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No set with this id is recorded under the exercise
    #[error("No set {set_id} recorded for exercise '{exercise}'")]
    NotFound { exercise: String, set_id: Uuid },

    /// The in-memory history changed but could not be written to storage
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Stored history document is corrupt or from an unsupported version
    #[error("Decode error: {0}")]
    Decode(String),

    /// Caller-supplied values rejected by the validation layer
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// True for the "nothing to update" case, so callers can tell it apart
    /// from storage failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
