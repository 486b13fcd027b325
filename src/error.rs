//! Error types for nev-digest.
//!
//! Transport and translation failures never surface as errors; they are
//! logged at the call site and treated as "no results" or "untranslated".

use std::path::PathBuf;

/// Error type for store, configuration and report operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The dedup store file exists but could not be read or parsed.
    #[error("Corrupt store at {path}: {reason}")]
    CorruptStore { path: PathBuf, reason: String },

    /// The monitor configuration file exists but could not be parsed.
    #[error("Invalid config at {path}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    /// The HTTP client could not be constructed.
    #[error("HTTP client setup failed: {0}")]
    Client(String),

    /// A translation request failed or returned an unusable body.
    #[error("Translation failed: {0}")]
    Translation(String),

    /// Writing a store or report to disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing a store or report failed.
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for nev-digest operations.
pub type Result<T> = std::result::Result<T, Error>;
