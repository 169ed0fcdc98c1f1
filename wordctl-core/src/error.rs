/// Structured error types for wordctl-core library.
///
/// Uses `thiserror` for the library surface. The binary (wordctl-cli) wraps
/// these with `anyhow` context, but the view layer matches on the variants
/// to decide which notice to show.
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for wordctl-core operations
#[derive(Error, Debug)]
pub enum WordError {
    /// The bulk word list could not be downloaded or parsed
    #[error("Failed to load word dictionary: {reason}")]
    BulkFetchFailed { reason: String },

    /// Transport or parse failure while looking up a single word
    #[error("Failed to fetch details for '{word}': {reason}")]
    DetailFetchFailed { word: String, reason: String },

    /// The lookup succeeded but returned zero entries
    #[error("No definitions found for '{word}'")]
    DetailNotFound { word: String },

    /// A favorites/history list could not be read
    #[error("Failed to read '{key}' from storage: {reason}")]
    StorageReadFailed { key: String, reason: String },

    /// A favorites/history list could not be written
    #[error("Failed to write '{key}' to storage: {reason}")]
    StorageWriteFailed { key: String, reason: String },

    /// Configuration error
    #[error("Configuration error in {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },

    /// Operation needs a logged-in user
    #[error("Not logged in")]
    NotLoggedIn,
}

/// Result type alias for wordctl-core operations
pub type Result<T> = std::result::Result<T, WordError>;

impl WordError {
    pub fn bulk_fetch(reason: impl Into<String>) -> Self {
        Self::BulkFetchFailed {
            reason: reason.into(),
        }
    }

    pub fn detail_fetch(word: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DetailFetchFailed {
            word: word.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(word: impl Into<String>) -> Self {
        Self::DetailNotFound { word: word.into() }
    }

    pub fn storage_read(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::StorageReadFailed {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn storage_write(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::StorageWriteFailed {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn config(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
