//! Error types for roster loading.

use thiserror::Error;

/// Result type for roster operations.
pub type RosterResult<T> = Result<T, RosterError>;

/// Errors that can occur while fetching or parsing roster data.
#[derive(Debug, Error)]
pub enum RosterError {
    /// The document could not be retrieved.
    #[error("failed to fetch {path}: {reason}")]
    Fetch {
        /// Path that was requested.
        path: String,
        /// Underlying cause.
        reason: String,
    },

    /// The document is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is JSON but neither an object nor an array.
    #[error("roster document must be a JSON object or array")]
    Shape,

    /// A record is missing required data or has it in the wrong form.
    #[error("data integrity violation in record {record}: {reason}")]
    Integrity {
        /// Key, index, or name identifying the record.
        record: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl RosterError {
    /// Whether this error indicates malformed data rather than a failed fetch.
    pub fn is_integrity(&self) -> bool {
        matches!(self, Self::Integrity { .. } | Self::Shape | Self::Json(_))
    }
}
