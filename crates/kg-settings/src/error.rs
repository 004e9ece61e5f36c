//! Error types for settings and their backing store.

use thiserror::Error;

/// Result type for key-value store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Errors from a persisted key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not a JSON object.
    #[error("settings file is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from changing a setting.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Max guesses must be a whole number from 1 to 20.
    #[error("invalid max guesses: \"{0}\" (expected a whole number from 1 to 20)")]
    InvalidMaxGuesses(String),

    /// The theme preference is not one of light, dark, auto, system.
    #[error("unknown theme: \"{0}\" (expected light, dark, auto, or system)")]
    UnknownTheme(String),

    /// The new value could not be persisted.
    #[error(transparent)]
    Store(#[from] StoreError),
}
