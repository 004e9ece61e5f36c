//! Error types for the game engine.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors returned by [`GameContext`](crate::GameContext) operations.
///
/// Round-level no-ops (guessing after the round ended, repeating a guess)
/// are reported through [`GuessOutcome`](crate::GuessOutcome) instead.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No available character matches the given name or id.
    #[error("no available character named \"{name}\"")]
    UnknownCharacter {
        /// What the player typed.
        name: String,
        /// Close matches among available characters.
        suggestions: Vec<String>,
    },

    /// Invalid region code.
    #[error(transparent)]
    Region(#[from] kg_core::CoreError),

    /// A setting was rejected or could not be persisted.
    #[error(transparent)]
    Settings(#[from] kg_settings::SettingsError),
}
