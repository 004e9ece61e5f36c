//! Persisted preferences for Kivotos Guessr.
//!
//! Settings are kept in a flat key-value store (in memory or a JSON file)
//! with every key read and written independently. Values are validated on
//! load; anything out of range falls back to its default.

pub mod error;
pub mod kv;
pub mod settings;
pub mod theme;

pub use error::{SettingsError, SettingsResult, StoreError, StoreResult};
pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};
pub use settings::{
    DEFAULT_MAX_GUESSES, MAX_GUESSES_RANGE, Settings, SettingsStore, parse_max_guesses,
};
pub use theme::{Theme, ThemeController, ThemePreference};
