//! The settings store: validated preferences and play statistics.

use std::fmt;
use std::ops::RangeInclusive;

use serde::Serialize;
use tracing::{debug, warn};

use kg_core::Region;

use crate::error::{SettingsError, SettingsResult};
use crate::kv::KeyValueStore;
use crate::theme::ThemePreference;

/// Guess budget used when nothing valid is stored.
pub const DEFAULT_MAX_GUESSES: u32 = 8;

/// Allowed guess budgets.
pub const MAX_GUESSES_RANGE: RangeInclusive<u32> = 1..=20;

const KEY_REGION: &str = "baGuessr_selectedServer";
const KEY_MAX_GUESSES: &str = "baGuessr_maxGuesses";
const KEY_HINTS: &str = "baGuessr_hintsEnabled";
const KEY_TOTAL: &str = "baGuessr_totalGames";
const KEY_WON: &str = "baGuessr_gamesWon";
const KEY_THEME: &str = "baGuessr_themePreference";

/// Current preference and statistics values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Guess budget per round (1-20).
    pub max_guesses: u32,
    /// Whether a hint may be disclosed mid-round.
    pub hints_enabled: bool,
    /// Selected server.
    pub region: Region,
    /// Rounds started from a playable state.
    pub total_games: u32,
    /// Rounds won.
    pub games_won: u32,
    /// Theme preference.
    pub theme: ThemePreference,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_guesses: DEFAULT_MAX_GUESSES,
            hints_enabled: true,
            region: Region::default(),
            total_games: 0,
            games_won: 0,
            theme: ThemePreference::default(),
        }
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Max guesses: {}", self.max_guesses)?;
        writeln!(
            f,
            "Hints:       {}",
            if self.hints_enabled { "on" } else { "off" }
        )?;
        writeln!(f, "Server:      {} ({})", self.region, self.region.label())?;
        write!(f, "Theme:       {}", self.theme)
    }
}

/// Parse user input for the guess budget.
pub fn parse_max_guesses(input: &str) -> SettingsResult<u32> {
    input
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|n| MAX_GUESSES_RANGE.contains(n))
        .ok_or_else(|| SettingsError::InvalidMaxGuesses(input.to_string()))
}

/// Settings backed by a persisted key-value store.
pub struct SettingsStore {
    store: Box<dyn KeyValueStore>,
    values: Settings,
}

impl SettingsStore {
    /// Read every setting from `store`, discarding invalid values.
    ///
    /// Invalid max guesses, region, and theme values are replaced by their
    /// defaults and their keys removed; invalid counters read as zero.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let mut this = Self {
            store,
            values: Settings::default(),
        };

        if let Some(raw) = this.store.get(KEY_MAX_GUESSES) {
            match parse_max_guesses(&raw) {
                Ok(n) => this.values.max_guesses = n,
                Err(_) => this.discard(KEY_MAX_GUESSES, &raw),
            }
        }

        if let Some(raw) = this.store.get(KEY_REGION) {
            match Region::parse(&raw) {
                Ok(r) => this.values.region = r,
                Err(_) => this.discard(KEY_REGION, &raw),
            }
        }

        if let Some(raw) = this.store.get(KEY_THEME) {
            match ThemePreference::parse(&raw) {
                Ok(t) => this.values.theme = t,
                Err(_) => this.discard(KEY_THEME, &raw),
            }
        }

        if let Some(raw) = this.store.get(KEY_HINTS) {
            this.values.hints_enabled = raw.trim() != "false";
        }

        this.values.total_games = this.counter(KEY_TOTAL);
        this.values.games_won = this.counter(KEY_WON);

        debug!(settings = ?this.values, "settings loaded");
        this
    }

    /// Current values.
    pub fn settings(&self) -> &Settings {
        &self.values
    }

    /// Guess budget.
    pub fn max_guesses(&self) -> u32 {
        self.values.max_guesses
    }

    /// Whether hints are enabled.
    pub fn hints_enabled(&self) -> bool {
        self.values.hints_enabled
    }

    /// Selected region.
    pub fn region(&self) -> Region {
        self.values.region
    }

    /// Theme preference.
    pub fn theme(&self) -> ThemePreference {
        self.values.theme
    }

    /// Rounds started.
    pub fn total_games(&self) -> u32 {
        self.values.total_games
    }

    /// Rounds won.
    pub fn games_won(&self) -> u32 {
        self.values.games_won
    }

    /// Set the guess budget. Values outside 1-20 are rejected and nothing
    /// changes.
    pub fn set_max_guesses(&mut self, n: u32) -> SettingsResult<()> {
        if !MAX_GUESSES_RANGE.contains(&n) {
            warn!(value = n, "rejected max guesses");
            return Err(SettingsError::InvalidMaxGuesses(n.to_string()));
        }
        self.values.max_guesses = n;
        self.store.set(KEY_MAX_GUESSES, &n.to_string())?;
        Ok(())
    }

    /// Flip the hints flag and return the new value.
    pub fn toggle_hints(&mut self) -> SettingsResult<bool> {
        let enabled = !self.values.hints_enabled;
        self.set_hints_enabled(enabled)?;
        Ok(enabled)
    }

    /// Set the hints flag.
    pub fn set_hints_enabled(&mut self, enabled: bool) -> SettingsResult<()> {
        self.values.hints_enabled = enabled;
        self.store.set(KEY_HINTS, if enabled { "true" } else { "false" })?;
        Ok(())
    }

    /// Set the selected region.
    pub fn set_region(&mut self, region: Region) -> SettingsResult<()> {
        self.values.region = region;
        self.store.set(KEY_REGION, region.code())?;
        Ok(())
    }

    /// Set the theme preference.
    pub fn set_theme(&mut self, theme: ThemePreference) -> SettingsResult<()> {
        self.values.theme = theme;
        self.store.set(KEY_THEME, theme.code())?;
        Ok(())
    }

    /// Count a started round.
    pub fn record_game_start(&mut self) -> SettingsResult<()> {
        self.values.total_games = self.values.total_games.saturating_add(1);
        self.store
            .set(KEY_TOTAL, &self.values.total_games.to_string())?;
        Ok(())
    }

    /// Count a won round.
    pub fn record_game_won(&mut self) -> SettingsResult<()> {
        self.values.games_won = self.values.games_won.saturating_add(1);
        self.store.set(KEY_WON, &self.values.games_won.to_string())?;
        Ok(())
    }

    /// Zero both counters.
    pub fn reset_stats(&mut self) -> SettingsResult<()> {
        self.values.total_games = 0;
        self.values.games_won = 0;
        self.store.set(KEY_TOTAL, "0")?;
        self.store.set(KEY_WON, "0")?;
        Ok(())
    }

    fn counter(&self, key: &str) -> u32 {
        self.store
            .get(key)
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0)
    }

    fn discard(&mut self, key: &str, raw: &str) {
        warn!(key, value = raw, "discarding invalid stored setting");
        if let Err(e) = self.store.remove(key) {
            warn!(key, error = %e, "failed to clear stored setting");
        }
    }
}

impl fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsStore")
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{JsonFileStore, MemoryStore};

    fn load(store: MemoryStore) -> SettingsStore {
        SettingsStore::load(Box::new(store))
    }

    #[test]
    fn defaults_on_empty_store() {
        let s = load(MemoryStore::new());
        assert_eq!(s.settings(), &Settings::default());
        assert_eq!(s.max_guesses(), 8);
        assert!(s.hints_enabled());
        assert_eq!(s.region(), Region::Jp);
    }

    #[test]
    fn reads_valid_values() {
        let s = load(
            MemoryStore::new()
                .with(KEY_MAX_GUESSES, "12")
                .with(KEY_REGION, "gl")
                .with(KEY_HINTS, "false")
                .with(KEY_TOTAL, "7")
                .with(KEY_WON, "3")
                .with(KEY_THEME, "dark"),
        );
        assert_eq!(s.max_guesses(), 12);
        assert_eq!(s.region(), Region::Gl);
        assert!(!s.hints_enabled());
        assert_eq!(s.total_games(), 7);
        assert_eq!(s.games_won(), 3);
        assert_eq!(s.theme(), ThemePreference::Dark);
    }

    #[test]
    fn out_of_range_max_guesses_is_discarded() {
        let s = load(MemoryStore::new().with(KEY_MAX_GUESSES, "25"));
        assert_eq!(s.max_guesses(), DEFAULT_MAX_GUESSES);
        assert!(s.store.get(KEY_MAX_GUESSES).is_none());

        let s = load(MemoryStore::new().with(KEY_MAX_GUESSES, "abc"));
        assert_eq!(s.max_guesses(), DEFAULT_MAX_GUESSES);
        assert!(s.store.get(KEY_MAX_GUESSES).is_none());
    }

    #[test]
    fn invalid_region_and_theme_fall_back() {
        let s = load(
            MemoryStore::new()
                .with(KEY_REGION, "kr")
                .with(KEY_THEME, "sepia"),
        );
        assert_eq!(s.region(), Region::Jp);
        assert_eq!(s.theme(), ThemePreference::System);
        assert!(s.store.get(KEY_REGION).is_none());
        assert!(s.store.get(KEY_THEME).is_none());
    }

    #[test]
    fn invalid_counters_read_as_zero() {
        let s = load(MemoryStore::new().with(KEY_TOTAL, "-4").with(KEY_WON, "x"));
        assert_eq!(s.total_games(), 0);
        assert_eq!(s.games_won(), 0);
    }

    #[test]
    fn set_max_guesses_validates() {
        let mut s = load(MemoryStore::new());
        assert!(s.set_max_guesses(0).is_err());
        assert!(s.set_max_guesses(21).is_err());
        assert_eq!(s.max_guesses(), DEFAULT_MAX_GUESSES);

        s.set_max_guesses(20).unwrap();
        assert_eq!(s.max_guesses(), 20);
        assert_eq!(s.store.get(KEY_MAX_GUESSES).as_deref(), Some("20"));
    }

    #[test]
    fn parse_max_guesses_input() {
        assert_eq!(parse_max_guesses(" 5 ").unwrap(), 5);
        assert!(parse_max_guesses("five").is_err());
        assert!(parse_max_guesses("0").is_err());
        assert!(parse_max_guesses("-3").is_err());
        assert!(parse_max_guesses("21").is_err());
    }

    #[test]
    fn toggle_hints_persists() {
        let mut s = load(MemoryStore::new());
        assert!(!s.toggle_hints().unwrap());
        assert_eq!(s.store.get(KEY_HINTS).as_deref(), Some("false"));
        assert!(s.toggle_hints().unwrap());
    }

    #[test]
    fn counters_increment_and_reset() {
        let mut s = load(MemoryStore::new());
        s.record_game_start().unwrap();
        s.record_game_start().unwrap();
        s.record_game_won().unwrap();
        assert_eq!(s.total_games(), 2);
        assert_eq!(s.games_won(), 1);
        assert_eq!(s.store.get(KEY_TOTAL).as_deref(), Some("2"));

        s.reset_stats().unwrap();
        assert_eq!(s.total_games(), 0);
        assert_eq!(s.games_won(), 0);
    }

    #[test]
    fn survives_file_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("state.json");

        let mut s = SettingsStore::load(Box::new(JsonFileStore::open(&path).unwrap()));
        s.set_region(Region::Cn).unwrap();
        s.set_theme(ThemePreference::Auto).unwrap();
        s.set_max_guesses(3).unwrap();

        let s = SettingsStore::load(Box::new(JsonFileStore::open(&path).unwrap()));
        assert_eq!(s.region(), Region::Cn);
        assert_eq!(s.theme(), ThemePreference::Auto);
        assert_eq!(s.max_guesses(), 3);
    }

    #[test]
    fn hand_edited_numbers_are_read() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(
            &path,
            r#"{"baGuessr_maxGuesses": 12, "baGuessr_hintsEnabled": false, "baGuessr_gamesWon": 4}"#,
        )
        .unwrap();

        let s = SettingsStore::load(Box::new(JsonFileStore::open(&path).unwrap()));
        assert_eq!(s.max_guesses(), 12);
        assert!(!s.hints_enabled());
        assert_eq!(s.games_won(), 4);
    }
}
