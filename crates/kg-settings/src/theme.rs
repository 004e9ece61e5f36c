//! Light/dark display mode derived from preference and system signal.

use std::fmt;

use chrono::{Local, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{SettingsError, SettingsResult};

/// First hour of the night window used by [`ThemePreference::Auto`].
const NIGHT_START_HOUR: u32 = 19;
/// First hour after the night window.
const NIGHT_END_HOUR: u32 = 7;

/// The user's theme setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Always light.
    Light,
    /// Always dark.
    Dark,
    /// Dark at night (19:00 to 07:00), light otherwise.
    Auto,
    /// Follow the operating system.
    #[default]
    System,
}

impl ThemePreference {
    /// Persisted code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Auto => "auto",
            Self::System => "system",
        }
    }

    /// Parse a persisted code, ignoring case.
    pub fn parse(s: &str) -> SettingsResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "auto" => Ok(Self::Auto),
            "system" => Ok(Self::System),
            _ => Err(SettingsError::UnknownTheme(s.to_string())),
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The display mode actually in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light mode.
    Light,
    /// Dark mode.
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

/// Resolves the effective theme.
#[derive(Debug, Clone)]
pub struct ThemeController {
    preference: ThemePreference,
    system_prefers_dark: bool,
}

impl ThemeController {
    /// Create a controller for the given preference and system signal.
    pub fn new(preference: ThemePreference, system_prefers_dark: bool) -> Self {
        Self {
            preference,
            system_prefers_dark,
        }
    }

    /// Current preference.
    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    /// Replace the preference. Persisting it is the settings store's job.
    pub fn set_preference(&mut self, preference: ThemePreference) {
        self.preference = preference;
    }

    /// Update the system "prefers dark" signal.
    pub fn set_system_prefers_dark(&mut self, dark: bool) {
        self.system_prefers_dark = dark;
    }

    /// Effective theme at the given local hour (0-23).
    pub fn effective_at(&self, hour: u32) -> Theme {
        match self.preference {
            ThemePreference::Light => Theme::Light,
            ThemePreference::Dark => Theme::Dark,
            ThemePreference::Auto => {
                if !(NIGHT_END_HOUR..NIGHT_START_HOUR).contains(&hour) {
                    Theme::Dark
                } else {
                    Theme::Light
                }
            }
            ThemePreference::System => {
                if self.system_prefers_dark {
                    Theme::Dark
                } else {
                    Theme::Light
                }
            }
        }
    }

    /// Effective theme now, by the local clock.
    pub fn effective(&self) -> Theme {
        self.effective_at(Local::now().hour())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_preferences() {
        assert_eq!(ThemeController::new(ThemePreference::Light, true).effective_at(23), Theme::Light);
        assert_eq!(ThemeController::new(ThemePreference::Dark, false).effective_at(12), Theme::Dark);
    }

    #[test]
    fn auto_follows_clock() {
        let c = ThemeController::new(ThemePreference::Auto, false);
        assert_eq!(c.effective_at(6), Theme::Dark);
        assert_eq!(c.effective_at(7), Theme::Light);
        assert_eq!(c.effective_at(18), Theme::Light);
        assert_eq!(c.effective_at(19), Theme::Dark);
        assert_eq!(c.effective_at(0), Theme::Dark);
    }

    #[test]
    fn system_follows_signal() {
        let mut c = ThemeController::new(ThemePreference::System, false);
        assert_eq!(c.effective_at(12), Theme::Light);
        c.set_system_prefers_dark(true);
        assert_eq!(c.effective_at(12), Theme::Dark);
    }

    #[test]
    fn parse_preferences() {
        assert_eq!(ThemePreference::parse("AUTO").unwrap(), ThemePreference::Auto);
        assert!(ThemePreference::parse("sepia").is_err());
        assert_eq!(ThemePreference::default(), ThemePreference::System);
    }
}
