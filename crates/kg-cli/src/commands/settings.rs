use std::path::Path;

use kg_core::Region;
use kg_settings::{ThemeController, ThemePreference, parse_max_guesses};

/// Requested changes, as typed on the command line.
#[derive(Debug, Default)]
pub struct Changes<'a> {
    pub max_guesses: Option<&'a str>,
    pub hints: Option<&'a str>,
    pub region: Option<&'a str>,
    pub theme: Option<&'a str>,
}

fn parse_switch(input: &str) -> Result<bool, String> {
    match input.to_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(format!("expected 'on' or 'off', got '{input}'")),
    }
}

pub fn run(state: &Path, changes: Changes<'_>) -> Result<(), String> {
    let mut settings = super::open_settings(state)?;

    // Validate everything before writing anything.
    let max_guesses = changes
        .max_guesses
        .map(parse_max_guesses)
        .transpose()
        .map_err(|e| e.to_string())?;
    let hints = changes.hints.map(parse_switch).transpose()?;
    let region = changes
        .region
        .map(Region::parse)
        .transpose()
        .map_err(|e| e.to_string())?;
    let theme = changes
        .theme
        .map(ThemePreference::parse)
        .transpose()
        .map_err(|e| e.to_string())?;

    if let Some(n) = max_guesses {
        settings.set_max_guesses(n).map_err(|e| e.to_string())?;
    }
    if let Some(enabled) = hints {
        settings
            .set_hints_enabled(enabled)
            .map_err(|e| e.to_string())?;
    }
    if let Some(region) = region {
        settings.set_region(region).map_err(|e| e.to_string())?;
    }
    if let Some(theme) = theme {
        settings.set_theme(theme).map_err(|e| e.to_string())?;
    }

    let effective = ThemeController::new(settings.theme(), false).effective();
    println!("{}", settings.settings());
    println!("             (showing {effective})");

    Ok(())
}
