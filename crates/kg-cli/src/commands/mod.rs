pub mod check;
pub mod play;
pub mod roster;
pub mod settings;
pub mod stats;

use std::path::Path;

use kg_roster::DataLayout;
use kg_settings::{JsonFileStore, SettingsStore};

/// Default settings file, relative to the working directory.
pub const DEFAULT_STATE_FILE: &str = ".kg-state.json";

/// Open the settings file, creating it lazily on first write.
fn open_settings(path: &Path) -> Result<SettingsStore, String> {
    let store = JsonFileStore::open(path)
        .map_err(|e| format!("cannot open settings file {}: {e}", path.display()))?;
    Ok(SettingsStore::load(Box::new(store)))
}

/// Pick the data layout from the `--unified` flag.
fn layout(unified: Option<String>) -> DataLayout {
    match unified {
        Some(path) => DataLayout::unified(path),
        None => DataLayout::per_region(),
    }
}
