//! The process-wide game context.
//!
//! `GameContext` is built once at startup and owns the roster store, the
//! settings store, the theme controller, and the engine. Every mutator
//! re-synchronizes the engine with the roster afterwards, so roster changes
//! (loads, region switches) are observed exactly once.

use tracing::{info, warn};

use kg_core::{Character, CharacterId, Region};
use kg_roster::{DataLayout, LoadRequest, RegionChange, RosterResult, RosterSource, RosterStore};
use kg_settings::{SettingsError, SettingsStore, Theme, ThemeController, ThemePreference};

use crate::config::GameConfig;
use crate::engine::{GameEngine, GuessOutcome};
use crate::error::{EngineError, EngineResult};

/// Number of name suggestions offered for an unknown guess.
const SUGGESTION_LIMIT: usize = 3;

/// Owns every component of a running game.
pub struct GameContext {
    source: Box<dyn RosterSource>,
    roster: RosterStore,
    settings: SettingsStore,
    theme: ThemeController,
    engine: GameEngine,
}

impl GameContext {
    /// Assemble a context. The roster is not fetched until
    /// [`load_roster`](Self::load_roster).
    pub fn new(
        source: Box<dyn RosterSource>,
        layout: DataLayout,
        settings: SettingsStore,
        config: GameConfig,
    ) -> Self {
        let roster = RosterStore::new(layout, settings.region());
        let theme = ThemeController::new(settings.theme(), false);
        Self {
            source,
            roster,
            settings,
            theme,
            engine: GameEngine::new(config),
        }
    }

    /// The roster store.
    pub fn roster(&self) -> &RosterStore {
        &self.roster
    }

    /// Mutable access to the roster store, e.g. to subscribe observers.
    pub fn roster_mut(&mut self) -> &mut RosterStore {
        &mut self.roster
    }

    /// The settings store.
    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// The theme controller.
    pub fn theme(&self) -> &ThemeController {
        &self.theme
    }

    /// The engine.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Guesses left in the current round.
    pub fn remaining_guesses(&self) -> u32 {
        self.engine.remaining_guesses(&self.settings)
    }

    /// Fetch the roster for the selected region (or retry after an error).
    ///
    /// Returns `false` when a load was already in flight.
    pub fn load_roster(&mut self) -> bool {
        let started = self.roster.load(self.source.as_ref());
        self.sync();
        started
    }

    /// Start a load whose document the caller fetches itself.
    ///
    /// Returns `None` when a load is already in flight.
    pub fn begin_load(&mut self) -> Option<LoadRequest> {
        let request = self.roster.begin_load();
        self.sync();
        request
    }

    /// Complete a load started with [`begin_load`](Self::begin_load).
    ///
    /// Superseded requests are discarded and `false` is returned.
    pub fn finish_load(&mut self, request: LoadRequest, fetched: RosterResult<String>) -> bool {
        let applied = self.roster.finish_load(request, fetched);
        self.sync();
        applied
    }

    /// Switch region, persist the choice, and restart the round.
    pub fn set_region(&mut self, region: Region) -> EngineResult<RegionChange> {
        let change = self.roster.set_region(region, self.source.as_ref());
        let saved = if change == RegionChange::Unchanged {
            Ok(())
        } else {
            self.settings.set_region(region)
        };
        self.sync();
        saved.map(|()| change).map_err(EngineError::from)
    }

    /// Switch region by code; unknown codes are rejected without changes.
    pub fn set_region_code(&mut self, code: &str) -> EngineResult<RegionChange> {
        let region = Region::parse(code).inspect_err(|e| warn!(error = %e, "rejected region"))?;
        self.set_region(region)
    }

    /// Start a new round with the available roster.
    pub fn start_new_game(&mut self) {
        self.engine
            .start_new_game(self.roster.available(), &mut self.settings);
    }

    /// Guess an available character by id.
    pub fn submit_guess_by_id(&mut self, id: CharacterId) -> EngineResult<GuessOutcome> {
        let guess = self
            .roster
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::UnknownCharacter {
                name: id.to_string(),
                suggestions: Vec::new(),
            })?;
        Ok(self.submit(&guess))
    }

    /// Guess an available character by display or given name.
    pub fn submit_guess_by_name(&mut self, name: &str) -> EngineResult<GuessOutcome> {
        let Some(guess) = self.roster.find_by_name(name).cloned() else {
            return Err(EngineError::UnknownCharacter {
                name: name.to_string(),
                suggestions: self.roster.suggest(name, SUGGESTION_LIMIT),
            });
        };
        Ok(self.submit(&guess))
    }

    /// Make `id` the target of a fresh round.
    #[doc(hidden)]
    pub fn force_target(&mut self, id: CharacterId) -> EngineResult<()> {
        let target = self
            .roster
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::UnknownCharacter {
                name: id.to_string(),
                suggestions: Vec::new(),
            })?;
        self.engine.force_target(target);
        Ok(())
    }

    /// Change the guess budget; a budget at or below the guesses already
    /// made ends the round as lost.
    pub fn set_max_guesses(&mut self, n: u32) -> EngineResult<()> {
        // Settings keep the new value even when persisting fails.
        let saved = self.settings.set_max_guesses(n);
        if !matches!(saved, Err(SettingsError::InvalidMaxGuesses(_))) {
            info!(max = n, "max guesses changed");
            self.engine.on_max_guesses_changed(&self.settings);
        }
        saved.map_err(EngineError::from)
    }

    /// Flip the hints setting and return the new value.
    pub fn toggle_hints(&mut self) -> EngineResult<bool> {
        let toggled = self.settings.toggle_hints();
        self.engine.on_hints_toggled(&self.settings);
        toggled.map_err(EngineError::from)
    }

    /// Change and persist the theme preference; returns the effective theme.
    pub fn set_theme(&mut self, preference: ThemePreference) -> EngineResult<Theme> {
        let saved = self.settings.set_theme(preference);
        self.theme.set_preference(preference);
        saved.map(|()| self.theme.effective()).map_err(EngineError::from)
    }

    fn submit(&mut self, guess: &Character) -> GuessOutcome {
        self.engine.submit_guess(guess, &mut self.settings)
    }

    fn sync(&mut self) {
        self.engine.on_roster_update(&self.roster, &mut self.settings);
    }
}
