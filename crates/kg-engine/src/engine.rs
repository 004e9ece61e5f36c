//! The round state machine.
//!
//! A round moves `Loading → Playing → Won | Lost`. `Error` is reachable from
//! loading or playing when the roster fails to load or has nobody available
//! in the selected region; switching region or reloading recovers from it.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use kg_core::Character;
use kg_roster::RosterStore;
use kg_settings::{SettingsResult, SettingsStore};

use crate::compare::{Feedback, compare_attributes};
use crate::config::GameConfig;
use crate::hint::{hint_trigger_turn, pick_hint};

/// Why the engine is in the error state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The selected region has no released characters.
    NoCharacters,
    /// The roster failed to load; carries the user-facing message.
    RosterUnavailable(String),
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCharacters => write!(f, "no characters are available on this server"),
            Self::RosterUnavailable(msg) => f.write_str(msg),
        }
    }
}

/// Status of the current round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameStatus {
    /// Waiting for the roster.
    Loading,
    /// Accepting guesses.
    Playing,
    /// The target was guessed.
    Won,
    /// The guess budget ran out.
    Lost,
    /// No round can be played.
    Error(Failure),
}

impl GameStatus {
    /// Whether the round has ended in a win or loss.
    pub fn is_over(&self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    /// Whether a round has been set up (playing or finished).
    pub fn is_playable(&self) -> bool {
        matches!(self, Self::Playing | Self::Won | Self::Lost)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::Playing => write!(f, "playing"),
            Self::Won => write!(f, "won"),
            Self::Lost => write!(f, "lost"),
            Self::Error(failure) => write!(f, "error: {failure}"),
        }
    }
}

/// A submitted guess and its feedback.
#[derive(Debug, Clone, PartialEq)]
pub struct GuessRecord {
    /// The guessed character.
    pub guess: Character,
    /// Feedback computed at submission time.
    pub feedback: Feedback,
}

/// Why a guess was not recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The round already ended.
    GameOver,
    /// No round is in progress.
    NoTarget,
    /// This character was already guessed this round.
    AlreadyGuessed,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GameOver => write!(f, "the round is over"),
            Self::NoTarget => write!(f, "no round in progress"),
            Self::AlreadyGuessed => write!(f, "already guessed"),
        }
    }
}

/// Result of [`GameEngine::submit_guess`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Nothing changed.
    Rejected(Rejection),
    /// The guess was the target; the round is won.
    Correct,
    /// The guess was wrong and the budget is spent; the round is lost.
    OutOfGuesses,
    /// The guess was wrong; play continues.
    Incorrect {
        /// Guesses left in the budget.
        remaining: u32,
        /// Whether this guess made the hint appear.
        hint_revealed: bool,
    },
}

/// Holds the active round.
#[derive(Debug)]
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
    status: GameStatus,
    target: Option<Character>,
    guesses: Vec<GuessRecord>,
    hint: Option<String>,
    seen_revision: Option<u64>,
}

impl GameEngine {
    /// Create an engine waiting for its first roster.
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            config,
            rng,
            status: GameStatus::Loading,
            target: None,
            guesses: Vec::new(),
            hint: None,
            seen_revision: None,
        }
    }

    /// Engine configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current status.
    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    /// Whether the round ended in a win or loss.
    pub fn is_game_over(&self) -> bool {
        self.status.is_over()
    }

    /// Guesses this round, most recent first.
    pub fn guesses(&self) -> &[GuessRecord] {
        &self.guesses
    }

    /// The hint, once disclosed.
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// The target, only after the round has ended.
    pub fn revealed_target(&self) -> Option<&Character> {
        if self.is_game_over() {
            self.target.as_ref()
        } else {
            None
        }
    }

    /// Guesses left in the budget.
    pub fn remaining_guesses(&self, settings: &SettingsStore) -> u32 {
        let used = u32::try_from(self.guesses.len()).unwrap_or(u32::MAX);
        settings.max_guesses().saturating_sub(used)
    }

    /// Number of guesses after which the hint becomes due.
    pub fn hint_trigger_turn(&self, settings: &SettingsStore) -> usize {
        hint_trigger_turn(settings.max_guesses(), self.config.hint_ratio)
    }

    /// Feedback table headers as `(key, label)` pairs.
    pub fn comparison_headers(&self) -> Vec<(&'static str, &'static str)> {
        self.config
            .fields
            .iter()
            .map(|cf| (cf.field.key(), cf.field.label()))
            .collect()
    }

    /// Pick a target uniformly from `available`.
    ///
    /// With nobody available the engine enters `Error(NoCharacters)` and
    /// `false` is returned.
    pub fn select_target(&mut self, available: &[Character]) -> bool {
        if available.is_empty() {
            warn!("cannot select a target: no characters available");
            self.target = None;
            self.status = GameStatus::Error(Failure::NoCharacters);
            return false;
        }
        let index = self.rng.random_range(0..available.len());
        let target = available[index].clone();
        debug!(id = %target.id, "target selected");
        self.target = Some(target);
        true
    }

    /// Start a new round.
    ///
    /// The round is counted in the statistics only when the previous status
    /// was playing, won, or lost.
    pub fn start_new_game(&mut self, available: &[Character], settings: &mut SettingsStore) {
        if self.status.is_playable() {
            persist(settings.record_game_start(), "total games");
        }

        self.guesses.clear();
        self.hint = None;
        if self.select_target(available) {
            self.status = GameStatus::Playing;
            info!(candidates = available.len(), "new round started");
        }
    }

    /// Use `target` for a fresh round instead of a random pick.
    #[doc(hidden)]
    pub fn force_target(&mut self, target: Character) {
        self.guesses.clear();
        self.hint = None;
        self.target = Some(target);
        self.status = GameStatus::Playing;
    }

    /// Evaluate a guess and advance the round.
    pub fn submit_guess(&mut self, guess: &Character, settings: &mut SettingsStore) -> GuessOutcome {
        if self.is_game_over() {
            return GuessOutcome::Rejected(Rejection::GameOver);
        }
        let Some(target) = self.target.as_ref().filter(|_| self.status == GameStatus::Playing)
        else {
            return GuessOutcome::Rejected(Rejection::NoTarget);
        };
        if self.guesses.iter().any(|r| r.guess.id == guess.id) {
            debug!(id = %guess.id, "ignoring repeated guess");
            return GuessOutcome::Rejected(Rejection::AlreadyGuessed);
        }

        let feedback = compare_attributes(guess, target, &self.config.fields);
        let correct = feedback.is_correct();
        self.guesses.insert(
            0,
            GuessRecord {
                guess: guess.clone(),
                feedback,
            },
        );

        if correct {
            self.status = GameStatus::Won;
            persist(settings.record_game_won(), "games won");
            info!(guesses = self.guesses.len(), "round won");
            return GuessOutcome::Correct;
        }

        if self.guesses.len() >= settings.max_guesses() as usize {
            self.status = GameStatus::Lost;
            info!(guesses = self.guesses.len(), "round lost");
            return GuessOutcome::OutOfGuesses;
        }

        let hint_revealed = self.check_and_show_hint(settings);
        GuessOutcome::Incorrect {
            remaining: self.remaining_guesses(settings),
            hint_revealed,
        }
    }

    /// Disclose the hint if it is due. Returns whether a hint was set.
    ///
    /// Nothing happens unless the round is in progress, hints are enabled,
    /// no hint has been shown this round, and enough guesses have been made.
    pub fn check_and_show_hint(&mut self, settings: &SettingsStore) -> bool {
        if self.status != GameStatus::Playing
            || !settings.hints_enabled()
            || self.hint.is_some()
            || self.guesses.len() < self.hint_trigger_turn(settings)
        {
            return false;
        }
        let Some(target) = self.target.as_ref() else {
            return false;
        };

        self.hint = pick_hint(
            target,
            &self.config.hint_fields,
            &self.config.fields,
            &mut self.rng,
        );
        if self.hint.is_some() {
            debug!("hint disclosed");
        }
        self.hint.is_some()
    }

    /// React to a roster change. Returns whether the engine acted.
    ///
    /// Each roster revision is handled once. While the roster is loading the
    /// round is left alone; once it settles the round is restarted, or the
    /// engine enters the error state when nothing can be played.
    pub fn on_roster_update(&mut self, roster: &RosterStore, settings: &mut SettingsStore) -> bool {
        let revision = roster.revision();
        if revision == 0 || roster.is_loading() || self.seen_revision == Some(revision) {
            return false;
        }
        self.seen_revision = Some(revision);

        if let Some(message) = roster.error() {
            warn!(error = message, "roster unavailable");
            self.clear_round();
            self.status = GameStatus::Error(Failure::RosterUnavailable(message.to_string()));
            return true;
        }

        // An empty region still counts the abandoned round before landing
        // in `Error(NoCharacters)`.
        if roster.available().is_empty() {
            warn!(region = %roster.region(), "no characters released in region");
        }
        self.start_new_game(roster.available(), settings);
        true
    }

    /// Re-check the loss condition after the budget changed.
    pub fn on_max_guesses_changed(&mut self, settings: &SettingsStore) {
        if self.status == GameStatus::Playing
            && self.guesses.len() >= settings.max_guesses() as usize
        {
            info!(max = settings.max_guesses(), "budget lowered below guesses made; round lost");
            self.status = GameStatus::Lost;
        }
    }

    /// Apply a hints toggle: disabling hides the hint, enabling may show it.
    pub fn on_hints_toggled(&mut self, settings: &SettingsStore) {
        if settings.hints_enabled() {
            self.check_and_show_hint(settings);
        } else {
            self.hint = None;
        }
    }

    fn clear_round(&mut self) {
        self.target = None;
        self.guesses.clear();
        self.hint = None;
    }
}

fn persist(result: SettingsResult<()>, what: &str) {
    if let Err(e) = result {
        warn!(error = %e, "failed to persist {what}");
    }
}
