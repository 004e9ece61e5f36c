//! Line-oriented game console used by `kg play`.

use kg_engine::{EngineError, Failure, GameContext, GameStatus, GuessOutcome};
use kg_settings::{ThemePreference, parse_max_guesses};

/// Wraps a game context and turns player input into responses.
pub struct Console {
    ctx: GameContext,
}

impl Console {
    pub fn new(ctx: GameContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &GameContext {
        &self.ctx
    }

    /// Process a line of input and return the text to show.
    pub fn process(&mut self, input: &str) -> Result<String, String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();
        let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

        match cmd.as_str() {
            "guess" | "g" => self.do_guess(rest),
            "new" => self.do_new(),
            "status" => Ok(self.status_text()),
            "history" => Ok(self.do_history()),
            "max" => self.do_max(rest),
            "hints" => self.do_hints(),
            "region" | "server" => self.do_region(rest),
            "theme" => self.do_theme(rest),
            "fields" => Ok(self.do_fields()),
            "reload" => Ok(self.do_reload()),
            "help" => Ok(HELP.to_string()),
            "quit" | "q" => Ok("Goodbye!".to_string()),
            _ => self.do_guess(trimmed),
        }
    }

    fn do_guess(&mut self, name: &str) -> Result<String, String> {
        if name.is_empty() {
            return Err("usage: guess <student name>".to_string());
        }

        let outcome = match self.ctx.submit_guess_by_name(name) {
            Ok(outcome) => outcome,
            Err(EngineError::UnknownCharacter { name, suggestions }) => {
                let mut msg = format!("No available student named '{name}'.");
                if !suggestions.is_empty() {
                    msg.push_str(&format!(" Did you mean: {}?", suggestions.join(", ")));
                }
                return Err(msg);
            }
            Err(e) => return Err(e.to_string()),
        };

        let engine = self.ctx.engine();
        if let GuessOutcome::Rejected(reason) = outcome {
            return Err(format!("Guess ignored: {reason}."));
        }

        let mut out = crate::render::guess_table(engine, &engine.guesses()[..1]).to_string();
        out.push('\n');

        match outcome {
            GuessOutcome::Correct => {
                let name = engine
                    .revealed_target()
                    .map(|c| c.display_name())
                    .unwrap_or_default();
                out.push_str(&format!(
                    "Correct! It was {name}. Solved in {} guesses.\nType 'new' to play again.",
                    engine.guesses().len()
                ));
            }
            GuessOutcome::OutOfGuesses => {
                let name = engine
                    .revealed_target()
                    .map(|c| c.display_name())
                    .unwrap_or_default();
                out.push_str(&format!(
                    "Out of guesses! The answer was {name}.\nType 'new' to play again."
                ));
            }
            GuessOutcome::Incorrect {
                remaining,
                hint_revealed,
            } => {
                out.push_str(&format!("Not quite. {remaining} guesses left."));
                if hint_revealed && let Some(hint) = engine.hint() {
                    out.push_str(&format!("\n{hint}"));
                }
            }
            GuessOutcome::Rejected(_) => {}
        }

        Ok(out)
    }

    fn do_new(&mut self) -> Result<String, String> {
        self.ctx.start_new_game();
        match self.ctx.engine().status() {
            GameStatus::Playing => Ok(format!(
                "New round! {} students on {}. You have {} guesses.",
                self.ctx.roster().available().len(),
                self.ctx.roster().region().code().to_uppercase(),
                self.ctx.remaining_guesses()
            )),
            other => Err(format!("Cannot start a round: {other}")),
        }
    }

    fn do_history(&self) -> String {
        let engine = self.ctx.engine();
        if engine.guesses().is_empty() {
            return "No guesses yet.".to_string();
        }
        crate::render::guess_table(engine, engine.guesses()).to_string()
    }

    fn do_max(&mut self, rest: &str) -> Result<String, String> {
        let n = parse_max_guesses(rest).map_err(|e| e.to_string())?;
        self.ctx.set_max_guesses(n).map_err(|e| e.to_string())?;
        let mut out = format!("Max guesses set to {n}.");
        if self.ctx.engine().status() == &GameStatus::Lost {
            out.push_str(" You have already used that many guesses; the round is lost.");
        }
        Ok(out)
    }

    fn do_hints(&mut self) -> Result<String, String> {
        let enabled = self.ctx.toggle_hints().map_err(|e| e.to_string())?;
        let mut out = format!("Hints {}.", if enabled { "enabled" } else { "disabled" });
        if let Some(hint) = self.ctx.engine().hint() {
            out.push_str(&format!("\n{hint}"));
        }
        Ok(out)
    }

    fn do_region(&mut self, rest: &str) -> Result<String, String> {
        if rest.is_empty() {
            return Ok(format!(
                "Server: {}",
                self.ctx.roster().region().code().to_uppercase()
            ));
        }
        self.ctx.set_region_code(rest).map_err(|e| e.to_string())?;
        Ok(self.status_text())
    }

    fn do_theme(&mut self, rest: &str) -> Result<String, String> {
        if rest.is_empty() {
            let theme = self.ctx.theme();
            return Ok(format!(
                "Theme: {} (showing {})",
                theme.preference(),
                theme.effective()
            ));
        }
        let preference = ThemePreference::parse(rest).map_err(|e| e.to_string())?;
        let effective = self.ctx.set_theme(preference).map_err(|e| e.to_string())?;
        Ok(format!("Theme set to {preference} (showing {effective})."))
    }

    fn do_fields(&self) -> String {
        let mut out = String::from("Compared fields:\n");
        for (key, label) in self.ctx.engine().comparison_headers() {
            out.push_str(&format!("  {label} ({key})\n"));
        }
        out.trim_end().to_string()
    }

    fn do_reload(&mut self) -> String {
        if !self.ctx.load_roster() {
            return "A load is already in progress.".to_string();
        }
        self.status_text()
    }

    /// Summary of the round and settings.
    pub fn status_text(&self) -> String {
        let engine = self.ctx.engine();
        let settings = self.ctx.settings();
        let server = self.ctx.roster().region().code().to_uppercase();

        let mut out = match engine.status() {
            GameStatus::Loading => "Loading roster...".to_string(),
            GameStatus::Playing => format!(
                "Playing on {server}: {} students. Guesses: {}/{} ({} left).",
                self.ctx.roster().available().len(),
                engine.guesses().len(),
                settings.max_guesses(),
                self.ctx.remaining_guesses()
            ),
            GameStatus::Won => "Round won. Type 'new' to play again.".to_string(),
            GameStatus::Lost => "Round lost. Type 'new' to play again.".to_string(),
            GameStatus::Error(Failure::NoCharacters) => format!(
                "No students are released on {server}. Switch server with 'region <jp|gl|cn>'."
            ),
            GameStatus::Error(Failure::RosterUnavailable(msg)) => {
                format!("{msg}\nType 'reload' to try again.")
            }
        };

        out.push_str(&format!(
            "\nHints: {} | Games: {} | Won: {}",
            if settings.hints_enabled() { "on" } else { "off" },
            settings.total_games(),
            settings.games_won()
        ));
        if let Some(hint) = engine.hint() {
            out.push_str(&format!("\n{hint}"));
        }
        out
    }
}

const HELP: &str = "\
Commands:
  guess <name>        Guess a student (or just type the name)
  new                 Start a new round
  status              Show the round and settings
  history             Show all guesses this round
  max <1-20>          Set the guess budget
  hints               Toggle hints
  region <jp|gl|cn>   Switch server (starts a new round)
  theme <pref>        Set theme: light, dark, auto, system
  fields              List compared fields
  reload              Reload roster data
  help                Show this help
  quit                Exit";
