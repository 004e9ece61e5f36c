//! Game engine for Kivotos Guessr.
//!
//! Holds the round state machine (`Loading → Playing → Won | Lost`, with an
//! absorbing `Error` state), evaluates guesses attribute by attribute,
//! schedules the one-off hint, and keeps the round in step with the roster
//! through [`GameContext`].

pub mod compare;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod hint;

pub use compare::{CompareKind, ComparisonField, Feedback, Verdict, compare_attributes};
pub use config::GameConfig;
pub use context::GameContext;
pub use engine::{Failure, GameEngine, GameStatus, GuessOutcome, GuessRecord, Rejection};
pub use error::{EngineError, EngineResult};
