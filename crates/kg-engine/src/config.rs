//! Configuration for a game engine.

use kg_core::Field;

use crate::compare::ComparisonField;

/// Share of the guess budget after which a hint is disclosed.
pub const DEFAULT_HINT_RATIO: f64 = 0.5;

/// Configuration for a [`GameEngine`](crate::GameEngine).
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// RNG seed for reproducible target and hint selection; random when `None`.
    pub seed: Option<u64>,
    /// Feedback table columns.
    pub fields: Vec<ComparisonField>,
    /// Attributes eligible for the hint.
    pub hint_fields: Vec<Field>,
    /// Share of the guess budget after which the hint is shown.
    pub hint_ratio: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            fields: ComparisonField::defaults(),
            hint_fields: Field::HINT.to_vec(),
            hint_ratio: DEFAULT_HINT_RATIO,
        }
    }
}

impl GameConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the feedback table columns.
    pub fn with_fields(mut self, fields: Vec<ComparisonField>) -> Self {
        self.fields = fields;
        self
    }

    /// Replace the hint-eligible attributes.
    pub fn with_hint_fields(mut self, hint_fields: Vec<Field>) -> Self {
        self.hint_fields = hint_fields;
        self
    }

    /// Set the hint ratio (clamped to 0.0-1.0).
    pub fn with_hint_ratio(mut self, ratio: f64) -> Self {
        self.hint_ratio = ratio.clamp(0.0, 1.0);
        self
    }
}
