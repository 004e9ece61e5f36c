//! Hint timing and selection.

use rand::Rng;
use rand::rngs::StdRng;

use kg_core::{Character, Field};

use crate::compare::ComparisonField;

/// Number of guesses after which the hint becomes due.
pub fn hint_trigger_turn(max_guesses: u32, ratio: f64) -> usize {
    (f64::from(max_guesses) * ratio).ceil() as usize
}

/// Hint fields with a non-empty value on the target, excluding any field
/// already shown in the feedback table.
pub fn hint_candidates(
    target: &Character,
    hint_fields: &[Field],
    compared: &[ComparisonField],
) -> Vec<Field> {
    hint_fields
        .iter()
        .copied()
        .filter(|f| !compared.iter().any(|cf| cf.field == *f))
        .filter(|f| target.get(*f).is_some_and(|v| !v.is_empty()))
        .collect()
}

/// Pick one candidate uniformly at random and render the hint text.
pub fn pick_hint(
    target: &Character,
    hint_fields: &[Field],
    compared: &[ComparisonField],
    rng: &mut StdRng,
) -> Option<String> {
    let candidates = hint_candidates(target, hint_fields, compared);
    if candidates.is_empty() {
        return None;
    }
    let field = candidates[rng.random_range(0..candidates.len())];
    let value = target.get(field)?;
    Some(format!("Hint: this student's {} is {value}", field.label()))
}
