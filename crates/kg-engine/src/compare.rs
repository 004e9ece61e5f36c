//! Attribute-by-attribute guess evaluation.

use std::fmt;

use serde::Serialize;

use kg_core::{AttrValue, Character, Field};

/// How a field is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareKind {
    /// Any mismatch is incorrect.
    Exact,
    /// A mismatch within `threshold` is close.
    Numeric {
        /// Largest absolute difference still counted as close.
        threshold: u32,
    },
}

/// A column of the feedback table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonField {
    /// The attribute compared.
    pub field: Field,
    /// How it is compared.
    pub kind: CompareKind,
}

impl ComparisonField {
    /// An exact-match column.
    pub fn exact(field: Field) -> Self {
        Self {
            field,
            kind: CompareKind::Exact,
        }
    }

    /// A numeric column with a closeness threshold.
    pub fn numeric(field: Field, threshold: u32) -> Self {
        Self {
            field,
            kind: CompareKind::Numeric { threshold },
        }
    }

    /// The standard feedback table.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::exact(Field::School),
            Self::numeric(Field::StarGrade, 1),
            Self::numeric(Field::CharacterAge, 1),
            Self::exact(Field::TacticRole),
            Self::exact(Field::WeaponType),
            Self::exact(Field::BulletType),
            Self::exact(Field::ArmorType),
            Self::numeric(Field::CharHeightMetric, 5),
        ]
    }
}

/// Result for one field of one guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Values are equal.
    Correct,
    /// Numeric values differ by no more than the threshold.
    Close,
    /// Values differ, or one side has no value.
    Incorrect,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Correct => write!(f, "correct"),
            Self::Close => write!(f, "close"),
            Self::Incorrect => write!(f, "incorrect"),
        }
    }
}

/// Per-field verdicts for a guess, plus whether it was the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    verdicts: Vec<(Field, Verdict)>,
    correct: bool,
}

impl Feedback {
    /// Verdicts in column order.
    pub fn verdicts(&self) -> &[(Field, Verdict)] {
        &self.verdicts
    }

    /// Verdict for one field.
    pub fn get(&self, field: Field) -> Option<Verdict> {
        self.verdicts
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| *v)
    }

    /// Whether the guessed character is the target.
    pub fn is_correct(&self) -> bool {
        self.correct
    }
}

/// Compare a guess against the target over the given columns.
///
/// The overall flag is id equality only; a different character matching
/// every column is still not correct.
pub fn compare_attributes(
    guess: &Character,
    target: &Character,
    fields: &[ComparisonField],
) -> Feedback {
    let verdicts = fields
        .iter()
        .map(|cf| {
            let verdict = classify(cf.kind, guess.get(cf.field), target.get(cf.field));
            (cf.field, verdict)
        })
        .collect();

    Feedback {
        verdicts,
        correct: guess.id == target.id,
    }
}

fn classify(kind: CompareKind, guess: Option<&AttrValue>, target: Option<&AttrValue>) -> Verdict {
    let (Some(g), Some(t)) = (guess, target) else {
        return Verdict::Incorrect;
    };

    if g == t {
        return Verdict::Correct;
    }

    match kind {
        CompareKind::Numeric { threshold } => match (g.as_number(), t.as_number()) {
            (Some(a), Some(b)) if (a - b).abs() <= f64::from(threshold) => Verdict::Close,
            _ => Verdict::Incorrect,
        },
        CompareKind::Exact => Verdict::Incorrect,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn abydos() -> Character {
        Character::new(1, "Hoshino")
            .with_attr(Field::School, "Abydos")
            .with_attr(Field::StarGrade, 3_i64)
            .with_attr(Field::CharacterAge, "17歳")
            .with_attr(Field::CharHeightMetric, "145cm")
    }

    fn trinity() -> Character {
        Character::new(2, "Mika")
            .with_attr(Field::School, "Trinity")
            .with_attr(Field::StarGrade, 4_i64)
            .with_attr(Field::CharacterAge, "16歳")
            .with_attr(Field::CharHeightMetric, "158cm")
    }

    #[test]
    fn star_grade_close_school_incorrect() {
        let fb = compare_attributes(&trinity(), &abydos(), &ComparisonField::defaults());
        assert_eq!(fb.get(Field::StarGrade), Some(Verdict::Close));
        assert_eq!(fb.get(Field::School), Some(Verdict::Incorrect));
        assert_eq!(fb.get(Field::CharacterAge), Some(Verdict::Close));
        assert_eq!(fb.get(Field::CharHeightMetric), Some(Verdict::Incorrect));
        assert!(!fb.is_correct());
    }

    #[test]
    fn same_character_is_correct_everywhere_present() {
        let fb = compare_attributes(&abydos(), &abydos(), &ComparisonField::defaults());
        assert!(fb.is_correct());
        assert_eq!(fb.get(Field::School), Some(Verdict::Correct));
        // Absent on both sides still counts as incorrect.
        assert_eq!(fb.get(Field::WeaponType), Some(Verdict::Incorrect));
    }

    #[test]
    fn lookalike_is_not_correct() {
        let twin = Character {
            id: kg_core::CharacterId(99),
            ..abydos()
        };
        let fb = compare_attributes(&twin, &abydos(), &ComparisonField::defaults());
        assert_eq!(fb.get(Field::School), Some(Verdict::Correct));
        assert!(!fb.is_correct());
    }

    #[test]
    fn exact_field_gets_no_partial_credit() {
        let a = Character::new(1, "A").with_attr(Field::ArmorType, "LightArmor");
        let b = Character::new(2, "B").with_attr(Field::ArmorType, "HeavyArmor");
        let fb = compare_attributes(&a, &b, &[ComparisonField::exact(Field::ArmorType)]);
        assert_eq!(fb.get(Field::ArmorType), Some(Verdict::Incorrect));
    }

    #[test]
    fn unreadable_numbers_are_incorrect() {
        let a = Character::new(1, "A").with_attr(Field::CharacterAge, "不明");
        let b = Character::new(2, "B").with_attr(Field::CharacterAge, "16歳");
        let fb = compare_attributes(&a, &b, &[ComparisonField::numeric(Field::CharacterAge, 1)]);
        assert_eq!(fb.get(Field::CharacterAge), Some(Verdict::Incorrect));
    }

    #[test]
    fn verdicts_follow_column_order() {
        let fb = compare_attributes(&abydos(), &trinity(), &ComparisonField::defaults());
        let order: Vec<Field> = fb.verdicts().iter().map(|(f, _)| *f).collect();
        assert_eq!(order, Field::COMPARISON.to_vec());
    }

    #[test]
    fn verdict_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Verdict::Close).unwrap(), "\"close\"");
    }

    proptest! {
        #[test]
        fn close_iff_within_threshold(g in 0i64..200, t in 0i64..200, th in 0u32..10) {
            let a = Character::new(1, "A").with_attr(Field::CharHeightMetric, g);
            let b = Character::new(2, "B").with_attr(Field::CharHeightMetric, t);
            let fb = compare_attributes(&a, &b, &[ComparisonField::numeric(Field::CharHeightMetric, th)]);
            let expected = if g == t {
                Verdict::Correct
            } else if (g - t).unsigned_abs() <= u64::from(th) {
                Verdict::Close
            } else {
                Verdict::Incorrect
            };
            prop_assert_eq!(fb.get(Field::CharHeightMetric), Some(expected));
        }

        #[test]
        fn equality_is_symmetric(g in 0i64..10, t in 0i64..10) {
            let a = Character::new(1, "A").with_attr(Field::StarGrade, g);
            let b = Character::new(2, "B").with_attr(Field::StarGrade, t);
            let fields = [ComparisonField::numeric(Field::StarGrade, 1)];
            let ab = compare_attributes(&a, &b, &fields).get(Field::StarGrade);
            let ba = compare_attributes(&b, &a, &fields).get(Field::StarGrade);
            prop_assert_eq!(ab == Some(Verdict::Correct), ba == Some(Verdict::Correct));
        }

        #[test]
        fn missing_side_is_always_incorrect(v in 0i64..100, missing_guess in any::<bool>()) {
            let present = Character::new(1, "A").with_attr(Field::StarGrade, v);
            let absent = Character::new(2, "B");
            let (g, t) = if missing_guess { (&absent, &present) } else { (&present, &absent) };
            let fb = compare_attributes(g, t, &[ComparisonField::numeric(Field::StarGrade, 100)]);
            prop_assert_eq!(fb.get(Field::StarGrade), Some(Verdict::Incorrect));
        }
    }
}
