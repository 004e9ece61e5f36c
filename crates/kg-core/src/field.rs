use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A character attribute read from the roster data.
///
/// Variant names match the JSON keys of the data files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    /// Academy the student belongs to.
    School,
    /// Initial star rating.
    StarGrade,
    /// Age, usually text such as `"15歳"`.
    CharacterAge,
    /// Tactical role (tank, healer, ...).
    TacticRole,
    /// Weapon category.
    WeaponType,
    /// Attack type.
    BulletType,
    /// Defense type.
    ArmorType,
    /// Height, usually text such as `"156cm"`.
    CharHeightMetric,
    /// Birthday.
    Birthday,
    /// Hobby.
    Hobby,
    /// Voice actor.
    CharacterVoice,
    /// Illustrator.
    Illustrator,
}

impl Field {
    /// Every known field.
    pub const ALL: [Field; 12] = [
        Field::School,
        Field::StarGrade,
        Field::CharacterAge,
        Field::TacticRole,
        Field::WeaponType,
        Field::BulletType,
        Field::ArmorType,
        Field::CharHeightMetric,
        Field::Birthday,
        Field::Hobby,
        Field::CharacterVoice,
        Field::Illustrator,
    ];

    /// Fields shown in the feedback table, in display order.
    pub const COMPARISON: [Field; 8] = [
        Field::School,
        Field::StarGrade,
        Field::CharacterAge,
        Field::TacticRole,
        Field::WeaponType,
        Field::BulletType,
        Field::ArmorType,
        Field::CharHeightMetric,
    ];

    /// Fields eligible for a one-off hint.
    pub const HINT: [Field; 4] = [
        Field::Birthday,
        Field::Hobby,
        Field::CharacterVoice,
        Field::Illustrator,
    ];

    /// The JSON key this field is read from.
    pub fn key(self) -> &'static str {
        match self {
            Self::School => "School",
            Self::StarGrade => "StarGrade",
            Self::CharacterAge => "CharacterAge",
            Self::TacticRole => "TacticRole",
            Self::WeaponType => "WeaponType",
            Self::BulletType => "BulletType",
            Self::ArmorType => "ArmorType",
            Self::CharHeightMetric => "CharHeightMetric",
            Self::Birthday => "Birthday",
            Self::Hobby => "Hobby",
            Self::CharacterVoice => "CharacterVoice",
            Self::Illustrator => "Illustrator",
        }
    }

    /// Column header / hint label.
    pub fn label(self) -> &'static str {
        match self {
            Self::School => "School",
            Self::StarGrade => "Star Grade",
            Self::CharacterAge => "Age",
            Self::TacticRole => "Role",
            Self::WeaponType => "Weapon",
            Self::BulletType => "Attack Type",
            Self::ArmorType => "Armor Type",
            Self::CharHeightMetric => "Height (cm)",
            Self::Birthday => "birthday",
            Self::Hobby => "hobby",
            Self::CharacterVoice => "voice actor",
            Self::Illustrator => "illustrator",
        }
    }

    /// Look up a field by JSON key (exact match).
    pub fn from_key(key: &str) -> CoreResult<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.key() == key)
            .ok_or_else(|| CoreError::UnknownField(key.to_string()))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
