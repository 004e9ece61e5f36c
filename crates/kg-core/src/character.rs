use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::region::{REGION_COUNT, Region};

/// Characters displayed by given name alone rather than family + given name.
const GIVEN_NAME_ONLY: [&str; 4] = ["初音未来", "佐天泪子", "御坂美琴", "食蜂操祈"];

/// Stable numeric identifier of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub u32);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single attribute value as it appears in the data files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// A JSON number.
    Number(f64),
    /// A JSON string.
    Text(String),
}

impl AttrValue {
    /// Convert a JSON value. `null`, arrays, and objects yield `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_f64().map(Self::Number),
            serde_json::Value::String(s) => Some(Self::Text(s.clone())),
            serde_json::Value::Bool(b) => Some(Self::Text(b.to_string())),
            _ => None,
        }
    }

    /// Numeric reading of the value.
    ///
    /// Text values yield the first run of ASCII digits, so `"156cm"` reads
    /// as 156 and `"15歳"` as 15. Text without digits yields `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => {
                let start = s.find(|c: char| c.is_ascii_digit())?;
                let digits: String = s[start..]
                    .chars()
                    .take_while(|c| c.is_ascii_digit())
                    .collect();
                digits.parse::<f64>().ok()
            }
        }
    }

    /// Whether the value is an empty or whitespace-only string.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for AttrValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<u32> for AttrValue {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<f64> for AttrValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// A guessable character from the roster.
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    /// Stable identifier.
    pub id: CharacterId,
    /// Given name.
    pub name: String,
    /// Family name, if the data provides one.
    pub family_name: Option<String>,
    /// Release flags in `[Jp, Gl, Cn]` order.
    pub released: [bool; REGION_COUNT],
    /// Attribute values; absent keys mean the data had no value.
    pub attributes: BTreeMap<Field, AttrValue>,
}

impl Character {
    /// Create a character released in every region with no attributes.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: CharacterId(id),
            name: name.into(),
            family_name: None,
            released: [true; REGION_COUNT],
            attributes: BTreeMap::new(),
        }
    }

    /// Set the family name.
    pub fn with_family_name(mut self, family_name: impl Into<String>) -> Self {
        self.family_name = Some(family_name.into());
        self
    }

    /// Set the release flags.
    pub fn with_released(mut self, released: [bool; REGION_COUNT]) -> Self {
        self.released = released;
        self
    }

    /// Set an attribute value.
    pub fn with_attr(mut self, field: Field, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(field, value.into());
        self
    }

    /// Get an attribute value.
    pub fn get(&self, field: Field) -> Option<&AttrValue> {
        self.attributes.get(&field)
    }

    /// Whether the character is available on the given server.
    pub fn is_released_in(&self, region: Region) -> bool {
        self.released[region.index()]
    }

    /// Name as shown to the player: family name followed by given name,
    /// except for the few guests known by given name alone.
    pub fn display_name(&self) -> String {
        match &self.family_name {
            Some(family) if !GIVEN_NAME_ONLY.contains(&self.name.as_str()) => {
                format!("{family}{}", self.name)
            }
            _ => self.name.clone(),
        }
    }
}
