//! Normalization of roster documents into characters.
//!
//! Two shapes are accepted: an object mapping ids to records, or an array of
//! records. Every record is schema-checked; one bad record fails the whole
//! document so the game never runs on partial data.

use serde_json::{Map, Value};

use kg_core::{AttrValue, Character, Field, REGION_COUNT};

use crate::error::{RosterError, RosterResult};

/// Parse a roster document into characters.
///
/// Mapping documents take the character id from the key (falling back to the
/// record's own `Id` when the key is not numeric) and are returned in
/// ascending id order. Array documents keep their order and require an `Id`
/// on every record.
pub fn parse_roster(text: &str) -> RosterResult<Vec<Character>> {
    let doc: Value = serde_json::from_str(text)?;
    match doc {
        Value::Object(map) => {
            let mut characters = map
                .iter()
                .map(|(key, record)| parse_record(key, Some(key), record))
                .collect::<RosterResult<Vec<_>>>()?;
            characters.sort_by_key(|c| c.id);
            Ok(characters)
        }
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, record)| parse_record(&format!("#{i}"), None, record))
            .collect(),
        _ => Err(RosterError::Shape),
    }
}

fn parse_record(label: &str, key: Option<&str>, record: &Value) -> RosterResult<Character> {
    let fail = |reason: &str| RosterError::Integrity {
        record: label.to_string(),
        reason: reason.to_string(),
    };

    let obj = record.as_object().ok_or_else(|| fail("not an object"))?;

    let id = key
        .and_then(|k| k.trim().parse::<u32>().ok())
        .or_else(|| record_id(obj))
        .ok_or_else(|| fail("missing numeric Id"))?;

    let name = obj
        .get("Name")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| fail("missing Name"))?;

    let released = release_flags(obj).ok_or_else(|| {
        fail(&format!(
            "IsReleased must be an array of {REGION_COUNT} booleans"
        ))
    })?;

    let mut character = Character::new(id, name).with_released(released);
    character.family_name = obj
        .get("FamilyName")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    for field in Field::ALL {
        if let Some(value) = obj.get(field.key()).and_then(AttrValue::from_json) {
            character.attributes.insert(field, value);
        }
    }

    Ok(character)
}

fn record_id(obj: &Map<String, Value>) -> Option<u32> {
    obj.get("Id")
        .or_else(|| obj.get("id"))
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
}

fn release_flags(obj: &Map<String, Value>) -> Option<[bool; REGION_COUNT]> {
    let items = obj.get("IsReleased")?.as_array()?;
    if items.len() != REGION_COUNT {
        return None;
    }
    let mut flags = [false; REGION_COUNT];
    for (slot, item) in flags.iter_mut().zip(items) {
        *slot = item.as_bool()?;
    }
    Some(flags)
}
