//! Event ingest
//!
//! Decodes Wyscout-style event JSON into canonical [`Event`] values. This is
//! the only place raw identifiers are interpreted: anything that is not a
//! non-negative integer is rejected as `MalformedInput` instead of coerced.
//!
//! Expected record shape:
//!
//! ```json
//! {"matchId": 2575959, "teamId": 3158, "playerId": 25413,
//!  "eventName": "Pass", "tags": [{"id": 1801}], "ordinal": 17}
//! ```
//!
//! `tags` may be absent (no tags). `ordinal` may be absent, in which case the
//! record's position in the array is used.

use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::errors::{PassnetError, Result};
use crate::shared::models::{Event, EventKind, MatchId, PlayerId, TeamId};

/// Decode a JSON array of event records
pub fn decode_events(json: &str) -> Result<Vec<Event>> {
    let value: Value = serde_json::from_str(json)?;
    decode_value(&value)
}

/// Decode events from any reader (file, stdin)
pub fn decode_reader(reader: impl Read) -> Result<Vec<Event>> {
    let value: Value = serde_json::from_reader(reader)?;
    decode_value(&value)
}

/// Load an events file
pub fn load_events(path: impl AsRef<Path>) -> Result<Vec<Event>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let events = decode_reader(std::io::BufReader::new(file))?;
    info!("Loaded {} events from {}", events.len(), path.display());
    Ok(events)
}

fn decode_value(value: &Value) -> Result<Vec<Event>> {
    let records = value
        .as_array()
        .ok_or_else(|| PassnetError::malformed("expected a JSON array of event records"))?;

    records
        .iter()
        .enumerate()
        .map(|(index, record)| decode_record(index, record))
        .collect()
}

fn decode_record(index: usize, record: &Value) -> Result<Event> {
    let object = record.as_object().ok_or_else(|| {
        PassnetError::malformed(format!("record {}: expected an object", index))
    })?;

    let match_id = MatchId(id_field(index, object, "matchId")?);
    let team_id = TeamId(id_field(index, object, "teamId")?);
    let player_id = PlayerId(id_field(index, object, "playerId")?);

    let event_name = match object.get("eventName") {
        Some(Value::String(name)) => name.as_str(),
        Some(other) => {
            return Err(PassnetError::malformed(format!(
                "record {}: field 'eventName' must be a string, got {}",
                index,
                type_name(other)
            )))
        }
        None => {
            return Err(PassnetError::malformed(format!(
                "record {}: missing field 'eventName'",
                index
            )))
        }
    };

    let ordinal = match object.get("ordinal") {
        None | Some(Value::Null) => index as u64,
        Some(_) => id_field(index, object, "ordinal")?,
    };

    let tags = decode_tags(index, object)?;

    Ok(Event {
        match_id,
        team_id,
        player_id,
        kind: EventKind::from_name(event_name),
        ordinal,
        tags,
    })
}

fn decode_tags(index: usize, object: &Map<String, Value>) -> Result<BTreeSet<u32>> {
    let tags = match object.get("tags") {
        None | Some(Value::Null) => return Ok(BTreeSet::new()),
        Some(Value::Array(tags)) => tags,
        Some(other) => {
            return Err(PassnetError::malformed(format!(
                "record {}: field 'tags' must be an array, got {}",
                index,
                type_name(other)
            )))
        }
    };

    tags.iter()
        .enumerate()
        .map(|(position, tag)| {
            tag.get("id")
                .and_then(Value::as_u64)
                .and_then(|id| u32::try_from(id).ok())
                .ok_or_else(|| {
                    PassnetError::malformed(format!(
                        "record {}: tag {} must be an object with an integer 'id'",
                        index, position
                    ))
                })
        })
        .collect()
}

/// Read a non-negative integer id. Strings, floats and negatives are errors.
fn id_field(index: usize, object: &Map<String, Value>, field: &str) -> Result<u64> {
    match object.get(field) {
        Some(Value::Number(number)) => number.as_u64().ok_or_else(|| {
            PassnetError::malformed(format!(
                "record {}: field '{}' must be a non-negative integer, got {}",
                index, field, number
            ))
        }),
        Some(other) => Err(PassnetError::malformed(format!(
            "record {}: field '{}' must be a non-negative integer, got {}",
            index,
            field,
            type_name(other)
        ))),
        None => Err(PassnetError::malformed(format!(
            "record {}: missing field '{}'",
            index, field
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
