//! Raw event payload decoding
//!
//! The event source delivers JSON payloads in one of two shapes: a full
//! zone list under `zones` / `zones_added` / `zones_changed`, or a list of
//! seek positions under `zones_seek_changed`. Anything else is malformed
//! and dropped by the caller.

use serde_json::Value;

use crate::error::DecodeError;
use crate::model::{SeekUpdate, Zone};

/// A decoded inbound event
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneEvent {
    /// Full replacement of known zone state
    Snapshot(Vec<Zone>),
    /// Playback-position-only update
    Seek(Vec<SeekUpdate>),
}

/// Payload keys that carry a full zone list
const SNAPSHOT_KEYS: [&str; 3] = ["zones", "zones_added", "zones_changed"];

/// Key that carries seek-only updates
const SEEK_KEY: &str = "zones_seek_changed";

/// Decode a raw payload into a [`ZoneEvent`]
///
/// Snapshot keys are checked first, matching the precedence the player
/// uses when a message carries several of them.
pub fn decode_zone_event(payload: &Value) -> Result<ZoneEvent, DecodeError> {
    for key in SNAPSHOT_KEYS {
        if let Some(list) = payload.get(key) {
            let zones: Vec<Zone> =
                serde_json::from_value(list.clone()).map_err(|source| DecodeError::Deserialize {
                    shape: "zone snapshot",
                    source,
                })?;
            return Ok(ZoneEvent::Snapshot(zones));
        }
    }

    if let Some(list) = payload.get(SEEK_KEY) {
        let updates: Vec<SeekUpdate> =
            serde_json::from_value(list.clone()).map_err(|source| DecodeError::Deserialize {
                shape: "seek update",
                source,
            })?;
        return Ok(ZoneEvent::Seek(updates));
    }

    Err(DecodeError::MalformedEvent(summarize(payload)))
}

/// Short payload description for the malformed-event log line
fn summarize(payload: &Value) -> String {
    match payload {
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            format!("object with keys [{}]", keys.join(", "))
        }
        other => format!("non-object payload ({})", value_kind(other)),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ZoneId;
    use serde_json::json;

    fn office_zone() -> Value {
        json!({
            "zone_id": "z-office",
            "display_name": "Office",
            "state": "playing"
        })
    }

    #[test]
    fn test_decode_snapshot() {
        let payload = json!({ "zones": [office_zone()] });
        match decode_zone_event(&payload).unwrap() {
            ZoneEvent::Snapshot(zones) => {
                assert_eq!(zones.len(), 1);
                assert_eq!(zones[0].display_name, "Office");
            }
            other => panic!("expected snapshot, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_added_and_changed_variants() {
        for key in ["zones_added", "zones_changed"] {
            let payload = json!({ key: [office_zone()] });
            assert!(matches!(
                decode_zone_event(&payload).unwrap(),
                ZoneEvent::Snapshot(_)
            ));
        }
    }

    #[test]
    fn test_decode_seek() {
        let payload = json!({
            "zones_seek_changed": [
                { "zone_id": "z-office", "seek_position_seconds": 73 }
            ]
        });
        match decode_zone_event(&payload).unwrap() {
            ZoneEvent::Seek(updates) => {
                assert_eq!(updates.len(), 1);
                assert_eq!(updates[0].zone_id, ZoneId::new("z-office"));
                assert_eq!(updates[0].seek_position_seconds, 73);
            }
            other => panic!("expected seek, got {:?}", other),
        }
    }

    #[test]
    fn test_snapshot_takes_precedence_over_seek() {
        let payload = json!({
            "zones": [office_zone()],
            "zones_seek_changed": [
                { "zone_id": "z-office", "seek_position_seconds": 73 }
            ]
        });
        assert!(matches!(
            decode_zone_event(&payload).unwrap(),
            ZoneEvent::Snapshot(_)
        ));
    }

    #[test]
    fn test_unknown_shape_is_malformed() {
        let payload = json!({ "zones_grouped": [] });
        let err = decode_zone_event(&payload).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedEvent(_)));
        assert!(err.to_string().contains("zones_grouped"));
    }

    #[test]
    fn test_non_object_is_malformed() {
        let err = decode_zone_event(&json!(42)).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedEvent(_)));
    }

    #[test]
    fn test_bad_zone_entry_is_deserialize_error() {
        let payload = json!({ "zones": [{ "zone_id": 7 }] });
        assert!(matches!(
            decode_zone_event(&payload).unwrap_err(),
            DecodeError::Deserialize { .. }
        ));
    }
}
