//! # Event Envelope
//!
//! The one message type that crosses the wire.
//!
//! ## Design
//!
//! Two fields are reserved and typed: `id` and `pos`. Everything else
//! (`speed`, `time`, whatever a future peer adds) lives in an open
//! extension map and is carried end-to-end without interpretation. The
//! transport layers never read past the reserved fields; the
//! synchronization model reads `speed` and `time` through the typed
//! accessors below.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::id::EntityId;

/// Name of the well-known `speed` extension field.
pub const FIELD_SPEED: &str = "speed";

/// Name of the well-known `time` extension field.
pub const FIELD_TIME: &str = "time";

/// A state-update event for a single entity.
///
/// Serialized as one flat JSON object: reserved fields plus whatever the
/// sender put in the extension map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Originating entity.
    pub id: EntityId,
    /// Position on the plane.
    pub pos: [f32; 2],
    /// Open extension fields, passed through opaque.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Event {
    /// Creates an event with only the reserved fields set.
    #[must_use]
    pub fn new(id: EntityId, pos: [f32; 2]) -> Self {
        Self {
            id,
            pos,
            extra: Map::new(),
        }
    }

    /// Sets the well-known `speed` extension field.
    #[must_use]
    pub fn with_speed(mut self, speed: [f32; 2]) -> Self {
        self.extra.insert(
            FIELD_SPEED.to_owned(),
            Value::Array(vec![speed[0].into(), speed[1].into()]),
        );
        self
    }

    /// Sets the well-known `time` extension field (sender's clock).
    #[must_use]
    pub fn with_time(mut self, time: f32) -> Self {
        self.extra.insert(FIELD_TIME.to_owned(), time.into());
        self
    }

    /// Returns the `speed` extension field, if present and well-formed.
    #[must_use]
    pub fn speed(&self) -> Option<[f32; 2]> {
        let values = self.extra.get(FIELD_SPEED)?.as_array()?;
        if values.len() != 2 {
            return None;
        }
        let x = values[0].as_f64()?;
        let y = values[1].as_f64()?;
        Some([x as f32, y as f32])
    }

    /// Returns the `time` extension field, if present and numeric.
    #[must_use]
    pub fn time(&self) -> Option<f32> {
        Some(self.extra.get(FIELD_TIME)?.as_f64()? as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_fields_roundtrip() {
        let event = Event::new(EntityId::from("A-1"), [1.0, 2.0]);
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
        assert_eq!(back.pos, [1.0, 2.0]);
    }

    #[test]
    fn test_unknown_fields_pass_through() {
        let json = r#"{"id":"A-1","pos":[1,2],"hue":"teal","retries":3}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.extra.get("hue").unwrap(), "teal");
        assert_eq!(event.extra.get("retries").unwrap(), 3);

        let reencoded = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&reencoded).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_speed_and_time_accessors() {
        let event = Event::new(EntityId::from("A-1"), [10.0, 10.0])
            .with_speed([5.0, 0.0])
            .with_time(1.25);
        assert_eq!(event.speed(), Some([5.0, 0.0]));
        assert_eq!(event.time(), Some(1.25));
    }

    #[test]
    fn test_missing_or_malformed_speed() {
        let event = Event::new(EntityId::from("A-1"), [0.0, 0.0]);
        assert_eq!(event.speed(), None);

        let json = r#"{"id":"A-1","pos":[0,0],"speed":"fast"}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.speed(), None);

        let json = r#"{"id":"A-1","pos":[0,0],"speed":[1]}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.speed(), None);
    }
}
