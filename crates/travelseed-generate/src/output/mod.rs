//! Text encoders for the two output streams.

pub mod events;
pub mod json;
pub mod snapshots;

use serde_json::{Map, Value};
use travelseed_core::EntityIds;

pub use events::encode_event;
pub use snapshots::encode_snapshot;

/// Attribute map carried by both the event and the snapshot of an entity.
pub type Payload = Map<String, Value>;

/// One entity-creation event.
#[derive(Debug, Clone, Copy)]
pub struct EventRecord<'a> {
    pub event_id: u64,
    pub entity_id: &'a str,
    pub event_name: &'a str,
    pub payload: &'a Payload,
}

/// Current-state document of one entity.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotRecord<'a> {
    pub ids: &'a EntityIds,
    pub entity_type: &'a str,
    pub payload: &'a Payload,
}
