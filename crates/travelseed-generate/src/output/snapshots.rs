use serde::Serialize;

use crate::errors::Result;
use crate::output::json::to_ascii_json;
use crate::output::{Payload, SnapshotRecord};

#[derive(Serialize)]
struct SnapshotDocument<'a> {
    entity_id: &'a str,
    entity_type: &'a str,
    last_event_id: u64,
    data: &'a Payload,
}

/// Render one `db.snapshots.insertOne` statement.
///
/// The document is ASCII-only JSON, which is also a valid JavaScript
/// object literal.
pub fn encode_snapshot(snapshot: &SnapshotRecord<'_>) -> Result<String> {
    let document = to_ascii_json(&SnapshotDocument {
        entity_id: &snapshot.ids.entity_id,
        entity_type: snapshot.entity_type,
        last_event_id: snapshot.ids.last_event_id,
        data: snapshot.payload,
    })?;
    Ok(format!("\ndb.snapshots.insertOne({document});\n"))
}
