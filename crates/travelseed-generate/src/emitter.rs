use std::io::Write;

use tracing::debug;
use travelseed_core::{EntityIds, EntityKind, IdAllocator};

use crate::errors::Result;
use crate::output::{EventRecord, Payload, SnapshotRecord, encode_event, encode_snapshot};
use crate::sink::{CategoryOutput, StreamKind};

/// Emits entities of one category session into both streams.
///
/// The emitter allocates identifiers and writes records; registering the
/// returned pair is left to the caller.
pub struct EntityEmitter<'a, W: Write> {
    allocator: &'a mut IdAllocator,
    output: &'a mut CategoryOutput<W>,
    emitted: u64,
    first_event_id: Option<u64>,
    last_event_id: Option<u64>,
}

impl<'a, W: Write> EntityEmitter<'a, W> {
    pub fn new(allocator: &'a mut IdAllocator, output: &'a mut CategoryOutput<W>) -> Self {
        Self {
            allocator,
            output,
            emitted: 0,
            first_event_id: None,
            last_event_id: None,
        }
    }

    /// Create one entity: event record first, then its snapshot.
    pub fn emit(&mut self, kind: EntityKind, payload: &Payload) -> Result<EntityIds> {
        let entity_id = self.allocator.new_entity_id();
        let event_id = self.allocator.next_event_id();

        let event = encode_event(&EventRecord {
            event_id,
            entity_id: &entity_id,
            event_name: kind.event_name(),
            payload,
        })?;
        self.output.write(StreamKind::Events, &event)?;

        let ids = EntityIds::new(entity_id, event_id);
        let snapshot = encode_snapshot(&SnapshotRecord {
            ids: &ids,
            entity_type: kind.entity_type(),
            payload,
        })?;
        self.output.write(StreamKind::Snapshots, &snapshot)?;

        self.emitted += 1;
        self.first_event_id = self.first_event_id.or(Some(event_id));
        self.last_event_id = Some(event_id);
        debug!(
            entity_type = kind.entity_type(),
            entity_id = %ids.entity_id,
            event_id,
            "entity emitted"
        );

        Ok(ids)
    }

    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    pub fn first_event_id(&self) -> Option<u64> {
        self.first_event_id
    }

    pub fn last_event_id(&self) -> Option<u64> {
        self.last_event_id
    }
}
