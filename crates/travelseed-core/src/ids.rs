use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How synthetic entity ids are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityIdStrategy {
    /// Random UUID v4 per entity.
    #[default]
    Random,
    /// UUIDs built from a per-run counter, for reproducible fixtures.
    Sequential,
}

/// Allocates entity ids and the run-global event sequence.
///
/// A fresh allocator starts at event 1; every run builds its own.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    strategy: EntityIdStrategy,
    last_event_id: u64,
    last_entity_seq: u128,
}

impl IdAllocator {
    pub fn new(strategy: EntityIdStrategy) -> Self {
        Self {
            strategy,
            last_event_id: 0,
            last_entity_seq: 0,
        }
    }

    /// Next event sequence number: 1 on the first call, then previous + 1.
    pub fn next_event_id(&mut self) -> u64 {
        self.last_event_id += 1;
        self.last_event_id
    }

    /// Fresh entity id, unique within the run.
    pub fn new_entity_id(&mut self) -> String {
        match self.strategy {
            EntityIdStrategy::Random => Uuid::new_v4().to_string(),
            EntityIdStrategy::Sequential => {
                self.last_entity_seq += 1;
                Uuid::from_u128(self.last_entity_seq).to_string()
            }
        }
    }

    /// Last event id handed out, `0` before the first allocation.
    pub fn last_event_id(&self) -> u64 {
        self.last_event_id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new(EntityIdStrategy::default())
    }
}
