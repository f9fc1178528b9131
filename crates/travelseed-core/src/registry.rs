use std::collections::HashMap;

use crate::entity::{EntityIds, EntityKind};
use crate::error::{Error, Result};

/// Natural key to identifier pair lookup, scoped per entity kind.
///
/// Keys are write-once; lookups are exact matches.
#[derive(Debug, Clone, Default)]
pub struct ReferenceRegistry {
    entries: HashMap<EntityKind, HashMap<String, EntityIds>>,
}

impl ReferenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: EntityKind, key: &str, ids: EntityIds) -> Result<()> {
        let scope = self.entries.entry(kind).or_default();
        if scope.contains_key(key) {
            return Err(Error::DuplicateKey {
                kind,
                key: key.to_string(),
            });
        }
        scope.insert(key.to_string(), ids);
        Ok(())
    }

    pub fn resolve(&self, kind: EntityKind, key: &str) -> Result<&EntityIds> {
        self.entries
            .get(&kind)
            .and_then(|scope| scope.get(key))
            .ok_or_else(|| Error::UnknownReference {
                kind,
                key: key.to_string(),
            })
    }

    /// Resolve a reference that may be absent.
    ///
    /// A missing or empty key yields `Ok(None)`; a present key must be registered.
    pub fn resolve_optional(
        &self,
        kind: EntityKind,
        key: Option<&str>,
    ) -> Result<Option<&EntityIds>> {
        match key {
            None | Some("") => Ok(None),
            Some(key) => self.resolve(kind, key).map(Some),
        }
    }

    pub fn contains(&self, kind: EntityKind, key: &str) -> bool {
        self.entries
            .get(&kind)
            .is_some_and(|scope| scope.contains_key(key))
    }

    /// Number of registered keys across all kinds.
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
