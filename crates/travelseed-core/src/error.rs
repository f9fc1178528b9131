use thiserror::Error;

use crate::entity::EntityKind;

/// Reference resolution errors shared across travelseed crates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A natural key was referenced before (or without) being registered.
    #[error("unknown {kind} reference '{key}'")]
    UnknownReference { kind: EntityKind, key: String },
    /// Two entities of the same kind share a natural key.
    #[error("duplicate {kind} key '{key}'")]
    DuplicateKey { kind: EntityKind, key: String },
}

/// Convenience alias for results returned by the core crate.
pub type Result<T> = std::result::Result<T, Error>;
