//! Core contracts for travelseed.
//!
//! This crate defines the travel-domain input model, entity kinds and
//! identifier pairs, plus the identifier allocator and reference registry
//! shared by the generation engine.

pub mod entity;
pub mod error;
pub mod ids;
pub mod model;
mod ordered;
pub mod registry;

pub use entity::{EntityIds, EntityKind};
pub use error::{Error, Result};
pub use ids::{EntityIdStrategy, IdAllocator};
pub use model::{
    Airport, BusStop, City, CodeRef, Country, Hotel, IdentifierRef, Meal, Route, TravelDomain,
};
pub use registry::ReferenceRegistry;
