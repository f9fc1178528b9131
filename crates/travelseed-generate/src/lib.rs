//! Event and snapshot script generation for travelseed.
//!
//! This crate consumes a parsed [`TravelDomain`](travelseed_core::TravelDomain)
//! and writes, per category, an SQL event script and a MongoDB snapshot script
//! whose records stay aligned one-to-one.

pub mod emitter;
pub mod engine;
pub mod errors;
pub mod model;
pub mod output;
mod pipelines;
pub mod sink;

pub use engine::{GenerationEngine, GenerationResult};
pub use errors::GenerationError;
pub use model::{CategoryReport, GenerateOptions, GenerationReport};
pub use sink::{CategoryOutput, FsSink, MemorySink, OutputSink, StreamKind};
