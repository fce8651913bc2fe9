//! obsgen - Dart binding generator for the obs-websocket protocol
//!
//! Takes the machine-readable `protocol.json` published by obs-websocket and
//! emits strongly-typed Dart source for the `obs_websocket` runtime library:
//! request callables, request/response wrapper classes, enums, and event
//! wrappers with a tag-driven dispatch table.

pub mod generation;
pub mod output;
pub mod schema;

pub use generation::{GenerationError, GeneratorConfig, generate};
pub use output::Artifact;
pub use schema::ProtocolSchema;
