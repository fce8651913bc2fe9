//! Generation domain: schema-to-binding transformation
//!
//! Takes the validated protocol schema and transforms it into the four Dart
//! artifacts: name normalization, type mapping, field classification, enum
//! value resolution, and coordinated emission.

pub mod config;
pub mod dart;
pub mod docs;
pub mod emitter;
pub mod enums;
pub mod errors;
pub mod fields;
pub mod names;
pub mod writer;

pub use config::GeneratorConfig;
pub use dart::DartType;
pub use emitter::generate;
pub use enums::{EnumKind, ResolvedEnum, ResolvedVariant, VENDOR_PREFIX, VariantValue};
pub use errors::GenerationError;
pub use fields::NormalizedField;
