//! Schema document model and loaders

pub mod loader;
pub mod types;

pub use loader::{CompositeSchemaLoader, FileSchemaLoader, HttpSchemaLoader, SchemaLoader};
pub use types::{
    EnumDef, EnumIdentifierDef, EnumValue, EventDef, FieldDef, ProtocolSchema, RequestDef,
    VersionTag,
};
