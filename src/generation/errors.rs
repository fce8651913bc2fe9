//! Error types for the generation domain

use thiserror::Error;

/// Errors that can occur while loading a schema or generating bindings.
///
/// Generation is a deterministic function of one schema snapshot; every
/// failure is permanent and aborts the whole run with no partial artifacts.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Duplicate {kind} name: {name}")]
    DuplicateName { kind: String, name: String },

    #[error("Enum {enum_type} mixes vendor-string and integer values")]
    MixedEnumKind { enum_type: String },

    #[error(
        "Enum {enum_type}, identifier {identifier}: flag expression references unknown identifier {reference}"
    )]
    UnknownFlagReference {
        enum_type: String,
        identifier: String,
        reference: String,
    },

    #[error("Enum {enum_type}, identifier {identifier}: unsupported value {value}")]
    UnsupportedEnumValue {
        enum_type: String,
        identifier: String,
        value: String,
    },

    #[error("Inconsistent artifacts: {0}")]
    Inconsistent(String),

    #[error("Load error: {0}")]
    Load(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
