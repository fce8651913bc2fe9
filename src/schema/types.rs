//! Strongly-typed model of the obs-websocket protocol schema document
//!
//! The wire document is deserialized into these types in one pass, and
//! [`ProtocolSchema::validate`] surfaces every structural defect before any
//! artifact is emitted.

use std::collections::HashSet;
use std::fmt;

use serde::Deserialize;

use crate::generation::GenerationError;

/// Top-level protocol schema: requests, enums, and events.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolSchema {
    pub requests: Vec<RequestDef>,
    pub enums: Vec<EnumDef>,
    pub events: Vec<EventDef>,
}

/// One remote-control request definition.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDef {
    pub request_type: String,
    pub category: String,
    pub complexity: u8,
    pub rpc_version: VersionTag,
    pub initial_version: String,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub description: String,
    pub request_fields: Vec<FieldDef>,
    pub response_fields: Vec<FieldDef>,
}

/// A request, response, or event data field.
///
/// A `value_name` containing `.` denotes a flattened sub-path into a parent
/// object-typed field; such fields never become standalone parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    pub value_name: String,
    pub value_type: String,
    #[serde(default)]
    pub value_optional: bool,
    #[serde(default)]
    pub value_description: String,
}

/// One enumeration definition.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumDef {
    pub enum_type: String,
    pub enum_identifiers: Vec<EnumIdentifierDef>,
}

/// One identifier within an enumeration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumIdentifierDef {
    pub enum_identifier: String,
    pub enum_value: EnumValue,
    #[serde(default)]
    pub description: String,
    pub rpc_version: VersionTag,
    #[serde(default)]
    pub initial_version: String,
    #[serde(default)]
    pub deprecated: bool,
}

/// One asynchronous event definition.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDef {
    pub event_type: String,
    pub event_subscription: String,
    pub category: String,
    pub complexity: u8,
    pub rpc_version: VersionTag,
    pub initial_version: String,
    #[serde(default)]
    pub description: String,
    pub data_fields: Vec<FieldDef>,
}

/// Raw enum value as it appears in the schema: an integer literal, or a
/// string (either a vendor-prefixed literal or a `(A | B)` flag expression).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    Int(i64),
    Str(String),
}

/// Version tag that arrives as either a JSON string or a JSON number,
/// depending on the schema section. Normalized to text for doc comments.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum VersionTag {
    Text(String),
    Number(i64),
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionTag::Text(s) => write!(f, "{s}"),
            VersionTag::Number(n) => write!(f, "{n}"),
        }
    }
}

impl ProtocolSchema {
    /// Validate the structural invariants of the schema.
    ///
    /// All checks run before emission starts: duplicate type/identifier
    /// names within a collection and enums mixing vendor-string values with
    /// integer values are fatal.
    pub fn validate(&self) -> Result<(), GenerationError> {
        check_unique("request", self.requests.iter().map(|r| &r.request_type))?;
        check_unique("enum", self.enums.iter().map(|e| &e.enum_type))?;
        check_unique("event", self.events.iter().map(|e| &e.event_type))?;

        for enum_def in &self.enums {
            check_unique(
                &format!("enum {} identifier", enum_def.enum_type),
                enum_def.enum_identifiers.iter().map(|i| &i.enum_identifier),
            )?;

            let has_int = enum_def
                .enum_identifiers
                .iter()
                .any(|i| matches!(i.enum_value, EnumValue::Int(_)));
            let has_vendor_string = enum_def.enum_identifiers.iter().any(|i| {
                matches!(&i.enum_value, EnumValue::Str(s) if s.starts_with(crate::generation::VENDOR_PREFIX))
            });
            if has_int && has_vendor_string {
                return Err(GenerationError::MixedEnumKind {
                    enum_type: enum_def.enum_type.clone(),
                });
            }
        }

        Ok(())
    }
}

fn check_unique<'a>(
    kind: &str,
    names: impl Iterator<Item = &'a String>,
) -> Result<(), GenerationError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(GenerationError::DuplicateName {
                kind: kind.to_string(),
                name: name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema_from(json: serde_json::Value) -> ProtocolSchema {
        serde_json::from_value(json).expect("schema should deserialize")
    }

    #[test]
    fn test_deserialize_minimal_schema() {
        let schema = schema_from(serde_json::json!({
            "requests": [{
                "requestType": "GetVersion",
                "category": "general",
                "complexity": 1,
                "rpcVersion": "1",
                "initialVersion": "5.0.0",
                "deprecated": false,
                "description": "Gets data about the current plugin and RPC version.",
                "requestFields": [],
                "responseFields": [{
                    "valueName": "obsVersion",
                    "valueType": "String",
                    "valueDescription": "Current OBS Studio version"
                }]
            }],
            "enums": [],
            "events": []
        }));

        assert_eq!(schema.requests.len(), 1);
        let request = &schema.requests[0];
        assert_eq!(request.request_type, "GetVersion");
        assert_eq!(request.rpc_version.to_string(), "1");
        // responseFields carry no valueOptional; the default applies
        assert!(!request.response_fields[0].value_optional);
    }

    #[test]
    fn test_enum_value_accepts_int_and_string() {
        let int_value: EnumValue = serde_json::from_value(serde_json::json!(512)).unwrap();
        assert_eq!(int_value, EnumValue::Int(512));

        let str_value: EnumValue =
            serde_json::from_value(serde_json::json!("OBS_WEBSOCKET_OUTPUT_STARTED")).unwrap();
        assert_eq!(
            str_value,
            EnumValue::Str("OBS_WEBSOCKET_OUTPUT_STARTED".to_string())
        );
    }

    #[test]
    fn test_version_tag_accepts_number() {
        let tag: VersionTag = serde_json::from_value(serde_json::json!(1)).unwrap();
        assert_eq!(tag.to_string(), "1");
    }

    #[test]
    fn test_validate_rejects_duplicate_request_type() {
        let request = serde_json::json!({
            "requestType": "GetVersion",
            "category": "general",
            "complexity": 1,
            "rpcVersion": "1",
            "initialVersion": "5.0.0",
            "deprecated": false,
            "description": "",
            "requestFields": [],
            "responseFields": []
        });
        let schema = schema_from(serde_json::json!({
            "requests": [request.clone(), request],
            "enums": [],
            "events": []
        }));

        match schema.validate() {
            Err(GenerationError::DuplicateName { kind, name }) => {
                assert_eq!(kind, "request");
                assert_eq!(name, "GetVersion");
            }
            other => panic!("expected DuplicateName, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_mixed_enum_kinds() {
        let schema = schema_from(serde_json::json!({
            "requests": [],
            "enums": [{
                "enumType": "OutputState",
                "enumIdentifiers": [
                    {
                        "enumIdentifier": "Started",
                        "enumValue": "OBS_WEBSOCKET_OUTPUT_STARTED",
                        "description": "",
                        "rpcVersion": "1",
                        "initialVersion": "5.0.0",
                        "deprecated": false
                    },
                    {
                        "enumIdentifier": "Stopped",
                        "enumValue": 1,
                        "description": "",
                        "rpcVersion": "1",
                        "initialVersion": "5.0.0",
                        "deprecated": false
                    }
                ]
            }],
            "events": []
        }));

        assert!(matches!(
            schema.validate(),
            Err(GenerationError::MixedEnumKind { enum_type }) if enum_type == "OutputState"
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_enum_identifier() {
        let schema = schema_from(serde_json::json!({
            "requests": [],
            "enums": [{
                "enumType": "EventSubscription",
                "enumIdentifiers": [
                    {
                        "enumIdentifier": "General",
                        "enumValue": 1,
                        "description": "",
                        "rpcVersion": "1",
                        "initialVersion": "5.0.0",
                        "deprecated": false
                    },
                    {
                        "enumIdentifier": "General",
                        "enumValue": 2,
                        "description": "",
                        "rpcVersion": "1",
                        "initialVersion": "5.0.0",
                        "deprecated": false
                    }
                ]
            }],
            "events": []
        }));

        assert!(matches!(
            schema.validate(),
            Err(GenerationError::DuplicateName { .. })
        ));
    }
}
