//! Enum value resolution
//!
//! Each enum resolves under exactly one of three cases, tried in order:
//! integer literals, vendor-prefixed string literals, or symbolic bit-flag
//! expressions joining sibling identifiers with `|`. Flag expressions are
//! re-emitted symbolically; the OR computation is left to Dart's own
//! const evaluation.

use std::collections::BTreeSet;

use crate::generation::names::{pascal_to_camel, snake_to_camel};
use crate::generation::GenerationError;
use crate::schema::{EnumDef, EnumIdentifierDef, EnumValue};

/// Prefix that marks a string-valued vendor enum.
pub const VENDOR_PREFIX: &str = "OBS_";

/// Value kind of a resolved enum, uniform across all its variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumKind {
    Int,
    Str,
}

/// A resolved variant value, ready for emission.
#[derive(Debug, Clone, PartialEq)]
pub enum VariantValue {
    Int(i64),
    Str(String),
    /// Symbolic OR of sibling identifiers, e.g. `All = (General | Config)`.
    /// `operands` keeps the referenced names, `resolved` their values.
    Flags {
        operands: Vec<String>,
        resolved: Vec<i64>,
    },
}

impl VariantValue {
    /// Literal Dart text for this value: `512`, `"OBS_..."`, or `1 | 2`.
    pub fn render(&self) -> String {
        match self {
            VariantValue::Int(n) => n.to_string(),
            VariantValue::Str(s) => format!("\"{s}\""),
            VariantValue::Flags { resolved, .. } => resolved
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(" | "),
        }
    }

    /// Numeric value for by-value lookups. Flag values OR their operands;
    /// string values have none.
    pub fn numeric(&self) -> Option<i64> {
        match self {
            VariantValue::Int(n) => Some(*n),
            VariantValue::Str(_) => None,
            VariantValue::Flags { resolved, .. } => {
                Some(resolved.iter().fold(0, |acc, n| acc | n))
            }
        }
    }
}

/// One resolved enum variant with its emission metadata.
#[derive(Debug, Clone)]
pub struct ResolvedVariant {
    /// Raw schema identifier, the by-name lookup key.
    pub identifier: String,
    /// Dart member name.
    pub dart_name: String,
    pub value: VariantValue,
    pub description: String,
    pub rpc_version: String,
    pub initial_version: String,
    pub deprecated: bool,
}

/// A fully resolved enum with bidirectional lookup metadata.
#[derive(Debug, Clone)]
pub struct ResolvedEnum {
    /// Raw schema enum type name.
    pub schema_type: String,
    /// Dart type name, `Obs`-prefixed unless already so.
    pub dart_name: String,
    pub kind: EnumKind,
    pub variants: Vec<ResolvedVariant>,
}

impl ResolvedEnum {
    /// By-value lookup for integer enums; first match wins if values repeat.
    pub fn variant_by_value(&self, value: i64) -> Option<&ResolvedVariant> {
        self.variants
            .iter()
            .find(|v| v.value.numeric() == Some(value))
    }

    /// By-name lookup against the raw, un-case-converted identifier.
    pub fn variant_by_name(&self, identifier: &str) -> Option<&ResolvedVariant> {
        self.variants.iter().find(|v| v.identifier == identifier)
    }

    /// By-value lookup for string enums, keyed on the vendor literal.
    pub fn variant_by_literal(&self, literal: &str) -> Option<&ResolvedVariant> {
        self.variants
            .iter()
            .find(|v| matches!(&v.value, VariantValue::Str(s) if s == literal))
    }
}

/// Resolve one enum definition. Returns `None` when the type is excluded by
/// configuration; fails hard on a flag expression referencing an undeclared
/// sibling or on a value outside the three supported cases.
pub fn resolve_enum(
    def: &EnumDef,
    excluded: &BTreeSet<String>,
) -> Result<Option<ResolvedEnum>, GenerationError> {
    if excluded.contains(&def.enum_type) {
        tracing::debug!(enum_type = %def.enum_type, "skipping excluded enum");
        return Ok(None);
    }

    let kind = classify(def);
    let variants = def
        .enum_identifiers
        .iter()
        .map(|ident| resolve_identifier(def, ident, kind))
        .collect::<Result<Vec<_>, _>>()?;

    let dart_name = if def.enum_type.starts_with("Obs") {
        def.enum_type.clone()
    } else {
        format!("Obs{}", def.enum_type)
    };

    Ok(Some(ResolvedEnum {
        schema_type: def.enum_type.clone(),
        dart_name,
        kind,
        variants,
    }))
}

/// Any vendor-prefixed value reclassifies the entire enum as string-valued.
fn classify(def: &EnumDef) -> EnumKind {
    let is_string = def.enum_identifiers.iter().any(|ident| {
        matches!(&ident.enum_value, EnumValue::Str(s) if s.starts_with(VENDOR_PREFIX))
    });
    if is_string { EnumKind::Str } else { EnumKind::Int }
}

fn resolve_identifier(
    def: &EnumDef,
    ident: &EnumIdentifierDef,
    kind: EnumKind,
) -> Result<ResolvedVariant, GenerationError> {
    let value = match &ident.enum_value {
        EnumValue::Int(n) => VariantValue::Int(*n),
        EnumValue::Str(s) if s.starts_with(VENDOR_PREFIX) => VariantValue::Str(s.clone()),
        EnumValue::Str(s) => resolve_flag_expression(def, ident, s)?,
    };

    // String enums key their member names off the lowercased display form;
    // integer enums keep the identifier's own casing.
    let dart_name = match kind {
        EnumKind::Str => snake_to_camel(&ident.enum_identifier.to_lowercase()),
        EnumKind::Int => pascal_to_camel(&ident.enum_identifier),
    };

    Ok(ResolvedVariant {
        identifier: ident.enum_identifier.clone(),
        dart_name,
        value,
        description: ident.description.clone(),
        rpc_version: ident.rpc_version.to_string(),
        initial_version: ident.initial_version.clone(),
        deprecated: ident.deprecated,
    })
}

/// Resolve a parenthesized ` | `-joined list of sibling identifiers to their
/// literal values, kept symbolic. Referenced names must be declared within
/// the same enum with plain integer values.
fn resolve_flag_expression(
    def: &EnumDef,
    ident: &EnumIdentifierDef,
    raw: &str,
) -> Result<VariantValue, GenerationError> {
    let inner = raw
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| GenerationError::UnsupportedEnumValue {
            enum_type: def.enum_type.clone(),
            identifier: ident.enum_identifier.clone(),
            value: raw.to_string(),
        })?;

    let operands: Vec<String> = inner.split(" | ").map(str::to_string).collect();
    let mut resolved = Vec::with_capacity(operands.len());
    for operand in &operands {
        let sibling = def
            .enum_identifiers
            .iter()
            .find(|other| &other.enum_identifier == operand)
            .ok_or_else(|| GenerationError::UnknownFlagReference {
                enum_type: def.enum_type.clone(),
                identifier: ident.enum_identifier.clone(),
                reference: operand.clone(),
            })?;
        match sibling.enum_value {
            EnumValue::Int(n) => resolved.push(n),
            EnumValue::Str(_) => {
                return Err(GenerationError::UnsupportedEnumValue {
                    enum_type: def.enum_type.clone(),
                    identifier: ident.enum_identifier.clone(),
                    value: raw.to_string(),
                });
            }
        }
    }

    Ok(VariantValue::Flags { operands, resolved })
}
