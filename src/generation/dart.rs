//! Schema value types mapped to Dart type expressions
//!
//! The mapping is a closed, tagged set rather than chained text substitution;
//! unknown names pass through unchanged as forward references to other
//! generated types (enums or nested classes), never as errors.

use std::fmt;

/// A Dart type expression derived from a schema value type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DartType {
    /// `Number` -> `num`
    Num,
    /// `Boolean` -> `bool`
    Bool,
    /// `Any` -> `dynamic`
    Dynamic,
    /// `Object` -> `Map<String, dynamic>`
    StringMap,
    /// `Array<T>` -> `List<T>`
    List(Box<DartType>),
    /// Pass-through: `String`, enum names, nested class names.
    Named(String),
}

impl DartType {
    /// Map a schema value-type name to its Dart type.
    pub fn from_schema(value_type: &str) -> Self {
        match value_type {
            "Number" => DartType::Num,
            "Boolean" => DartType::Bool,
            "Any" => DartType::Dynamic,
            "Object" => DartType::StringMap,
            _ => {
                if let Some(inner) = value_type
                    .strip_prefix("Array<")
                    .and_then(|rest| rest.strip_suffix('>'))
                {
                    DartType::List(Box::new(DartType::from_schema(inner)))
                } else if value_type == "Array" {
                    DartType::List(Box::new(DartType::Dynamic))
                } else {
                    DartType::Named(value_type.to_string())
                }
            }
        }
    }

    /// The rendered element type for `List` types, used to emit the
    /// element-wise `.cast<T>()` when reading sequence values out of an
    /// untyped decoded payload. `None` for every other type.
    pub fn element_type(&self) -> Option<String> {
        match self {
            DartType::List(inner) => Some(inner.to_string()),
            _ => None,
        }
    }

    /// Whether this type is `dynamic`, which never takes a `?` suffix.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, DartType::Dynamic)
    }
}

impl fmt::Display for DartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DartType::Num => write!(f, "num"),
            DartType::Bool => write!(f, "bool"),
            DartType::Dynamic => write!(f, "dynamic"),
            DartType::StringMap => write!(f, "Map<String, dynamic>"),
            DartType::List(inner) => write!(f, "List<{inner}>"),
            DartType::Named(name) => write!(f, "{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_mapping() {
        assert_eq!(DartType::from_schema("Number").to_string(), "num");
        assert_eq!(DartType::from_schema("Boolean").to_string(), "bool");
        assert_eq!(DartType::from_schema("Any").to_string(), "dynamic");
        assert_eq!(
            DartType::from_schema("Object").to_string(),
            "Map<String, dynamic>"
        );
        assert_eq!(DartType::from_schema("String").to_string(), "String");
    }

    #[test]
    fn test_array_mapping() {
        let strings = DartType::from_schema("Array<String>");
        assert_eq!(strings.to_string(), "List<String>");
        assert_eq!(strings.element_type().as_deref(), Some("String"));

        let objects = DartType::from_schema("Array<Object>");
        assert_eq!(objects.to_string(), "List<Map<String, dynamic>>");
        assert_eq!(objects.element_type().as_deref(), Some("Map<String, dynamic>"));
    }

    #[test]
    fn test_unmapped_name_passes_through() {
        // Unknown names are forward references to other generated types.
        let forward = DartType::from_schema("ObsMediaInputAction");
        assert_eq!(forward, DartType::Named("ObsMediaInputAction".to_string()));
        assert_eq!(forward.to_string(), "ObsMediaInputAction");
        assert_eq!(forward.element_type(), None);
    }

    #[test]
    fn test_element_type_only_for_lists() {
        assert_eq!(DartType::from_schema("Number").element_type(), None);
        assert_eq!(DartType::from_schema("Object").element_type(), None);
    }
}
