//! Field classification for generated call sites and accessors

use crate::generation::dart::DartType;
use crate::schema::FieldDef;

/// A schema field classified for emission.
#[derive(Debug, Clone)]
pub struct NormalizedField {
    /// Exact schema field name; also the key in the outgoing parameter map.
    pub name: String,
    pub ty: DartType,
    /// Optional at the call site; absent-if-null in the outgoing map.
    pub optional: bool,
    /// Dotted names are flattened sub-paths: excluded from parameter lists
    /// and constructors, kept in doc comments.
    pub dotted: bool,
    /// Response/event heuristic: a description mentioning "null" makes the
    /// accessor nullable even though the schema type is not optional.
    pub doc_nullable: bool,
    pub description: String,
}

impl NormalizedField {
    /// Classify a request field.
    pub fn request(field: &FieldDef) -> Self {
        Self::build(field, false)
    }

    /// Classify a response or event data field. The "null" description
    /// heuristic applies only here; it must never be inferred any other way.
    pub fn payload(field: &FieldDef) -> Self {
        let doc_nullable = field.value_description.contains("null");
        Self::build(field, doc_nullable)
    }

    fn build(field: &FieldDef, doc_nullable: bool) -> Self {
        Self {
            name: field.value_name.clone(),
            ty: DartType::from_schema(&field.value_type),
            optional: field.value_optional,
            dotted: field.value_name.contains('.'),
            doc_nullable,
            description: field.value_description.clone(),
        }
    }

    /// Rendered type with a `?` suffix when nullable; `dynamic` never takes
    /// the suffix.
    fn typed(&self, nullable: bool) -> String {
        if nullable && !self.ty.is_dynamic() {
            format!("{}?", self.ty)
        } else {
            self.ty.to_string()
        }
    }

    /// Named-parameter declaration for the callable and constructor lists:
    /// `required num inputName` / `num? volumeDb`.
    pub fn param_decl(&self) -> String {
        if self.optional {
            format!("{} {}", self.typed(true), self.name)
        } else {
            format!("required {} {}", self.typed(false), self.name)
        }
    }

    /// Stored Dart field declaration for the request wrapper class.
    pub fn stored_decl(&self) -> String {
        format!("final {} {};", self.typed(self.optional), self.name)
    }

    /// Outgoing parameter-map entry. Optional fields are guarded so an unset
    /// value omits the key entirely (absent-if-null, never null-if-absent).
    pub fn map_entry(&self) -> String {
        if self.optional {
            format!("if ({0} != null) \"{0}\": {0}", self.name)
        } else {
            format!("\"{0}\": {0}", self.name)
        }
    }

    /// Read-only accessor indexing the untyped decoded payload, with an
    /// element-wise cast for sequence types.
    pub fn accessor(&self) -> String {
        let cast = self
            .ty
            .element_type()
            .map(|element| format!(".cast<{element}>()"))
            .unwrap_or_default();
        format!(
            "{} get {1} => data[\"{1}\"]{2};",
            self.typed(self.doc_nullable),
            self.name,
            cast
        )
    }
}
