//! Artifact emission
//!
//! Produces the four generated Dart artifacts from one validated schema:
//! request bindings (callables + request wrapper classes), response wrapper
//! classes, enum definitions, and event wrapper classes with the tag-driven
//! dispatch table. Emission is single-pass with no feedback loop; the
//! orchestrating [`generate`] enforces the cross-artifact consistency
//! invariants before returning.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::generation::GenerationError;
use crate::generation::config::GeneratorConfig;
use crate::generation::docs::{doc_lines, sanitize_inline};
use crate::generation::enums::{EnumKind, ResolvedEnum, resolve_enum};
use crate::generation::fields::NormalizedField;
use crate::generation::names::pascal_to_camel;
use crate::generation::writer::CodeWriter;
use crate::output::Artifact;
use crate::schema::{EventDef, ProtocolSchema, RequestDef};

/// Generate all four artifacts from a schema.
///
/// Control flow is strictly Load -> Validate -> Resolve -> Emit; any failure
/// aborts the run with no partial artifacts.
pub fn generate(
    schema: &ProtocolSchema,
    config: &GeneratorConfig,
) -> Result<Vec<Artifact>, GenerationError> {
    schema.validate()?;
    tracing::debug!(
        requests = schema.requests.len(),
        enums = schema.enums.len(),
        events = schema.events.len(),
        "schema validated"
    );

    let enums: Vec<ResolvedEnum> = schema
        .enums
        .iter()
        .filter_map(|def| resolve_enum(def, &config.excluded_enums).transpose())
        .collect::<Result<_, _>>()?;
    tracing::debug!(resolved = enums.len(), "enum values resolved");

    let requests: Vec<RequestPlan> = schema
        .requests
        .iter()
        .map(|def| RequestPlan::new(def, config))
        .collect();
    let events: Vec<EventPlan> = schema.events.iter().map(EventPlan::new).collect();

    // Consistency checks run against the classes actually present in the
    // emitted source, not against the plans that produced it.
    let responses_src = emit_responses(&requests, config);
    check_response_references(&requests, &emitted_class_names(&responses_src), config)?;

    let events_src = emit_events(&events, config);
    check_dispatch_table(&events, &emitted_class_names(&events_src))?;

    let artifacts = vec![
        Artifact::new(
            config.output_dir.join(&config.requests_file),
            emit_requests(&requests, config),
        ),
        Artifact::new(config.output_dir.join(&config.responses_file), responses_src),
        Artifact::new(
            config.output_dir.join(&config.enums_file),
            emit_enums(&enums),
        ),
        Artifact::new(config.output_dir.join(&config.events_file), events_src),
    ];
    tracing::debug!(artifacts = artifacts.len(), "emission complete");
    Ok(artifacts)
}

/// A request with its fields classified and its response class bound.
struct RequestPlan<'a> {
    def: &'a RequestDef,
    /// All request fields, dotted included (docs need them).
    fields: Vec<NormalizedField>,
    response_fields: Vec<NormalizedField>,
    /// `XResponse`, or the shared generic response when the request
    /// declares no response fields.
    response_class: String,
}

impl<'a> RequestPlan<'a> {
    fn new(def: &'a RequestDef, config: &GeneratorConfig) -> Self {
        let response_class = if def.response_fields.is_empty() {
            config.response_base()
        } else {
            format!("{}Response", def.request_type)
        };
        Self {
            def,
            fields: def.request_fields.iter().map(NormalizedField::request).collect(),
            response_fields: def
                .response_fields
                .iter()
                .map(NormalizedField::payload)
                .collect(),
            response_class,
        }
    }

    fn has_response_fields(&self) -> bool {
        !self.response_fields.is_empty()
    }

    /// Fields that appear in the callable and constructor parameter lists.
    fn param_fields(&self) -> impl Iterator<Item = &NormalizedField> {
        self.fields.iter().filter(|f| !f.dotted)
    }
}

/// An event with its data fields classified.
struct EventPlan<'a> {
    def: &'a EventDef,
    fields: Vec<NormalizedField>,
    class_name: String,
}

impl<'a> EventPlan<'a> {
    fn new(def: &'a EventDef) -> Self {
        Self {
            def,
            fields: def.data_fields.iter().map(NormalizedField::payload).collect(),
            class_name: format!("{}Event", def.event_type),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Shared doc-comment block: description plus schema metadata lines.
fn write_metadata_docs(w: &mut CodeWriter, indent: usize, plan: &RequestPlan<'_>) {
    for line in doc_lines(&plan.def.description) {
        w.doc(indent, &line);
    }
    w.doc(indent, &format!("* Category: {}", capitalize(&plan.def.category)));
    w.doc(indent, &format!("* Complexity: {}/5", plan.def.complexity));
    w.doc(indent, &format!("* RPC Version: {}", plan.def.rpc_version));
    w.doc(
        indent,
        &format!("* Initial Version: {}", plan.def.initial_version),
    );
}

/// Request-Bindings artifact: the callable extension followed by the
/// request wrapper classes.
fn emit_requests(plans: &[RequestPlan<'_>], config: &GeneratorConfig) -> String {
    let mut w = CodeWriter::new();
    w.line(
        0,
        &format!("import '{}/request.dart';", config.classes_import_prefix),
    );
    w.line(
        0,
        &format!("import '{}/response.dart';", config.classes_import_prefix),
    );
    w.line(0, &format!("import '{}';", config.library_import()));
    w.line(0, &format!("import '{}';", config.responses_file));
    w.blank();

    w.line(0, &format!("extension Requests on {} {{", config.library_name));
    for plan in plans {
        write_metadata_docs(&mut w, 1, plan);
        w.doc(1, "");
        if !plan.fields.is_empty() {
            w.doc(1, "**Request fields:**");
            for field in &plan.fields {
                // Dotted sub-path fields stay documented even though they
                // never become parameters.
                let name = if field.dotted {
                    field.name.clone()
                } else {
                    format!("[{}]", field.name)
                };
                w.doc(
                    1,
                    &format!("* {}: {}", name, sanitize_inline(&field.description)),
                );
            }
        }
        if plan.def.deprecated {
            w.line(1, "@Deprecated(\"Deprecated\")");
        }

        let params: Vec<String> = plan.param_fields().map(|f| f.param_decl()).collect();
        let params_str = if params.is_empty() {
            String::new()
        } else {
            format!("{{{}}}", params.join(", "))
        };
        let entries: Vec<String> = plan.param_fields().map(|f| f.map_entry()).collect();
        let call = if entries.is_empty() {
            format!("call(\"{}\")", plan.def.request_type)
        } else {
            format!("call(\"{}\", {{{}}})", plan.def.request_type, entries.join(", "))
        };
        let body = if plan.has_response_fields() {
            format!("{}.fromResponse(await {})", plan.response_class, call)
        } else {
            call
        };
        w.line(
            1,
            &format!(
                "Future<{}> {}({}) async => {};",
                plan.response_class,
                pascal_to_camel(&plan.def.request_type),
                params_str,
                body
            ),
        );
        w.blank();
    }
    w.line(0, "}");
    w.blank();

    for plan in plans {
        write_metadata_docs(&mut w, 0, plan);
        if plan.def.deprecated {
            w.line(0, "@Deprecated(\"Deprecated\")");
        }
        w.line(
            0,
            &format!(
                "class {}Request extends {}<{}> {{",
                plan.def.request_type,
                config.request_base(),
                plan.response_class
            ),
        );
        for field in plan.param_fields() {
            w.doc(1, &sanitize_inline(&field.description));
            w.line(1, &field.stored_decl());
            w.blank();
        }
        let ctor_params: Vec<String> = plan
            .param_fields()
            .map(|f| {
                if f.optional {
                    format!("this.{}", f.name)
                } else {
                    format!("required this.{}", f.name)
                }
            })
            .collect();
        let ctor_str = if ctor_params.is_empty() {
            String::new()
        } else {
            format!("{{{}}}", ctor_params.join(", "))
        };
        let super_map: Vec<String> = plan.param_fields().map(|f| f.map_entry()).collect();
        w.line(
            1,
            &format!(
                "{}Request({}) : super(\"{}\", {{{}}});",
                plan.def.request_type,
                ctor_str,
                plan.def.request_type,
                super_map.join(", ")
            ),
        );
        w.blank();
        w.line(1, "@override");
        w.line(
            1,
            &format!(
                "{0} serializeResponse(data, status) => {0}(data, status);",
                plan.response_class
            ),
        );
        w.line(0, "}");
        w.blank();
    }

    w.finish()
}

/// Response-Classes artifact.
fn emit_responses(plans: &[RequestPlan<'_>], config: &GeneratorConfig) -> String {
    let mut w = CodeWriter::new();

    w.line(
        0,
        &format!("import '{}/response.dart';", config.classes_import_prefix),
    );
    w.blank();

    for plan in plans.iter().filter(|p| p.has_response_fields()) {
        w.doc(0, &format!("Response for {}", plan.def.request_type));
        w.line(
            0,
            &format!(
                "class {} extends {} {{",
                plan.response_class,
                config.response_base()
            ),
        );
        for field in &plan.response_fields {
            for line in doc_lines(&field.description) {
                w.doc(1, &line);
            }
            w.line(1, &field.accessor());
            w.blank();
        }
        w.line(1, &format!("{}(super.data, super.status);", plan.response_class));
        w.line(
            1,
            &format!(
                "{}.fromResponse(resp) : this(resp.data, resp.status);",
                plan.response_class
            ),
        );
        w.line(0, "}");
        w.blank();
    }

    w.finish()
}

/// Enum-Definitions artifact: Dart enhanced enums with value/name lookups.
fn emit_enums(enums: &[ResolvedEnum]) -> String {
    let mut w = CodeWriter::new();

    for resolved in enums {
        w.line(0, &format!("enum {} {{", resolved.dart_name));
        let last = resolved.variants.len().saturating_sub(1);
        for (i, variant) in resolved.variants.iter().enumerate() {
            for line in doc_lines(&variant.description) {
                w.doc(1, &line);
            }
            w.doc(1, &format!("* RPC Version: {}", variant.rpc_version));
            w.doc(1, &format!("* Initial Version: {}", variant.initial_version));
            if variant.deprecated {
                w.line(1, "@Deprecated(\"Deprecated\")");
            }
            let separator = if i == last { ';' } else { ',' };
            let member = match resolved.kind {
                EnumKind::Int => format!(
                    "{}({}, \"{}\"){}",
                    variant.dart_name,
                    variant.value.render(),
                    variant.identifier,
                    separator
                ),
                EnumKind::Str => format!(
                    "{}({}){}",
                    variant.dart_name,
                    variant.value.render(),
                    separator
                ),
            };
            w.line(1, &member);
            w.blank();
        }

        match resolved.kind {
            EnumKind::Int => {
                w.line(1, "final int value;");
                w.line(1, "final String name;");
                w.line(1, &format!("const {}(this.value, this.name);", resolved.dart_name));
                w.line(
                    1,
                    &format!(
                        "static {0} fromInt(int n) => {0}.values.firstWhere((val) => val.value == n);",
                        resolved.dart_name
                    ),
                );
                w.line(
                    1,
                    &format!(
                        "static {0} fromString(String n) => {0}.values.firstWhere((val) => val.name == n);",
                        resolved.dart_name
                    ),
                );
            }
            EnumKind::Str => {
                w.line(1, "final String value;");
                w.line(1, &format!("const {}(this.value);", resolved.dart_name));
                w.line(
                    1,
                    &format!(
                        "static {0} fromString(String n) => {0}.values.firstWhere((val) => val.value == n);",
                        resolved.dart_name
                    ),
                );
            }
        }
        w.line(0, "}");
        w.blank();
    }

    w.finish()
}

/// Event-Definitions artifact: wrapper classes plus the dispatch table.
fn emit_events(plans: &[EventPlan<'_>], config: &GeneratorConfig) -> String {
    let mut w = CodeWriter::new();

    w.line(
        0,
        &format!("import '{}/event.dart';", config.classes_import_prefix),
    );
    w.blank();

    for plan in plans {
        for line in doc_lines(&plan.def.description) {
            w.doc(0, &line);
        }
        w.doc(0, &format!("* Subscription: {}", plan.def.event_subscription));
        w.doc(0, &format!("* Category: {}", capitalize(&plan.def.category)));
        w.doc(0, &format!("* Complexity: {}/5", plan.def.complexity));
        w.doc(0, &format!("* RPC Version: {}", plan.def.rpc_version));
        w.doc(0, &format!("* Initial Version: {}", plan.def.initial_version));
        w.line(
            0,
            &format!("class {} extends {} {{", plan.class_name, config.event_base()),
        );
        for field in &plan.fields {
            w.doc(1, &sanitize_inline(&field.description));
            w.line(1, &field.accessor());
            w.blank();
        }
        w.line(1, &format!("{}(super.type, super.data);", plan.class_name));
        w.line(0, "}");
        w.blank();
    }

    w.line(0, "// ignore: constant_identifier_names");
    w.line(
        0,
        &format!(
            "const Map<String, {} Function(String type, Map<String, dynamic> data)> eventMap = {{",
            config.event_base()
        ),
    );
    for plan in plans {
        w.line(
            1,
            &format!("\"{}\": {}.new,", plan.def.event_type, plan.class_name),
        );
    }
    w.line(0, "};");

    w.finish()
}

static CLASS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^class (\w+) extends ").unwrap());

/// Class names actually declared in an emitted artifact source.
fn emitted_class_names(source: &str) -> BTreeSet<String> {
    CLASS_RE
        .captures_iter(source)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Every response class a request binding references must be emitted or be
/// the shared generic response.
fn check_response_references(
    plans: &[RequestPlan<'_>],
    emitted: &BTreeSet<String>,
    config: &GeneratorConfig,
) -> Result<(), GenerationError> {
    let generic = config.response_base();
    for plan in plans {
        if plan.response_class != generic && !emitted.contains(&plan.response_class) {
            return Err(GenerationError::Inconsistent(format!(
                "request {} references response class {} which is not emitted",
                plan.def.request_type, plan.response_class
            )));
        }
    }
    Ok(())
}

/// Every dispatch-table key must match an emitted event wrapper, case
/// sensitively.
fn check_dispatch_table(
    plans: &[EventPlan<'_>],
    emitted: &BTreeSet<String>,
) -> Result<(), GenerationError> {
    for plan in plans {
        let expected = format!("{}Event", plan.def.event_type);
        if !emitted.contains(&expected) {
            return Err(GenerationError::Inconsistent(format!(
                "dispatch-table key {} has no matching event wrapper {}",
                plan.def.event_type, expected
            )));
        }
    }
    Ok(())
}
