//! Generator configuration
//!
//! One emitter, parameterized by an explicit configuration object: output
//! layout, runtime-library naming, and the enum-exclusion set all live here
//! instead of being hard-coded at the emission sites.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::generation::names::camel_to_snake;

/// Configuration for one generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Directory the four artifacts are written into.
    pub output_dir: PathBuf,
    /// Artifact file names, also used for the cross-artifact import.
    pub requests_file: String,
    pub responses_file: String,
    pub enums_file: String,
    pub events_file: String,
    /// Relative import prefix for the runtime base classes.
    pub classes_import_prefix: String,
    /// PascalCase name of the runtime client type the bindings extend.
    pub library_name: String,
    /// Enum types skipped entirely (legacy/vendor-deprecated).
    pub excluded_enums: BTreeSet<String>,
}

impl GeneratorConfig {
    /// Relative import of the runtime library, derived from the library
    /// name: `ObsWebSocket` -> `../obs_websocket.dart`.
    pub fn library_import(&self) -> String {
        format!("../{}.dart", camel_to_snake(&self.library_name))
    }

    /// Base class the request wrappers extend, e.g. `ObsWebSocketRequest`.
    pub fn request_base(&self) -> String {
        format!("{}Request", self.library_name)
    }

    /// Base class the response wrappers extend; also the shared generic
    /// response for requests without response fields.
    pub fn response_base(&self) -> String {
        format!("{}Response", self.library_name)
    }

    /// Base class the event wrappers extend.
    pub fn event_base(&self) -> String {
        format!("{}Event", self.library_name)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("lib/src/protocol"),
            requests_file: "requests.dart".to_string(),
            responses_file: "responses.dart".to_string(),
            enums_file: "enums.dart".to_string(),
            events_file: "events.dart".to_string(),
            classes_import_prefix: "../classes".to_string(),
            library_name: "ObsWebSocket".to_string(),
            excluded_enums: BTreeSet::new(),
        }
    }
}
