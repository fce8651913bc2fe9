//! obsgen CLI entrypoint
//! Parses command-line arguments and dispatches to the binding generator.
#![deny(unsafe_code)]

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use obsgen::generation::{GeneratorConfig, generate};
use obsgen::output::write_artifacts;
use obsgen::schema::{CompositeSchemaLoader, SchemaLoader};

const DEFAULT_SCHEMA_URL: &str =
    "https://raw.githubusercontent.com/obsproject/obs-websocket/master/docs/generated/protocol.json";

#[derive(Parser)]
#[command(name = "obsgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path or URL of the obs-websocket protocol schema (JSON)
    #[arg(long, default_value = DEFAULT_SCHEMA_URL)]
    schema: String,
    /// Output directory for the generated Dart sources
    #[arg(long, default_value = "lib/src/protocol")]
    output_dir: PathBuf,
    /// Enum types to skip entirely (repeatable)
    #[arg(long = "exclude-enum")]
    exclude_enums: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let cli = Cli::parse();
    info!(schema = %cli.schema, "Loading protocol schema");

    let loader = CompositeSchemaLoader::new();
    let schema = loader
        .load(&cli.schema)
        .await
        .context("Failed to load protocol schema")?;

    info!(
        requests = schema.requests.len(),
        enums = schema.enums.len(),
        events = schema.events.len(),
        "Schema loaded"
    );

    let config = GeneratorConfig {
        output_dir: cli.output_dir,
        excluded_enums: cli.exclude_enums.into_iter().collect::<BTreeSet<_>>(),
        ..Default::default()
    };

    let artifacts = generate(&schema, &config).context("Failed to generate bindings")?;
    write_artifacts(&artifacts)
        .await
        .context("Failed to write artifacts")?;

    info!(
        output_dir = %config.output_dir.display(),
        artifacts = artifacts.len(),
        "Successfully generated Dart bindings"
    );
    Ok(())
}
