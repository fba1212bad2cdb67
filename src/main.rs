//! modelreg CLI
//!
//! Thin front-end over the library: list the effective registrations,
//! validate them before an evaluation run, or print the manifest JSON
//! schema for editor tooling.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use modelreg::source::{self, JsonFileSource, ManifestSource};
use modelreg::storage::manifest::manifest_schema;
use modelreg::system::gpu;
use modelreg::types::manifest::Manifest;
use modelreg::validate;

#[derive(Parser)]
#[command(name = "modelreg")]
#[command(about = "Model registration manifests for evaluation runs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the effective registrations
    List {
        /// Manifest file to read instead of the global/local layers
        manifest: Option<PathBuf>,
    },
    /// Check registrations before a run
    Validate {
        /// Manifest file to read instead of the global/local layers
        manifest: Option<PathBuf>,
    },
    /// Print the manifest JSON schema
    Schema,
}

async fn resolve_manifest(path: Option<&Path>) -> Result<Manifest, source::ManifestError> {
    match path {
        Some(path) => {
            let file = JsonFileSource::new(path);
            let origin = file.describe();
            Ok(Manifest::new(file.load().await?, origin))
        }
        None => source::load_effective_manifest().await,
    }
}

async fn cmd_list(path: Option<&Path>) -> ExitCode {
    let manifest = match resolve_manifest(path).await {
        Ok(manifest) => manifest,
        Err(e) => {
            tracing::error!("Failed to load manifest: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("# {} ({} registration(s))", manifest.origin(), manifest.len());
    for model in manifest.models() {
        println!(
            "{}  type={}  path={}  max_out_len={}  batch_size={}  num_gpus={}",
            model.abbr,
            model.kind,
            model.path,
            model.max_out_len,
            model.batch_size,
            model.run_cfg.num_gpus
        );
    }
    ExitCode::SUCCESS
}

async fn cmd_validate(path: Option<&Path>) -> ExitCode {
    let manifest = match resolve_manifest(path).await {
        Ok(manifest) => manifest,
        Err(e) => {
            tracing::error!("Failed to load manifest: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = validate::validate_models(manifest.models()) {
        tracing::error!("Validation failed: {}", e);
        return ExitCode::FAILURE;
    }

    // Resource fit is advisory: the authoring machine is rarely the run
    // machine, so a shortfall here is a warning, not a failure.
    let inventory = gpu::detect_inventory();
    if let Err(e) = validate::validate_resources(manifest.models(), &inventory) {
        tracing::warn!("Resource check: {}", e);
    }

    println!(
        "OK: {} registration(s) valid ({})",
        manifest.len(),
        manifest.origin()
    );
    ExitCode::SUCCESS
}

fn cmd_schema() -> ExitCode {
    match manifest_schema() {
        Ok(schema) => match serde_json::to_string_pretty(&schema) {
            Ok(text) => {
                println!("{}", text);
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!("Failed to render schema: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            tracing::error!("Failed to build schema: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::List { manifest } => cmd_list(manifest.as_deref()).await,
        Commands::Validate { manifest } => cmd_validate(manifest.as_deref()).await,
        Commands::Schema => cmd_schema(),
    }
}
