//! # regbindc — regbind CLI
//!
//! Composition root that wires the engine registry together and drives the
//! load → resolve → derive pipeline.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars) and initialise tracing
//! - Load one library description and resolve its bindings
//! - Print the derived accessor declarations, one per line, to stdout
//! - Run the library's declared generators when enabled
//! - On any validation or resolution error, print a single
//!   `Validation error: <message>` line and exit non-zero
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod loader;

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use regbind_adapter_datasheet_md::DatasheetMdGenerator;
use regbind_app::{GenerationService, GeneratorRegistry};
use regbind_domain::accessor::derive_accessors;
use regbind_domain::error::RegbindError;

fn main() -> anyhow::Result<ExitCode> {
    let config = config::Config::load().context("loading configuration")?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: regbindc <library.yaml>");
        return Ok(ExitCode::from(2));
    };

    match run(Path::new(&path), &config) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            println!("{}", failure_line(&err));
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Single-line report printed to stdout when the pipeline fails.
fn failure_line(err: &loader::LoadError) -> String {
    format!("Validation error: {err}")
}

fn run(path: &Path, config: &config::Config) -> Result<(), loader::LoadError> {
    let library = loader::load_library(path)?;
    tracing::info!(
        library = %library.slug,
        devices = library.devices().len(),
        "library description resolved"
    );
    let service = GenerationService::new(engine_registry());

    // Resolve every generator declaration before producing any output, so a
    // bad declaration fails the run up front.
    service
        .registry()
        .resolve_all(&library)
        .map_err(RegbindError::from)?;

    for accessor in derive_accessors(&library) {
        println!("{accessor}");
    }

    if config.generators.enabled {
        service.run(&library)?;
    }
    Ok(())
}

fn engine_registry() -> GeneratorRegistry {
    let mut registry = GeneratorRegistry::new();
    registry.register(
        regbind_adapter_datasheet_md::ENGINE,
        DatasheetMdGenerator::factory,
    );
    registry
}
