//! component-prefetch - Chunk prefetch runtime extension for Component
//!
//! Generates the runtime code that lets application code request
//! prefetching of an output chunk (via `<link rel="prefetch">`) before it
//! is actually needed.
//!
//! # Features
//! - Prefetch by chunk name or chunk id
//! - Name -> id translation table embedded only when needed
//! - Idempotent per chunk via the install-state guard
//! - Configurable rel/as/crossorigin/nonce link wiring

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod chunk;
mod cli;
mod config;
mod prefetch;
mod runtime;
mod utils;

pub use cli::Cli;
pub use config::Options;

/// Initialize the logging/tracing system
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("component_prefetch=debug"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("component_prefetch=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    cli.execute()
}
