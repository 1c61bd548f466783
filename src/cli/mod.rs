//! Command-line interface for component-prefetch
//!
//! Provides the main CLI structure using clap with subcommands for:
//! - `render`: render the runtime bootstrap for a chunk manifest
//! - `map`: inspect the id/name maps a manifest produces

mod map;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

pub use map::MapCommand;
pub use render::RenderCommand;

/// Chunk prefetch runtime extension for the Component build tool
#[derive(Parser, Debug)]
#[command(name = "component-prefetch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to component.toml config file
    #[arg(short, long, global = true, default_value = "component.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the runtime bootstrap for a chunk manifest
    Render(RenderCommand),

    /// Show the id/name maps and whether a translation table embeds
    Map(MapCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(&self) -> Result<()> {
        print_banner();

        match &self.command {
            Commands::Render(cmd) => cmd.execute(&self.config),
            Commands::Map(cmd) => cmd.execute(),
        }
    }
}

/// Print the component-prefetch banner
fn print_banner() {
    eprintln!(
        "\n{} {} {}\n",
        "⚡".cyan(),
        "Component Prefetch".bold().cyan(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
}
