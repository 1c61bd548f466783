//! Render command implementation

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tracing::info;

use crate::chunk::ChunkManifest;
use crate::config::Options;
use crate::prefetch::PrefetchExtension;
use crate::runtime::{DefaultLinkRenderer, RuntimeTemplate};
use crate::utils;

/// Render the runtime bootstrap for a chunk manifest
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Chunk manifest file
    #[arg(default_value = "dist/chunks.json")]
    pub manifest: PathBuf,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the build hash
    #[arg(long)]
    pub hash: Option<String>,
}

impl RenderCommand {
    pub fn execute(&self, config_path: &str) -> Result<()> {
        let start = Instant::now();

        info!("Loading options from {}", config_path);
        let options = Options::load_or_default(config_path)?;

        let content = fs::read_to_string(&self.manifest).with_context(|| {
            format!("Failed to read chunk manifest: {}", self.manifest.display())
        })?;
        let manifest: ChunkManifest = serde_json::from_str(&content).with_context(|| {
            format!("Failed to parse chunk manifest: {}", self.manifest.display())
        })?;

        // Hash preference: flag, then manifest, then the manifest bytes.
        let hash = self
            .hash
            .clone()
            .or_else(|| manifest.hash.clone())
            .unwrap_or_else(|| utils::hash_content(content.as_bytes()));

        let table = manifest.into_table();

        let mut template = RuntimeTemplate::new();
        template.public_path = options.runtime.public_path.clone();
        template.chunk_filename = options.runtime.chunk_filename.clone();
        template.set_link_renderer(Box::new(DefaultLinkRenderer::from_options(
            &options.prefetch,
        )));
        template.register(Box::new(PrefetchExtension::new(options.prefetch.clone())));

        let bootstrap = template.render_bootstrap(&table, &hash)?;

        match &self.output {
            Some(path) => {
                fs::write(path, &bootstrap)
                    .with_context(|| format!("Failed to write runtime: {}", path.display()))?;

                eprintln!(
                    "{} Rendered runtime for {} chunk(s) in {:.2}s\n",
                    "✓".green().bold(),
                    table.len(),
                    start.elapsed().as_secs_f64()
                );
                eprintln!(
                    "  {} {} {}\n",
                    "•".dimmed(),
                    path.display().to_string().cyan(),
                    utils::format_size(bootstrap.len()).dimmed()
                );
            }
            None => {
                println!("{}", bootstrap);
            }
        }

        Ok(())
    }
}
