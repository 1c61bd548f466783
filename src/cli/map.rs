//! Map inspection command implementation

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::chunk::ChunkManifest;
use crate::prefetch::invert_chunk_maps;

/// Show the id/name maps and whether a translation table embeds
#[derive(Args, Debug)]
pub struct MapCommand {
    /// Chunk manifest file
    #[arg(default_value = "dist/chunks.json")]
    pub manifest: PathBuf,
}

impl MapCommand {
    pub fn execute(&self) -> Result<()> {
        let manifest = ChunkManifest::load(&self.manifest)?;
        let table = manifest.into_table();
        let maps = table.chunk_maps();
        let (name_id, needs_map) = invert_chunk_maps(&maps);

        eprintln!("{}", "id -> name".bold());
        for (id, name) in &maps.name {
            eprintln!("  {} {} -> {}", "•".dimmed(), id.key().cyan(), name);
        }

        eprintln!("\n{}", "name -> id".bold());
        for (name, id) in &name_id {
            eprintln!("  {} {} -> {}", "•".dimmed(), name.cyan(), id.key());
        }

        eprintln!(
            "\ntranslation table: {}\n",
            if needs_map {
                "embedded".green()
            } else {
                "omitted".yellow()
            }
        );

        Ok(())
    }
}
