//! Chunk data model
//!
//! Mirrors the slice of the bundler's chunk graph that runtime code
//! generation consumes: chunk identities, optional human-readable names,
//! and the per-pass id -> name map.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Unique identifier for an output chunk
///
/// The bundler assigns numeric ids in production builds and string ids for
/// named chunks. Both key the same slot in the runtime's install-state
/// object, so `key()` yields the JavaScript object-key form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChunkId {
    Num(u64),
    Str(String),
}

impl ChunkId {
    /// The JavaScript object-key form of this id
    pub fn key(&self) -> String {
        match self {
            ChunkId::Num(n) => n.to_string(),
            ChunkId::Str(s) => s.clone(),
        }
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkId::Num(n) => write!(f, "{}", n),
            ChunkId::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for ChunkId {
    fn from(n: u64) -> Self {
        ChunkId::Num(n)
    }
}

impl From<&str> for ChunkId {
    fn from(s: &str) -> Self {
        ChunkId::Str(s.to_string())
    }
}

/// Type of chunk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkKind {
    /// Entry point chunk - loaded immediately
    Entry,
    /// Async chunk - loaded on demand via dynamic import
    #[default]
    Async,
    /// Shared chunk - contains modules used by multiple entry points
    Shared,
}

/// A chunk as seen by runtime code generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk identifier
    pub id: ChunkId,

    /// Human-readable chunk name, if the build assigned one
    #[serde(default)]
    pub name: Option<String>,

    /// Type of chunk
    #[serde(default)]
    pub kind: ChunkKind,
}

impl Chunk {
    /// Create a new entry chunk
    pub fn entry(id: impl Into<ChunkId>, name: Option<String>) -> Self {
        Self {
            id: id.into(),
            name,
            kind: ChunkKind::Entry,
        }
    }

    /// Create a new async chunk
    pub fn async_chunk(id: impl Into<ChunkId>, name: Option<String>) -> Self {
        Self {
            id: id.into(),
            name,
            kind: ChunkKind::Async,
        }
    }

    /// Create a new shared chunk
    pub fn shared(id: impl Into<ChunkId>, name: Option<String>) -> Self {
        Self {
            id: id.into(),
            name,
            kind: ChunkKind::Shared,
        }
    }

    /// The chunk's name, falling back to its id key when unnamed
    pub fn name_or_id(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.id.key())
    }
}

/// The universe of chunks reachable from the chunk being finalized
///
/// Rebuilt by the host for each generation pass; insertion order is the
/// host's chunk order and is preserved through to generated output.
#[derive(Debug, Clone, Default)]
pub struct ChunkTable {
    chunks: Vec<Chunk>,
}

impl ChunkTable {
    /// Create a new empty chunk table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a chunk to the table
    pub fn push(&mut self, chunk: Chunk) {
        self.chunks.push(chunk);
    }

    /// Look up a chunk by id
    pub fn get(&self, id: &ChunkId) -> Option<&Chunk> {
        self.chunks.iter().find(|c| &c.id == id)
    }

    /// All chunks in insertion order
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Number of chunks in the table
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Check if table is empty
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Build the id -> name map for this table
    ///
    /// Unnamed chunks map to their own id key.
    pub fn chunk_maps(&self) -> ChunkMaps {
        let mut name = IndexMap::new();
        for chunk in &self.chunks {
            name.insert(chunk.id.clone(), chunk.name_or_id());
        }
        ChunkMaps { name }
    }
}

impl FromIterator<Chunk> for ChunkTable {
    fn from_iter<I: IntoIterator<Item = Chunk>>(iter: I) -> Self {
        Self {
            chunks: iter.into_iter().collect(),
        }
    }
}

/// Per-pass chunk maps supplied to runtime code generation
///
/// Read-only input; the generator never mutates or retains it.
#[derive(Debug, Clone, Default)]
pub struct ChunkMaps {
    /// Chunk id -> chunk name
    pub name: IndexMap<ChunkId, String>,
}

/// On-disk chunk manifest consumed by the CLI
///
/// Emitted by the build alongside the bundles; `hash` is the build's
/// content hash and may be omitted, in which case the caller derives one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkManifest {
    /// Build content hash
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    /// Chunks in build order
    pub chunks: Vec<Chunk>,
}

impl ChunkManifest {
    /// Load a chunk manifest from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read chunk manifest: {}", path.display()))?;

        let manifest: ChunkManifest = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse chunk manifest: {}", path.display()))?;

        Ok(manifest)
    }

    /// Convert the manifest into a chunk table, preserving build order
    pub fn into_table(self) -> ChunkTable {
        self.chunks.into_iter().collect()
    }
}
