//! component-prefetch library
//!
//! Runtime code generation for chunk prefetching in the Component build
//! tool: the chunk data model, the runtime template with its extension and
//! link hooks, and the prefetch extension itself.

pub mod chunk;
pub mod cli;
pub mod config;
pub mod prefetch;
pub mod runtime;
pub mod utils;

pub use chunk::{Chunk, ChunkId, ChunkManifest, ChunkTable};
pub use config::Options;
pub use prefetch::PrefetchExtension;
pub use runtime::{RuntimeExtension, RuntimeTemplate};
