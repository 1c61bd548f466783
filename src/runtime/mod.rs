//! Runtime template generation
//!
//! Assembles the generated runtime bootstrap and exposes the hook
//! surfaces extensions attach to:
//! - `RuntimeExtension`: appends code to the require-extensions slot
//! - `LinkRenderer`: yields `<link>` element construction statements

mod link;
mod template;

use anyhow::Result;
use indexmap::IndexMap;
use tracing::debug;

use crate::chunk::{ChunkKind, ChunkTable};

pub use link::{DefaultLinkRenderer, LinkRenderer};
pub use template::CodeBuilder;

/// A runtime extension appends code to the generated bootstrap
///
/// Extensions run in registration order during a single generation pass.
/// Each receives the source accumulated by its predecessors and returns
/// that source with its own addition appended; the host guarantees at most
/// one invocation per chunk universe per build. Implementations must not
/// perform I/O or retain any of their inputs.
pub trait RuntimeExtension: Send + Sync {
    /// Extension name for logging and the generated comment header
    fn name(&self) -> &str;

    /// Append this extension's runtime code to the accumulated source
    fn render(
        &self,
        source: &str,
        table: &ChunkTable,
        template: &RuntimeTemplate,
        hash: &str,
    ) -> Result<String>;
}

/// The runtime template
///
/// Owns the symbol names and output settings the generated code refers to,
/// plus the registered extensions and the link hook. Mirrors the runtime
/// header the bundler emits, extended with a chunk install-state table.
pub struct RuntimeTemplate {
    /// Symbol of the runtime require function
    pub require_fn: String,

    /// Symbol of the chunk install-state table
    ///
    /// Per chunk id: absent = not requested, `null` = pending, `0` = installed.
    pub installed_table: String,

    /// Public URL prefix assets are served from
    pub public_path: String,

    /// Filename template for chunk assets; `[id]` and `[hash]` are replaced
    pub chunk_filename: String,

    /// Registered runtime extensions, in registration order
    extensions: Vec<Box<dyn RuntimeExtension>>,

    /// Link element construction hook
    link_renderer: Box<dyn LinkRenderer>,
}

impl Default for RuntimeTemplate {
    fn default() -> Self {
        Self {
            require_fn: "__component_require__".to_string(),
            installed_table: "__component_installed__".to_string(),
            public_path: "/".to_string(),
            chunk_filename: "chunks/[id].[hash].js".to_string(),
            extensions: Vec::new(),
            link_renderer: Box::new(DefaultLinkRenderer::default()),
        }
    }
}

impl RuntimeTemplate {
    /// Create a template with default symbols and output settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a runtime extension
    pub fn register(&mut self, extension: Box<dyn RuntimeExtension>) {
        self.extensions.push(extension);
    }

    /// Replace the link construction hook
    pub fn set_link_renderer(&mut self, renderer: Box<dyn LinkRenderer>) {
        self.link_renderer = renderer;
    }

    /// Invoke the link construction hook
    pub fn link_prefetch(&self, source: &str, table: &ChunkTable, hash: &str) -> String {
        self.link_renderer.link_prefetch(source, table, self, hash)
    }

    /// The JavaScript expression computing a chunk asset URL
    ///
    /// `[id]` becomes a runtime reference to the `chunkId` variable and
    /// `[hash]` the literal build hash, prefixed with the runtime public
    /// path variable.
    pub fn chunk_url_expression(&self, hash: &str) -> String {
        let filename = self
            .chunk_filename
            .replace("[hash]", hash)
            .replace("[id]", "\" + chunkId + \"");
        format!("{}.p + \"{}\"", self.require_fn, filename)
    }

    /// Fold all registered extensions over the require-extensions slot
    pub fn render_require_extensions(&self, table: &ChunkTable, hash: &str) -> Result<String> {
        let mut source = String::new();
        for extension in &self.extensions {
            debug!("Rendering runtime extension: {}", extension.name());
            source = extension.render(&source, table, self, hash)?;
        }
        Ok(source)
    }

    /// Render the full runtime bootstrap for a chunk universe
    pub fn render_bootstrap(&self, table: &ChunkTable, hash: &str) -> Result<String> {
        debug!("Rendering runtime bootstrap for {} chunk(s)", table.len());

        // Entry chunks ship with the bootstrap and start out installed.
        let mut installed: IndexMap<String, u8> = IndexMap::new();
        for chunk in table.chunks() {
            if chunk.kind == ChunkKind::Entry {
                installed.insert(chunk.id.key(), 0);
            }
        }

        let mut code = CodeBuilder::new();
        code.line("// Component Runtime");
        code.line("(function() {");
        code.indent();
        code.line("var __component_modules__ = {};");
        code.line("var __component_cache__ = {};");
        code.line(format!(
            "var {} = {};",
            self.installed_table,
            serde_json::to_string(&installed)?
        ));
        code.blank();
        code.line(format!("function {}(moduleId) {{", self.require_fn));
        code.indent();
        code.line("if (__component_cache__[moduleId]) {");
        code.indent();
        code.line("return __component_cache__[moduleId].exports;");
        code.dedent();
        code.line("}");
        code.blank();
        code.line("var module = { exports: {} };");
        code.line("__component_cache__[moduleId] = module;");
        code.blank();
        code.line("var moduleFn = __component_modules__[moduleId];");
        code.line("if (moduleFn) {");
        code.indent();
        code.line(format!("moduleFn(module, module.exports, {});", self.require_fn));
        code.dedent();
        code.line("}");
        code.blank();
        code.line("return module.exports;");
        code.dedent();
        code.line("}");
        code.blank();
        code.line(format!(
            "{}.p = {};",
            self.require_fn,
            serde_json::Value::from(self.public_path.as_str())
        ));

        let extensions = self.render_require_extensions(table, hash)?;
        if !extensions.is_empty() {
            code.lines(&extensions);
        }

        code.blank();
        code.line("window.__component_modules__ = __component_modules__;");
        code.line(format!("window.{} = {};", self.require_fn, self.require_fn));
        code.dedent();
        code.line("})();");

        Ok(code.build())
    }
}
