//! Link element construction hook
//!
//! Runtime extensions that request chunk assets ahead of time splice in a
//! `<link>` element built by this hook. The default renderer produces the
//! same element wiring the chunk-loading runtime uses: rel/as attributes,
//! optional crossorigin, and nonce forwarding for CSP setups.

use super::template::CodeBuilder;
use super::RuntimeTemplate;
use crate::chunk::ChunkTable;
use crate::config::PrefetchOptions;

/// Hook that yields the statements constructing a chunk `<link>` element
///
/// Receives the waterfall source accumulated so far (empty for the first
/// caller), the chunk universe, and the build hash; returns the statements
/// as text. The statements must leave the element in a `link` variable so
/// the caller can attach it.
pub trait LinkRenderer: Send + Sync {
    fn link_prefetch(&self, source: &str, table: &ChunkTable, template: &RuntimeTemplate, hash: &str)
        -> String;
}

/// Default link renderer
#[derive(Debug, Clone)]
pub struct DefaultLinkRenderer {
    /// Value for the `rel` attribute (`prefetch` or `preload`)
    pub rel: String,

    /// Value for the `as` attribute
    pub as_attr: String,

    /// Value for the `crossorigin` attribute, if any
    pub cross_origin: Option<String>,

    /// Forward the runtime nonce to the element for CSP
    pub nonce: bool,
}

impl Default for DefaultLinkRenderer {
    fn default() -> Self {
        Self {
            rel: "prefetch".to_string(),
            as_attr: "script".to_string(),
            cross_origin: None,
            nonce: true,
        }
    }
}

impl DefaultLinkRenderer {
    /// Build a renderer from the `[prefetch]` options section
    pub fn from_options(options: &PrefetchOptions) -> Self {
        Self {
            rel: options.rel.clone(),
            as_attr: options.as_attr.clone(),
            cross_origin: options.crossorigin.clone(),
            nonce: options.nonce,
        }
    }
}

impl LinkRenderer for DefaultLinkRenderer {
    fn link_prefetch(
        &self,
        source: &str,
        _table: &ChunkTable,
        template: &RuntimeTemplate,
        hash: &str,
    ) -> String {
        let mut code = CodeBuilder::new();
        if !source.is_empty() {
            code.lines(source);
        }

        code.line(r#"var link = document.createElement("link");"#);
        if let Some(cross_origin) = &self.cross_origin {
            code.line(format!("link.crossOrigin = {};", js_string(cross_origin)));
        }
        if self.nonce {
            code.line(format!("if ({}.nc) {{", template.require_fn));
            code.indent();
            code.line(format!(
                r#"link.setAttribute("nonce", {}.nc);"#,
                template.require_fn
            ));
            code.dedent();
            code.line("}");
        }
        code.line(format!("link.rel = {};", js_string(&self.rel)));
        if !self.as_attr.is_empty() {
            code.line(format!("link.as = {};", js_string(&self.as_attr)));
        }
        code.line(format!("link.href = {};", template.chunk_url_expression(hash)));

        code.build()
    }
}

/// Render a string as a JavaScript string literal
fn js_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}
