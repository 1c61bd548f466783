//! Chunk prefetch runtime extension
//!
//! Appends a function to the generated runtime that lets application code
//! request prefetching of a chunk before it is needed, by chunk name or by
//! chunk id. Prefetching emits a `<link rel="prefetch">` element; actually
//! loading the chunk stays with the ordinary chunk load path.

use anyhow::Result;
use indexmap::IndexMap;
use tracing::debug;

use crate::chunk::{ChunkId, ChunkMaps, ChunkTable};
use crate::config::PrefetchOptions;
use crate::runtime::{CodeBuilder, RuntimeExtension, RuntimeTemplate};

/// Name of this extension, used in the generated comment header
pub const EXTENSION_NAME: &str = "prefetch-chunk";

/// Invert an id -> name map into a name -> id map
///
/// Returns the inverted map and whether any id differs from its name. When
/// several ids share a name the last one in iteration order wins; callers
/// depend on that tie-break, so it is kept as is.
pub fn invert_chunk_maps(maps: &ChunkMaps) -> (IndexMap<String, ChunkId>, bool) {
    let mut name_id = IndexMap::new();
    let mut needs_map = false;

    for (id, name) in &maps.name {
        name_id.insert(name.clone(), id.clone());
        if id.key() != *name {
            needs_map = true;
        }
    }

    (name_id, needs_map)
}

/// Runtime extension generating the prefetch function
///
/// The generated function accepts either a chunk name or a chunk id. A
/// name -> id translation table is embedded only when some chunk's id
/// differs from its name; otherwise the argument is used as the id
/// directly. Repeated calls for the same chunk are no-ops thanks to the
/// install-state guard.
pub struct PrefetchExtension {
    options: PrefetchOptions,
}

impl PrefetchExtension {
    /// Create the extension with the given options
    pub fn new(options: PrefetchOptions) -> Self {
        Self { options }
    }
}

impl Default for PrefetchExtension {
    fn default() -> Self {
        Self::new(PrefetchOptions::default())
    }
}

impl RuntimeExtension for PrefetchExtension {
    fn name(&self) -> &str {
        EXTENSION_NAME
    }

    fn render(
        &self,
        source: &str,
        table: &ChunkTable,
        template: &RuntimeTemplate,
        hash: &str,
    ) -> Result<String> {
        let maps = table.chunk_maps();
        let (name_id, needs_map) = invert_chunk_maps(&maps);

        debug!(
            "Generating {} for {} chunk(s), translation table {}",
            EXTENSION_NAME,
            maps.name.len(),
            if needs_map { "embedded" } else { "omitted" }
        );

        let mut code = CodeBuilder::new();
        if !source.is_empty() {
            code.lines(source);
        }
        code.blank();
        code.line(format!("// Prefetch a chunk ({})", EXTENSION_NAME));
        code.line(format!(
            "{}.{} = function prefetchChunk(chunkId) {{",
            template.require_fn, self.options.function
        ));
        code.indent();
        if needs_map {
            code.line(format!(
                "chunkId = {}[chunkId]||chunkId;",
                serde_json::to_string(&name_id)?
            ));
        }
        code.line(format!(
            "if ({}[chunkId] === undefined) {{",
            template.installed_table
        ));
        code.indent();
        code.line(format!("{}[chunkId] = null;", template.installed_table));
        code.lines(&template.link_prefetch("", table, hash));
        code.line("document.head.appendChild(link);");
        code.dedent();
        code.line("}");
        code.dedent();
        code.line("};");

        Ok(code.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::Chunk;
    use pretty_assertions::assert_eq;

    fn render(table: &ChunkTable) -> String {
        let template = RuntimeTemplate::new();
        PrefetchExtension::default()
            .render("", table, &template, "abc123")
            .unwrap()
    }

    fn table_of(chunks: Vec<Chunk>) -> ChunkTable {
        chunks.into_iter().collect()
    }

    #[test]
    fn test_no_translation_table_when_ids_equal_names() {
        let table = table_of(vec![Chunk::async_chunk(1u64, None)]);
        let out = render(&table);

        assert!(!out.contains("[chunkId]||chunkId"));
        assert!(out.contains("if (__component_installed__[chunkId] === undefined) {"));
    }

    #[test]
    fn test_translation_table_embedded_when_any_id_differs() {
        let table = table_of(vec![
            Chunk::async_chunk(1u64, None),
            Chunk::async_chunk(2u64, Some("app".to_string())),
        ]);
        let out = render(&table);

        assert!(out.contains(r#"chunkId = {"1":1,"app":2}[chunkId]||chunkId;"#));
    }

    #[test]
    fn test_inverted_map_last_write_wins() {
        let maps = table_of(vec![
            Chunk::async_chunk(1u64, Some("app".to_string())),
            Chunk::async_chunk(2u64, Some("app".to_string())),
        ])
        .chunk_maps();

        let (name_id, needs_map) = invert_chunk_maps(&maps);
        assert!(needs_map);
        assert_eq!(name_id.len(), 1);
        assert_eq!(name_id.get("app"), Some(&ChunkId::Num(2)));
    }

    #[test]
    fn test_inverted_map_is_inverse_for_injective_input() {
        let maps = table_of(vec![
            Chunk::async_chunk("a", Some("x".to_string())),
            Chunk::async_chunk("b", Some("y".to_string())),
        ])
        .chunk_maps();

        let (name_id, needs_map) = invert_chunk_maps(&maps);
        assert!(needs_map);
        assert_eq!(name_id.get("x"), Some(&ChunkId::from("a")));
        assert_eq!(name_id.get("y"), Some(&ChunkId::from("b")));
    }

    #[test]
    fn test_empty_table_degenerates_to_simple_path() {
        let table = ChunkTable::new();
        let maps = table.chunk_maps();
        let (name_id, needs_map) = invert_chunk_maps(&maps);

        assert!(name_id.is_empty());
        assert!(!needs_map);

        let out = render(&table);
        assert!(!out.contains("||chunkId"));
        assert!(out.contains(".pfc = function prefetchChunk(chunkId) {"));
    }

    #[test]
    fn test_guard_marks_pending_before_emitting_link() {
        let table = table_of(vec![Chunk::async_chunk(2u64, Some("app".to_string()))]);
        let out = render(&table);

        let guard = out.find("=== undefined").unwrap();
        let pending = out.find("__component_installed__[chunkId] = null;").unwrap();
        let append = out.find("document.head.appendChild(link);").unwrap();
        assert!(guard < pending);
        assert!(pending < append);
        assert_eq!(out.matches("appendChild").count(), 1);
    }

    #[test]
    fn test_named_chunk_scenario() {
        let table = table_of(vec![
            Chunk::async_chunk(1u64, None),
            Chunk::async_chunk(2u64, Some("app".to_string())),
        ]);
        let template = RuntimeTemplate::new();
        let out = PrefetchExtension::default()
            .render("", &table, &template, "abc123")
            .unwrap();

        assert_eq!(
            out,
            "\n\
             // Prefetch a chunk (prefetch-chunk)\n\
             __component_require__.pfc = function prefetchChunk(chunkId) {\n\
             \x20\x20chunkId = {\"1\":1,\"app\":2}[chunkId]||chunkId;\n\
             \x20\x20if (__component_installed__[chunkId] === undefined) {\n\
             \x20\x20\x20\x20__component_installed__[chunkId] = null;\n\
             \x20\x20\x20\x20var link = document.createElement(\"link\");\n\
             \x20\x20\x20\x20if (__component_require__.nc) {\n\
             \x20\x20\x20\x20\x20\x20link.setAttribute(\"nonce\", __component_require__.nc);\n\
             \x20\x20\x20\x20}\n\
             \x20\x20\x20\x20link.rel = \"prefetch\";\n\
             \x20\x20\x20\x20link.as = \"script\";\n\
             \x20\x20\x20\x20link.href = __component_require__.p + \"chunks/\" + chunkId + \".abc123.js\";\n\
             \x20\x20\x20\x20document.head.appendChild(link);\n\
             \x20\x20}\n\
             };"
        );
    }

    #[test]
    fn test_unnamed_chunk_scenario() {
        let table = table_of(vec![Chunk::async_chunk(1u64, None)]);
        let out = render(&table);

        assert!(!out.contains("chunkId = {"));
        assert!(!out.contains("||chunkId"));
        assert!(out.contains("link.href = "));
    }

    #[test]
    fn test_previous_source_is_preserved() {
        let table = table_of(vec![Chunk::async_chunk(2u64, Some("app".to_string()))]);
        let template = RuntimeTemplate::new();
        let out = PrefetchExtension::default()
            .render("// earlier extension", &table, &template, "abc123")
            .unwrap();

        assert!(out.starts_with("// earlier extension\n\n// Prefetch a chunk"));
    }

    #[test]
    fn test_custom_function_name() {
        let table = table_of(vec![Chunk::async_chunk(2u64, Some("app".to_string()))]);
        let template = RuntimeTemplate::new();
        let options = PrefetchOptions {
            function: "warm".to_string(),
            ..Default::default()
        };
        let out = PrefetchExtension::new(options)
            .render("", &table, &template, "abc123")
            .unwrap();

        assert!(out.contains("__component_require__.warm = function prefetchChunk(chunkId) {"));
    }
}
