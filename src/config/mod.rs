//! Configuration handling
//!
//! Parses the `[prefetch]` and `[runtime]` sections of a component.toml
//! style options file. Every field has a default; a missing file means
//! stock behavior.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Options for runtime prefetch generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Options {
    /// Prefetch extension settings
    #[serde(default)]
    pub prefetch: PrefetchOptions,

    /// Runtime output settings
    #[serde(default)]
    pub runtime: RuntimeOptions,
}

impl Options {
    /// Load options from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let options: Options =
            toml::from_str(&content).with_context(|| "Failed to parse component.toml")?;

        options.validate()?;

        Ok(options)
    }

    /// Load options from a TOML file, falling back to defaults when absent
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the options
    fn validate(&self) -> Result<()> {
        if !is_js_identifier(&self.prefetch.function) {
            anyhow::bail!(
                "Prefetch function name '{}' is not a valid JavaScript identifier",
                self.prefetch.function
            );
        }

        if self.prefetch.rel != "prefetch" && self.prefetch.rel != "preload" {
            anyhow::bail!(
                "Unsupported link rel '{}': expected 'prefetch' or 'preload'",
                self.prefetch.rel
            );
        }

        Ok(())
    }
}

/// Check if a name is usable as a JavaScript identifier
fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Settings for the prefetch runtime extension
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefetchOptions {
    /// Name of the function exposed on the runtime require namespace
    #[serde(default = "default_function")]
    pub function: String,

    /// Value for the link `rel` attribute (prefetch or preload)
    #[serde(default = "default_rel")]
    pub rel: String,

    /// Value for the link `as` attribute; empty disables it
    #[serde(default = "default_as", rename = "as")]
    pub as_attr: String,

    /// Value for the link `crossorigin` attribute
    #[serde(default)]
    pub crossorigin: Option<String>,

    /// Forward the runtime nonce to the link element
    #[serde(default = "default_true")]
    pub nonce: bool,
}

impl Default for PrefetchOptions {
    fn default() -> Self {
        Self {
            function: default_function(),
            rel: default_rel(),
            as_attr: default_as(),
            crossorigin: None,
            nonce: true,
        }
    }
}

fn default_function() -> String {
    "pfc".to_string()
}

fn default_rel() -> String {
    "prefetch".to_string()
}

fn default_as() -> String {
    "script".to_string()
}

fn default_true() -> bool {
    true
}

/// Runtime output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeOptions {
    /// Public URL prefix for assets
    #[serde(default = "default_public_path")]
    pub public_path: String,

    /// Filename template for chunk assets
    #[serde(default = "default_chunk_filename")]
    pub chunk_filename: String,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            public_path: default_public_path(),
            chunk_filename: default_chunk_filename(),
        }
    }
}

fn default_public_path() -> String {
    "/".to_string()
}

fn default_chunk_filename() -> String {
    "chunks/[id].[hash].js".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.prefetch.function, "pfc");
        assert_eq!(options.prefetch.rel, "prefetch");
        assert_eq!(options.prefetch.as_attr, "script");
        assert!(options.prefetch.nonce);
        assert_eq!(options.runtime.public_path, "/");
        assert_eq!(options.runtime.chunk_filename, "chunks/[id].[hash].js");
    }

    #[test]
    fn test_parse_sections() {
        let toml = r#"
            [prefetch]
            function = "warm"
            rel = "preload"
            as = "fetch"
            crossorigin = "anonymous"

            [runtime]
            public_path = "/static/"
            chunk_filename = "[id].[hash].js"
        "#;

        let options: Options = toml::from_str(toml).unwrap();
        assert_eq!(options.prefetch.function, "warm");
        assert_eq!(options.prefetch.rel, "preload");
        assert_eq!(options.prefetch.as_attr, "fetch");
        assert_eq!(options.prefetch.crossorigin.as_deref(), Some("anonymous"));
        assert_eq!(options.runtime.public_path, "/static/");
    }

    #[test]
    fn test_validate_function_name() {
        let mut options = Options::default();
        options.prefetch.function = "123abc".to_string();
        assert!(options.validate().is_err());

        options.prefetch.function = "$prefetch_1".to_string();
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validate_rel() {
        let mut options = Options::default();
        options.prefetch.rel = "stylesheet".to_string();
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_is_js_identifier() {
        assert!(is_js_identifier("pfc"));
        assert!(is_js_identifier("_x$1"));
        assert!(!is_js_identifier(""));
        assert!(!is_js_identifier("1up"));
        assert!(!is_js_identifier("pre-fetch"));
    }
}
