//! Configuration file for the `capnpc-pgo` binary.
//!
//! ```toml
//! strict = false
//! json_writers = true
//! gofmt = true
//! out_dir = "gen"
//!
//! [catalog]
//! json = "0xd8c8b1a5f4e3a2b1"
//! required = "0xa1b2c3d4e5f60718"
//! ```
//!
//! Catalog ids left out keep their defaults and may still be discovered from
//! the request.

use anyhow::{Context, Result};
use pgo_codegen::{GeneratorOptions, Strictness};
use pgo_schema::AnnotationCatalog;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Generator configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Fail on value shapes that would otherwise become placeholders.
    pub strict: bool,
    /// Emit full JSON writers instead of stub `MarshalJSON` methods.
    pub json_writers: bool,
    /// Pipe generated files through `gofmt`.
    pub gofmt: bool,
    /// Output directory; the working directory when unset.
    pub out_dir: Option<PathBuf>,
    /// Annotation ids.
    pub catalog: AnnotationCatalog,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strict: false,
            json_writers: true,
            gofmt: false,
            out_dir: None,
            catalog: AnnotationCatalog::default(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
        Self::from_toml(&content)
    }

    /// Parses the configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }

    /// Returns the generator options this configuration selects.
    #[must_use]
    pub fn options(&self) -> GeneratorOptions {
        let strictness = if self.strict {
            Strictness::Strict
        } else {
            Strictness::Lenient
        };
        GeneratorOptions::default()
            .with_strictness(strictness)
            .with_json_writers(self.json_writers)
    }

    /// Returns the output directory.
    #[must_use]
    pub fn out_dir(&self) -> &Path {
        self.out_dir.as_deref().unwrap_or(Path::new("."))
    }
}
