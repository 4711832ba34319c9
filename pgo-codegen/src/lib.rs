//! # pgo Codegen
//!
//! Go code generation from Cap'n Proto code generator requests.
//!
//! This crate provides:
//! - Go type mapping and literal reconstruction for constants and defaults
//! - Enum, struct, constant and annotation declarations
//! - Field tags driven by codec and constraint annotations
//! - JSON writer generation
//! - Per-file generation with accumulated imports and a formatting seam

pub mod error;
pub mod format;
pub mod generator;
pub mod go;
pub mod options;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::CodegenError;
pub use format::{Gofmt, SourceFormatter, Unformatted};
pub use generator::{GeneratedFile, Generator, output_path};
pub use options::{GeneratorOptions, Limitation, Strictness};

use pgo_schema::{AnnotationCatalog, SchemaIr};

/// Generates Go sources for every requested file of a JSON-rendered request.
///
/// # Arguments
/// * `json` - Decoded code generator request rendered as JSON
/// * `catalog` - Annotation ids to recognise
/// * `options` - Generator options
///
/// # Returns
/// One generated file per requested schema file, in request order.
///
/// # Errors
/// Returns `CodegenError` if loading, resolution, or generation fails.
pub fn generate_from_json(
    json: &str,
    catalog: AnnotationCatalog,
    options: GeneratorOptions,
) -> Result<Vec<GeneratedFile>, CodegenError> {
    let request = pgo_schema::parse_request(json)?;
    let ir = SchemaIr::from_request(request, catalog)?;
    Generator::new(&ir, options).generate()
}

/// Generates Go sources from a JSON-rendered request stored in a file.
///
/// # Errors
/// Returns `CodegenError` if reading, loading, or generation fails.
pub fn generate_from_file(
    path: &std::path::Path,
    catalog: AnnotationCatalog,
    options: GeneratorOptions,
) -> Result<Vec<GeneratedFile>, CodegenError> {
    let json = std::fs::read_to_string(path)?;
    generate_from_json(&json, catalog, options)
}
