//! Prelude module for convenient imports.
//!
//! ```ignore
//! use pgo::prelude::*;
//! ```

// Schema types
pub use pgo_schema::{
    AnnotationCatalog, CodeGeneratorRequest, SchemaError, SchemaIr, load_request, parse_request,
    read_request,
};

// Codegen types
pub use pgo_codegen::{
    CodegenError, GeneratedFile, Generator, GeneratorOptions, Gofmt, Limitation, SourceFormatter,
    Strictness, Unformatted, generate_from_file, generate_from_json,
};
