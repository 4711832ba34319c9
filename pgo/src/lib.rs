//! # pgo
//!
//! Cap'n Proto compiler plugin that generates Go source.
//!
//! For every requested schema file pgo emits one Go file holding plain Go
//! structs and enums, constants, field tags driven by codec and constraint
//! annotations, and `WriteJSON`/`MarshalJSON` methods.
//!
//! ## Quick Start
//!
//! ```ignore
//! use pgo::prelude::*;
//! use std::path::Path;
//!
//! let request = load_request(Path::new("request.json"))?;
//! let ir = SchemaIr::from_request(request, AnnotationCatalog::default())?;
//! for file in Generator::new(&ir, GeneratorOptions::default()).generate()? {
//!     file.write(Path::new("out"), &Unformatted)?;
//! }
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Primitive types and fixed-width slot reads
//! - [`schema`] - Request model, registry and name resolution
//! - [`codegen`] - Go code generation
//! - [`config`] - TOML configuration for the `capnpc-pgo` binary

pub mod config;
pub mod prelude;

/// Primitive types and data section reads.
pub mod core {
    pub use pgo_core::*;
}

/// Request model, registry and name resolution.
pub mod schema {
    pub use pgo_schema::*;
}

/// Go code generation.
pub mod codegen {
    pub use pgo_codegen::*;
}
