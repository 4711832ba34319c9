//! # pgo Schema
//!
//! Schema model and name resolution for the Cap'n Proto to Go generator.
//!
//! This crate provides:
//! - The decoded code generator request model (nodes, fields, types, values)
//! - Request loading from its JSON rendering
//! - A node registry addressed by 64-bit ids
//! - The annotation catalog and per-file codec sets
//! - Name resolution into an intermediate representation for code generation
//! - Presence annotation validation

pub mod annotations;
pub mod error;
pub mod id;
pub mod ir;
pub mod parser;
pub mod registry;
pub mod types;
pub mod validation;

pub use annotations::{AnnotationCatalog, Codec, CodecSet, Presence};
pub use error::{ParseError, SchemaError};
pub use ir::{FileContext, ResolvedName, SchemaIr, capitalize};
pub use parser::{load_request, parse_request, read_request};
pub use registry::NodeRegistry;
pub use types::{
    Annotation, AnnotationNode, CodeGeneratorRequest, ConstNode, EnumNode, Enumerant, Field,
    FieldKind, Group, Import, ListValue, NO_DISCRIMINANT, NestedNode, Node, NodeKind, Pointer,
    RequestedFile, Slot, StructNode, StructValue, Type, Value,
};
pub use validation::{check_presence, validate_file};
