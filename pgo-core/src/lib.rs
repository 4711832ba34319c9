//! # pgo Core
//!
//! Core types shared by the schema model and the Go code generator.
//!
//! This crate provides:
//! - Primitive type widths and their Go spellings ([`PrimitiveType`])
//! - Bit-exact primitive values ([`PrimitiveValue`])
//! - Bounds-checked little-endian reads over struct data sections ([`ReadBuffer`])

pub mod buffer;
pub mod types;

pub use buffer::ReadBuffer;
pub use types::{PrimitiveType, PrimitiveValue};
