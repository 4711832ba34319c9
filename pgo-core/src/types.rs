//! Primitive type definitions and helpers.
//!
//! This module maps Cap'n Proto primitive types to their wire widths and to
//! Go type names, and provides a bit-exact value representation used when
//! literal values are reconstructed from encoded data.

/// Cap'n Proto primitive (fixed-width, data-section) types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// Single bit boolean.
    Bool,
    /// Signed 8-bit integer.
    Int8,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 8-bit integer.
    Uint8,
    /// Unsigned 16-bit integer.
    Uint16,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Unsigned 64-bit integer.
    Uint64,
    /// 32-bit floating point.
    Float32,
    /// 64-bit floating point.
    Float64,
}

impl PrimitiveType {
    /// Returns the number of bytes a read of this type touches.
    ///
    /// Booleans occupy a single bit but are read through their enclosing byte.
    #[must_use]
    pub const fn size(&self) -> usize {
        match self {
            Self::Bool | Self::Int8 | Self::Uint8 => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Int32 | Self::Uint32 | Self::Float32 => 4,
            Self::Int64 | Self::Uint64 | Self::Float64 => 8,
        }
    }

    /// Returns the Go type name for this primitive.
    #[must_use]
    pub const fn go_type(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
        }
    }
}

/// A primitive value with its exact bit pattern preserved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrimitiveValue {
    /// Boolean value.
    Bool(bool),
    /// Signed 8-bit value.
    Int8(i8),
    /// Signed 16-bit value.
    Int16(i16),
    /// Signed 32-bit value.
    Int32(i32),
    /// Signed 64-bit value.
    Int64(i64),
    /// Unsigned 8-bit value.
    Uint8(u8),
    /// Unsigned 16-bit value.
    Uint16(u16),
    /// Unsigned 32-bit value.
    Uint32(u32),
    /// Unsigned 64-bit value.
    Uint64(u64),
    /// 32-bit float value.
    Float32(f32),
    /// 64-bit float value.
    Float64(f64),
}

impl PrimitiveValue {
    /// Returns the type of this value.
    #[must_use]
    pub const fn primitive_type(&self) -> PrimitiveType {
        match self {
            Self::Bool(_) => PrimitiveType::Bool,
            Self::Int8(_) => PrimitiveType::Int8,
            Self::Int16(_) => PrimitiveType::Int16,
            Self::Int32(_) => PrimitiveType::Int32,
            Self::Int64(_) => PrimitiveType::Int64,
            Self::Uint8(_) => PrimitiveType::Uint8,
            Self::Uint16(_) => PrimitiveType::Uint16,
            Self::Uint32(_) => PrimitiveType::Uint32,
            Self::Uint64(_) => PrimitiveType::Uint64,
            Self::Float32(_) => PrimitiveType::Float32,
            Self::Float64(_) => PrimitiveType::Float64,
        }
    }

    /// Returns the raw bit pattern, zero-extended to 64 bits.
    #[must_use]
    pub fn to_bits(&self) -> u64 {
        match *self {
            Self::Bool(v) => u64::from(v),
            Self::Int8(v) => u64::from(v as u8),
            Self::Int16(v) => u64::from(v as u16),
            Self::Int32(v) => u64::from(v as u32),
            Self::Int64(v) => v as u64,
            Self::Uint8(v) => u64::from(v),
            Self::Uint16(v) => u64::from(v),
            Self::Uint32(v) => u64::from(v),
            Self::Uint64(v) => v,
            Self::Float32(v) => u64::from(v.to_bits()),
            Self::Float64(v) => v.to_bits(),
        }
    }

    /// Builds a value of the given type from the low bits of `bits`.
    #[must_use]
    pub fn from_bits(ty: PrimitiveType, bits: u64) -> Self {
        match ty {
            PrimitiveType::Bool => Self::Bool(bits & 1 != 0),
            PrimitiveType::Int8 => Self::Int8(bits as u8 as i8),
            PrimitiveType::Int16 => Self::Int16(bits as u16 as i16),
            PrimitiveType::Int32 => Self::Int32(bits as u32 as i32),
            PrimitiveType::Int64 => Self::Int64(bits as i64),
            PrimitiveType::Uint8 => Self::Uint8(bits as u8),
            PrimitiveType::Uint16 => Self::Uint16(bits as u16),
            PrimitiveType::Uint32 => Self::Uint32(bits as u32),
            PrimitiveType::Uint64 => Self::Uint64(bits),
            PrimitiveType::Float32 => Self::Float32(f32::from_bits(bits as u32)),
            PrimitiveType::Float64 => Self::Float64(f64::from_bits(bits)),
        }
    }
}
