//! Bounds-checked buffer reads for encoded struct data sections.
//!
//! This module provides:
//! - [`ReadBuffer`] trait for read-only, little-endian primitive access
//! - Slot reads that follow the wire layout rules for struct fields
//!
//! Unlike a zero-copy decoder, every read here is checked: a data section
//! encoded by an older schema may be shorter than the current layout, and
//! bytes past its end read as zero.

use crate::types::{PrimitiveType, PrimitiveValue};

/// Trait for read-only buffer access with checked primitive reads.
///
/// All read methods use little-endian byte order and return `None` when the
/// requested range falls outside the buffer.
pub trait ReadBuffer {
    /// Returns the buffer as a byte slice.
    fn as_slice(&self) -> &[u8];

    /// Returns the length of the buffer in bytes.
    fn len(&self) -> usize;

    /// Returns true if the buffer is empty.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads a u8 at the given byte offset.
    #[inline]
    fn get_u8(&self, offset: usize) -> Option<u8> {
        self.as_slice().get(offset).copied()
    }

    /// Reads a u16 in little-endian at the given byte offset.
    #[inline]
    fn get_u16_le(&self, offset: usize) -> Option<u16> {
        let bytes = self.get_bytes(offset, 2)?;
        Some(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Reads a u32 in little-endian at the given byte offset.
    #[inline]
    fn get_u32_le(&self, offset: usize) -> Option<u32> {
        let bytes = self.get_bytes(offset, 4)?;
        Some(u32::from_le_bytes(bytes.try_into().ok()?))
    }

    /// Reads a u64 in little-endian at the given byte offset.
    #[inline]
    fn get_u64_le(&self, offset: usize) -> Option<u64> {
        let bytes = self.get_bytes(offset, 8)?;
        Some(u64::from_le_bytes(bytes.try_into().ok()?))
    }

    /// Reads a single bit, counting from the least significant bit of byte 0.
    #[inline]
    fn get_bit(&self, bit_offset: usize) -> Option<bool> {
        let byte = self.get_u8(bit_offset / 8)?;
        Some((byte >> (bit_offset % 8)) & 1 != 0)
    }

    /// Returns `len` bytes starting at `offset`.
    #[inline]
    fn get_bytes(&self, offset: usize, len: usize) -> Option<&[u8]> {
        let end = offset.checked_add(len)?;
        self.as_slice().get(offset..end)
    }

    /// Reads a struct slot of the given type.
    ///
    /// `slot_offset` counts in units of the type's own width (bits for
    /// booleans), as slot offsets do in a schema. Slots that lie past the end
    /// of the buffer read as zero.
    fn read_slot(&self, ty: PrimitiveType, slot_offset: u32) -> PrimitiveValue {
        let index = slot_offset as usize;
        let bits = match ty {
            PrimitiveType::Bool => self.get_bit(index).map(u64::from),
            _ => index.checked_mul(ty.size()).and_then(|at| match ty.size() {
                1 => self.get_u8(at).map(u64::from),
                2 => self.get_u16_le(at).map(u64::from),
                4 => self.get_u32_le(at).map(u64::from),
                _ => self.get_u64_le(at),
            }),
        };
        PrimitiveValue::from_bits(ty, bits.unwrap_or(0))
    }

    /// Reads a struct slot and applies the field's default value.
    ///
    /// Encoded slots hold the field value XOR its declared default, so a
    /// zeroed data section decodes to the defaults.
    fn read_slot_with_default(
        &self,
        ty: PrimitiveType,
        slot_offset: u32,
        default: Option<PrimitiveValue>,
    ) -> PrimitiveValue {
        let raw = self.read_slot(ty, slot_offset);
        match default {
            Some(default) => PrimitiveValue::from_bits(ty, raw.to_bits() ^ default.to_bits()),
            None => raw,
        }
    }
}

/// Implement ReadBuffer for byte slices.
impl ReadBuffer for [u8] {
    #[inline(always)]
    fn as_slice(&self) -> &[u8] {
        self
    }

    #[inline(always)]
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }
}

/// Implement ReadBuffer for `Vec<u8>`.
impl ReadBuffer for Vec<u8> {
    #[inline(always)]
    fn as_slice(&self) -> &[u8] {
        self
    }

    #[inline(always)]
    fn len(&self) -> usize {
        Vec::len(self)
    }
}
