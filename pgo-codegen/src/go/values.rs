//! Literal reconstruction for constants and default values.
//!
//! Primitive values come straight from the decoded value union. Struct values
//! are read field by field out of their encoded data section: each primitive
//! slot is fetched at its offset scaled by the slot width (bits for bool),
//! XORed with the slot's own default, and text slots are taken from the
//! pointer section. Nothing else is decoded.

use crate::error::CodegenError;
use crate::go::scope::EmitScope;
use crate::go::types::check_default;
use crate::go::{PLACEHOLDER, field_name, go_quote, member_const};
use pgo_core::{PrimitiveType, PrimitiveValue, ReadBuffer};
use pgo_schema::{ListValue, Pointer, StructValue, Type, Value};
use std::fmt::Display;

/// Returns true if a value can appear in a Go `const` declaration.
///
/// Floats that Go constants cannot carry bit-for-bit (NaN, infinities and
/// negative zero) are built from their bit pattern at run time instead.
#[must_use]
pub fn is_constant_expressible(value: &Value) -> bool {
    match value {
        Value::Bool(_)
        | Value::Int8(_)
        | Value::Int16(_)
        | Value::Int32(_)
        | Value::Int64(_)
        | Value::Uint8(_)
        | Value::Uint16(_)
        | Value::Uint32(_)
        | Value::Uint64(_)
        | Value::Text(_)
        | Value::Enum(_) => true,
        Value::Float32(f) => is_plain_float(f64::from(*f)),
        Value::Float64(f) => is_plain_float(*f),
        _ => false,
    }
}

fn is_plain_float(f: f64) -> bool {
    f.is_finite() && !(f == 0.0 && f.is_sign_negative())
}

fn bytes_literal(data: &[u8]) -> String {
    list_literal("byte", data)
}

fn list_literal<T: Display>(go_type: &str, items: &[T]) -> String {
    let items: Vec<String> = items.iter().map(ToString::to_string).collect();
    format!("[]{go_type}{{{}}}", items.join(", "))
}

impl EmitScope<'_> {
    /// Renders a constant or default value as a Go expression.
    ///
    /// # Errors
    /// Returns `CodegenError::ValueMismatch` if the value's kind disagrees
    /// with `ty`, `CodegenError::Unsupported` for unsupported shapes in strict
    /// mode, or a schema error for unresolvable references.
    pub fn literal(&mut self, ty: &Type, value: &Value, context: &str) -> Result<String, CodegenError> {
        match (ty, value) {
            (Type::Void, Value::Void) => Ok("struct{}{}".to_string()),
            (Type::Interface { .. }, Value::Interface | Value::Void)
            | (Type::AnyPointer, Value::AnyPointer | Value::Void) => {
                Ok("interface{}(nil)".to_string())
            }
            (Type::Text, Value::Text(text)) => Ok(go_quote(text)),
            (Type::Data, Value::Data(data)) => Ok(bytes_literal(data)),
            (Type::Enum { type_id }, Value::Enum(ordinal)) => self.enum_literal(*type_id, *ordinal),
            (Type::Struct { type_id }, Value::Struct(encoded)) => {
                self.struct_literal(*type_id, encoded, context)
            }
            (Type::List { element_type }, Value::List(list)) => {
                self.list_value(element_type, list, context)
            }
            _ => match value.as_primitive() {
                Some(primitive) if ty.accepts(value) => Ok(self.primitive_literal(primitive)),
                _ => Err(CodegenError::value_mismatch(
                    context,
                    ty.kind_name(),
                    value.kind_name(),
                )),
            },
        }
    }

    /// Renders a primitive value as a typed Go expression.
    pub fn primitive_literal(&mut self, value: PrimitiveValue) -> String {
        match value {
            PrimitiveValue::Bool(b) => b.to_string(),
            PrimitiveValue::Float32(f) => format!("float32({})", self.float32_element(f)),
            PrimitiveValue::Float64(f) => format!("float64({})", self.float64_element(f)),
            other => {
                let ty = other.primitive_type().go_type();
                let digits = match other {
                    PrimitiveValue::Int8(v) => v.to_string(),
                    PrimitiveValue::Int16(v) => v.to_string(),
                    PrimitiveValue::Int32(v) => v.to_string(),
                    PrimitiveValue::Int64(v) => v.to_string(),
                    _ => other.to_bits().to_string(),
                };
                format!("{ty}({digits})")
            }
        }
    }

    fn float32_element(&mut self, f: f32) -> String {
        if is_plain_float(f64::from(f)) {
            format!("{f:?}")
        } else {
            self.import("math");
            format!("math.Float32frombits(0x{:08x})", f.to_bits())
        }
    }

    fn float64_element(&mut self, f: f64) -> String {
        if is_plain_float(f) {
            format!("{f:?}")
        } else {
            self.import("math");
            format!("math.Float64frombits(0x{:016x})", f.to_bits())
        }
    }

    /// Renders an enum ordinal as its enumerant constant.
    ///
    /// Ordinals past the last enumerant are rendered as a conversion of the
    /// raw number, since newer schemas may add enumerants.
    ///
    /// # Errors
    /// Returns a schema error if the enum cannot be found or named.
    pub fn enum_literal(&mut self, type_id: u64, ordinal: u16) -> Result<String, CodegenError> {
        let ir = self.ir();
        let (_, enum_node) = ir.registry().get_enum(type_id)?;
        let scope = self.remote_scope(type_id)?;
        let enum_name = ir.name(type_id)?;

        match enum_node.enumerants.get(usize::from(ordinal)) {
            Some(enumerant) => {
                let name = self
                    .catalog()
                    .name_override(&enumerant.annotations)
                    .unwrap_or(&enumerant.name);
                Ok(format!("{scope}{}", member_const(enum_name, name)))
            }
            None => Ok(format!("{scope}{enum_name}({ordinal})")),
        }
    }

    fn struct_literal(
        &mut self,
        type_id: u64,
        encoded: &StructValue,
        context: &str,
    ) -> Result<String, CodegenError> {
        let ir = self.ir();
        let catalog = self.catalog();
        let (_, node) = ir.registry().get_struct(type_id)?;
        let scope = self.remote_scope(type_id)?;
        let go_name = ir.name(type_id)?;

        let active = node.has_union().then(|| {
            encoded
                .data
                .read_slot(PrimitiveType::Uint16, node.discriminant_offset)
                .to_bits() as u16
        });

        let mut entries = Vec::new();
        let mut incomplete = false;

        if let Some(member) = active.and_then(|d| node.fields.iter().find(|f| f.discriminant_value == d)) {
            entries.push(format!("Which: {scope}{}", member_const(go_name, &member.name)));
        }

        for field in node.code_order_fields() {
            if field.is_union_member() && Some(field.discriminant_value) != active {
                continue;
            }
            let field_context = format!("{context}.{}", field.name);
            let member = field_name(catalog, field);

            let Some(slot) = field.slot() else {
                self.unsupported("group field in struct value", field_context)?;
                incomplete = true;
                continue;
            };

            match &slot.ty {
                Type::Void | Type::Interface { .. } => {}
                Type::Text => {
                    let text = match encoded.pointers.get(slot.offset as usize) {
                        Some(Pointer::Text(text)) => text.as_str(),
                        None | Some(Pointer::Null) => slot.default_value.as_text().unwrap_or(""),
                        Some(other) => {
                            return Err(CodegenError::value_mismatch(
                                field_context,
                                "text",
                                other.kind_name(),
                            ));
                        }
                    };
                    entries.push(format!("{member}: {}", go_quote(text)));
                }
                ty => match ty.primitive() {
                    Some(primitive) => {
                        check_default(ty, &slot.default_value, &field_context)?;
                        let value = encoded.data.read_slot_with_default(
                            primitive,
                            slot.offset,
                            slot.default_value.as_primitive(),
                        );
                        entries.push(format!("{member}: {}", self.primitive_literal(value)));
                    }
                    None => {
                        self.unsupported("non-primitive field in struct value", field_context)?;
                        incomplete = true;
                    }
                },
            }
        }

        let mut literal = format!("{scope}{go_name}{{{}", entries.join(", "));
        if incomplete {
            if !entries.is_empty() {
                literal.push(' ');
            }
            literal.push_str(PLACEHOLDER);
        }
        literal.push('}');
        Ok(literal)
    }

    fn list_value(
        &mut self,
        element: &Type,
        list: &ListValue,
        context: &str,
    ) -> Result<String, CodegenError> {
        Ok(match (element, list) {
            (Type::Void | Type::Interface { .. }, ListValue::Void(n) | ListValue::Pointer(n)) => {
                format!("make([]struct{{}}, {n})")
            }
            (Type::Bool, ListValue::Bool(v)) => list_literal("bool", v),
            (Type::Int8, ListValue::Int8(v)) => list_literal("int8", v),
            (Type::Int16, ListValue::Int16(v)) => list_literal("int16", v),
            (Type::Int32, ListValue::Int32(v)) => list_literal("int32", v),
            (Type::Int64, ListValue::Int64(v)) => list_literal("int64", v),
            (Type::Uint8, ListValue::Uint8(v)) => list_literal("uint8", v),
            (Type::Uint16, ListValue::Uint16(v)) => list_literal("uint16", v),
            (Type::Uint32, ListValue::Uint32(v)) => list_literal("uint32", v),
            (Type::Uint64, ListValue::Uint64(v)) => list_literal("uint64", v),
            (Type::Float32, ListValue::Float32(v)) => {
                let items: Vec<String> = v.iter().map(|f| self.float32_element(*f)).collect();
                list_literal("float32", &items)
            }
            (Type::Float64, ListValue::Float64(v)) => {
                let items: Vec<String> = v.iter().map(|f| self.float64_element(*f)).collect();
                list_literal("float64", &items)
            }
            (Type::Text, ListValue::Text(v)) => {
                let items: Vec<String> = v.iter().map(|t| go_quote(t)).collect();
                list_literal("string", &items)
            }
            (Type::Data, ListValue::Data(v)) => {
                let items: Vec<String> = v.iter().map(|d| bytes_literal(d)).collect();
                list_literal("[]byte", &items)
            }
            (Type::Enum { type_id }, ListValue::Enum(v)) => {
                let go_type = self.remote_name(*type_id)?;
                let items = v
                    .iter()
                    .map(|ordinal| self.enum_literal(*type_id, *ordinal))
                    .collect::<Result<Vec<_>, _>>()?;
                list_literal(&go_type, &items)
            }
            (Type::Struct { type_id }, _) => {
                self.unsupported("list of struct value", context)?;
                format!("[]{}{{{PLACEHOLDER}}}", self.remote_name(*type_id)?)
            }
            (Type::List { .. } | Type::AnyPointer, _) => {
                self.unsupported("list of list or pointer value", context)?;
                format!("[]interface{{}}{{{PLACEHOLDER}}}")
            }
            _ => {
                return Err(CodegenError::value_mismatch(
                    context,
                    element.kind_name(),
                    list.kind_name(),
                ));
            }
        })
    }
}
