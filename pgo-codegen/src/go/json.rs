//! JSON writer generation.
//!
//! Every emitted enum and struct gets a `WriteJSON(io.Writer) error` method
//! and a `MarshalJSON` wrapper around it. The writer walks the value the same
//! way the type mapper does: each nested block rebinds `s` to the value being
//! written, so the per-kind statements only ever refer to `s`.
//!
//! Every write is followed by an error check that returns the first failure.

use crate::error::CodegenError;
use crate::go::scope::EmitScope;
use crate::go::{field_name, go_quote, line, member_const};
use pgo_schema::{Field, FieldKind, NodeKind, Type};

const COMMA: &str = "err = b.WriteByte(',')";

/// Generator for `WriteJSON` and `MarshalJSON` methods.
pub struct JsonGenerator<'s, 'a> {
    scope: &'s mut EmitScope<'a>,
}

/// Appends a fallible statement followed by its error check.
fn write(out: &mut String, depth: usize, statement: &str) {
    line(out, depth, statement);
    line(out, depth, "if err != nil {");
    line(out, depth + 1, "return err");
    line(out, depth, "}");
}

impl<'s, 'a> JsonGenerator<'s, 'a> {
    /// Creates a new JSON writer generator emitting into `scope`.
    #[must_use]
    pub fn new(scope: &'s mut EmitScope<'a>) -> Self {
        Self { scope }
    }

    /// Generates the JSON methods for an enum or struct node.
    ///
    /// With JSON writers disabled only a stub `MarshalJSON` is emitted.
    ///
    /// # Errors
    /// Returns `CodegenError` if the node is not an enum or struct, or if a
    /// referenced group cannot be found.
    pub fn generate(&mut self, id: u64) -> Result<String, CodegenError> {
        let ir = self.scope.ir();
        let node = ir.node(id)?;
        let name = ir.name(id)?;
        let mut out = String::new();

        if !self.scope.options().json_writers {
            out.push_str("// JSON writers disabled; MarshalJSON is a stub.\n");
            out.push_str(&format!(
                "func (s {name}) MarshalJSON() (bs []byte, err error) {{ return }}\n\n"
            ));
            return Ok(out);
        }

        for import in ["io", "bufio", "bytes"] {
            self.scope.import(import);
        }

        out.push_str(&format!("func (s {name}) WriteJSON(w io.Writer) error {{\n"));
        line(&mut out, 1, "b := bufio.NewWriter(w)");
        line(&mut out, 1, "var err error");
        line(&mut out, 1, "var buf []byte");
        line(&mut out, 1, "_ = buf");
        match &node.kind {
            NodeKind::Enum(body) => {
                self.scope.import("encoding/json");
                // An enum without enumerants has no String method.
                if body.enumerants.is_empty() {
                    write(&mut out, 1, "buf, err = json.Marshal(uint16(s))");
                } else {
                    write(&mut out, 1, "buf, err = json.Marshal(s.String())");
                }
                write(&mut out, 1, "_, err = b.Write(buf)");
            }
            NodeKind::Struct(_) => self.struct_body(id, 1, &mut out)?,
            other => {
                return Err(CodegenError::generation(format!(
                    "no JSON writer for {} node {name}",
                    other.name()
                )));
            }
        }
        line(&mut out, 1, "err = b.Flush()");
        line(&mut out, 1, "return err");
        out.push_str("}\n\n");

        out.push_str(&format!("func (s {name}) MarshalJSON() ([]byte, error) {{\n"));
        line(&mut out, 1, "b := bytes.Buffer{}");
        line(&mut out, 1, "err := s.WriteJSON(&b)");
        line(&mut out, 1, "return b.Bytes(), err");
        out.push_str("}\n\n");

        tracing::trace!(id, node = name, "json writer");
        Ok(out)
    }

    /// Writes a struct or group as an object, members in code order.
    ///
    /// Union members are guarded by their discriminant, so at most one of
    /// them is written. A separating comma is needed before a member when
    /// a plain member came earlier, or when the active union member did.
    fn struct_body(&mut self, id: u64, depth: usize, out: &mut String) -> Result<(), CodegenError> {
        let ir = self.scope.ir();
        let catalog = self.scope.catalog();
        let (_, node) = ir.registry().get_struct(id)?;
        let owner = ir.name(id)?;

        write(out, depth, "err = b.WriteByte('{')");
        let mut plain_before = false;
        let mut union_before: Vec<String> = Vec::new();

        for field in node.code_order_fields() {
            if matches!(field.slot().map(|s| &s.ty), Some(Type::Interface { .. })) {
                continue;
            }
            let member = field_name(catalog, field);

            if field.is_union_member() {
                let which = member_const(owner, &field.name);
                line(out, depth, &format!("if s.Which == {which} {{"));
                if plain_before {
                    write(out, depth + 1, COMMA);
                }
                self.field(field, &member, depth + 1, out)?;
                line(out, depth, "}");
                union_before.push(which);
            } else {
                if plain_before {
                    write(out, depth, COMMA);
                } else if !union_before.is_empty() {
                    let active: Vec<String> = union_before
                        .iter()
                        .map(|which| format!("s.Which == {which}"))
                        .collect();
                    line(out, depth, &format!("if {} {{", active.join(" || ")));
                    write(out, depth + 1, COMMA);
                    line(out, depth, "}");
                }
                self.field(field, &member, depth, out)?;
                plain_before = true;
            }
        }

        write(out, depth, "err = b.WriteByte('}')");
        Ok(())
    }

    fn field(
        &mut self,
        field: &Field,
        member: &str,
        depth: usize,
        out: &mut String,
    ) -> Result<(), CodegenError> {
        let key = go_quote(&format!("\"{}\":", field.name));
        write(out, depth, &format!("_, err = b.WriteString({key})"));

        match &field.kind {
            FieldKind::Group(group) => {
                line(out, depth, "{");
                line(out, depth + 1, &format!("s := s.{member}"));
                self.struct_body(group.type_id, depth + 1, out)?;
                line(out, depth, "}");
            }
            FieldKind::Slot(slot) if slot.ty == Type::Void => self.value(&slot.ty, depth, out),
            FieldKind::Slot(slot) => {
                let catalog = self.scope.catalog();
                let custom = catalog
                    .text(&field.annotations, catalog.customtype)
                    .is_some_and(|c| !c.is_empty());
                line(out, depth, "{");
                line(out, depth + 1, &format!("s := s.{member}"));
                if custom {
                    self.marshal(depth + 1, out);
                } else {
                    self.value(&slot.ty, depth + 1, out);
                }
                line(out, depth, "}");
            }
        }
        Ok(())
    }

    fn value(&mut self, ty: &Type, depth: usize, out: &mut String) {
        match ty {
            Type::Void | Type::Interface { .. } => {
                write(out, depth, "_, err = b.WriteString(\"null\")");
            }
            Type::Enum { .. } | Type::Struct { .. } => write(out, depth, "err = s.WriteJSON(b)"),
            Type::List { element_type } => match element_type.as_ref() {
                Type::List { .. } | Type::AnyPointer => {
                    line(out, depth, "_ = s");
                    let placeholder = go_quote("\"untyped list\"");
                    write(out, depth, &format!("_, err = b.WriteString({placeholder})"));
                }
                element => {
                    write(out, depth, "err = b.WriteByte('[')");
                    if matches!(element, Type::Void | Type::Interface { .. }) {
                        line(out, depth, "for i := range s {");
                    } else {
                        line(out, depth, "for i, s := range s {");
                    }
                    line(out, depth + 1, "if i != 0 {");
                    write(out, depth + 2, COMMA);
                    line(out, depth + 1, "}");
                    self.value(element, depth + 1, out);
                    line(out, depth, "}");
                    write(out, depth, "err = b.WriteByte(']')");
                }
            },
            _ => self.marshal(depth, out),
        }
    }

    fn marshal(&mut self, depth: usize, out: &mut String) {
        self.scope.import("encoding/json");
        write(out, depth, "buf, err = json.Marshal(s)");
        write(out, depth, "_, err = b.Write(buf)");
    }
}
