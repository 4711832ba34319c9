//! Struct code generation.
//!
//! Group fields are inlined as anonymous struct members, arbitrarily deep.
//! Structs and groups that contain a union get a `Which` member and a
//! companion `<Name>_Which` enumeration with one value per union member.

use crate::error::CodegenError;
use crate::go::scope::EmitScope;
use crate::go::tags::field_tags;
use crate::go::{field_name, line, member_const};
use pgo_schema::{Field, FieldKind, Slot, Type};

/// Generator for struct declarations.
pub struct StructGenerator<'s, 'a> {
    scope: &'s mut EmitScope<'a>,
}

impl<'s, 'a> StructGenerator<'s, 'a> {
    /// Creates a new struct generator emitting into `scope`.
    #[must_use]
    pub fn new(scope: &'s mut EmitScope<'a>) -> Self {
        Self { scope }
    }

    /// Generates a struct type and the `Which` types of its unions.
    ///
    /// # Errors
    /// Returns `CodegenError` if a field type cannot be mapped or a default
    /// value disagrees with its field type.
    pub fn generate(&mut self, id: u64) -> Result<String, CodegenError> {
        let ir = self.scope.ir();
        let node = ir.node(id)?;
        let name = ir.name(id)?;
        let mut output = String::new();

        for doc in ir.catalog().docs(&node.annotations) {
            output.push_str(&format!("// {doc}\n"));
        }
        output.push_str(&format!("type {name} struct {{\n"));
        self.members(id, 1, &mut output)?;
        output.push_str("}\n\n");

        self.which_types(id, &mut output)?;
        Ok(output)
    }

    fn members(&mut self, id: u64, depth: usize, output: &mut String) -> Result<(), CodegenError> {
        let ir = self.scope.ir();
        let catalog = self.scope.catalog();
        let (_, node) = ir.registry().get_struct(id)?;
        let owner = ir.name(id)?;

        if node.has_union() {
            line(output, depth, &format!("Which {owner}_Which"));
        }

        for field in node.code_order_fields() {
            let member = field_name(catalog, field);
            match &field.kind {
                FieldKind::Group(group) => {
                    self.docs(field, depth, output);
                    line(output, depth, &format!("{member} struct {{"));
                    self.members(group.type_id, depth + 1, output)?;
                    line(output, depth, "}");
                }
                FieldKind::Slot(slot) => match slot.ty {
                    Type::Interface { .. } => {}
                    Type::Void if field.is_union_member() => {
                        let which = member_const(owner, &field.name);
                        line(
                            output,
                            depth,
                            &format!("// {member}: void union member, active when Which == {which}"),
                        );
                    }
                    Type::Void => {}
                    _ => {
                        self.docs(field, depth, output);
                        let declaration = self.slot_member(id, owner, &member, field, slot)?;
                        line(output, depth, &declaration);
                    }
                },
            }
        }
        Ok(())
    }

    fn docs(&self, field: &Field, depth: usize, output: &mut String) {
        for doc in self.scope.catalog().docs(&field.annotations) {
            line(output, depth, &format!("// {doc}"));
        }
    }

    fn slot_member(
        &mut self,
        id: u64,
        owner: &str,
        member: &str,
        field: &Field,
        slot: &Slot,
    ) -> Result<String, CodegenError> {
        let catalog = self.scope.catalog();
        let context = format!("field {owner}.{}", field.name);
        let customtype = catalog.text(&field.annotations, catalog.customtype);
        let go_type = self.scope.slot_type(slot, customtype, &context)?;

        let codecs = self.scope.ir().codecs(id);
        Ok(match field_tags(catalog, codecs, &field.annotations, &slot.ty) {
            Some(tags) => format!("{member} {go_type} {tags}"),
            None => format!("{member} {go_type}"),
        })
    }

    fn which_types(&mut self, id: u64, output: &mut String) -> Result<(), CodegenError> {
        let ir = self.scope.ir();
        let (_, node) = ir.registry().get_struct(id)?;
        let owner = ir.name(id)?;
        let fields = node.code_order_fields();

        if node.has_union() {
            output.push_str(&format!("type {owner}_Which uint16\n\n"));
            output.push_str("const (\n");
            for field in fields.iter().filter(|f| f.is_union_member()) {
                line(
                    output,
                    1,
                    &format!(
                        "{} {owner}_Which = {}",
                        member_const(owner, &field.name),
                        field.discriminant_value
                    ),
                );
            }
            output.push_str(")\n\n");
        }

        for group_id in fields.iter().filter_map(|f| f.group_id()) {
            self.which_types(group_id, output)?;
        }
        Ok(())
    }
}
