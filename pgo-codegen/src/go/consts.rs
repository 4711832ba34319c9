//! Constant and annotation code generation.
//!
//! Constants whose value Go can hold in a `const` declaration are grouped in
//! one `const` block; everything that needs a composite literal or a run-time
//! conversion goes into a `var` block.

use crate::error::CodegenError;
use crate::go::scope::EmitScope;
use crate::go::values::is_constant_expressible;
use crate::go::line;
use pgo_schema::{ConstNode, NodeKind};

/// Generator for constant and annotation declarations.
pub struct ConstGenerator<'s, 'a> {
    scope: &'s mut EmitScope<'a>,
}

impl<'s, 'a> ConstGenerator<'s, 'a> {
    /// Creates a new constant generator emitting into `scope`.
    #[must_use]
    pub fn new(scope: &'s mut EmitScope<'a>) -> Self {
        Self { scope }
    }

    /// Generates `const Name = uint64(0x..)` for every annotation node.
    ///
    /// # Errors
    /// Returns a schema error if a node is missing or unresolved.
    pub fn annotations(&self, nodes: &[u64]) -> Result<String, CodegenError> {
        let ir = self.scope.ir();
        let mut output = String::new();
        for &id in nodes {
            if matches!(ir.node(id)?.kind, NodeKind::Annotation(_)) {
                tracing::debug!(id, "annotation constant");
                output.push_str(&format!("const {} = uint64(0x{id:x})\n", ir.name(id)?));
            }
        }
        if !output.is_empty() {
            output.push('\n');
        }
        Ok(output)
    }

    /// Generates the `const` and `var` blocks for every constant node.
    ///
    /// # Errors
    /// Returns `CodegenError` if a value cannot be rendered.
    pub fn generate(&mut self, nodes: &[u64]) -> Result<String, CodegenError> {
        let ir = self.scope.ir();
        let mut constants: Vec<(u64, &ConstNode)> = Vec::new();
        let mut variables: Vec<(u64, &ConstNode)> = Vec::new();

        for &id in nodes {
            if let Some(node) = ir.node(id)?.as_const() {
                if is_constant_expressible(&node.value) {
                    constants.push((id, node));
                } else {
                    variables.push((id, node));
                }
            }
        }

        let mut output = String::new();
        self.block("const", &constants, &mut output)?;
        self.block("var", &variables, &mut output)?;
        Ok(output)
    }

    fn block(
        &mut self,
        keyword: &str,
        nodes: &[(u64, &ConstNode)],
        output: &mut String,
    ) -> Result<(), CodegenError> {
        if nodes.is_empty() {
            return Ok(());
        }
        let ir = self.scope.ir();
        output.push_str(&format!("{keyword} (\n"));
        for &(id, node) in nodes {
            let name = ir.name(id)?;
            let value = self
                .scope
                .literal(&node.ty, &node.value, &format!("const {name}"))?;
            line(output, 1, &format!("{name} = {value}"));
        }
        output.push_str(")\n\n");
        Ok(())
    }
}
