//! Per-file emission scope.
//!
//! One [`EmitScope`] exists per generated file. It owns the file's import
//! accumulator and the list of placeholders emitted in lenient mode, and
//! renders references to declarations that live in other files.

use crate::error::CodegenError;
use crate::options::{GeneratorOptions, Limitation, Strictness};
use pgo_schema::{AnnotationCatalog, FileContext, SchemaError, SchemaIr};
use std::collections::BTreeSet;

/// Emission state for one output file.
#[derive(Debug)]
pub struct EmitScope<'a> {
    ir: &'a SchemaIr,
    file: &'a FileContext,
    options: GeneratorOptions,
    imports: BTreeSet<String>,
    limitations: Vec<Limitation>,
}

impl<'a> EmitScope<'a> {
    /// Creates the scope for a file node.
    ///
    /// # Errors
    /// Returns `SchemaError` if the id is not a file node.
    pub fn new(ir: &'a SchemaIr, file_id: u64, options: GeneratorOptions) -> Result<Self, SchemaError> {
        Ok(Self {
            ir,
            file: ir.file(file_id)?,
            options,
            imports: BTreeSet::new(),
            limitations: Vec::new(),
        })
    }

    /// Returns the resolved schema.
    #[must_use]
    pub fn ir(&self) -> &'a SchemaIr {
        self.ir
    }

    /// Returns the annotation catalog.
    #[must_use]
    pub fn catalog(&self) -> &'a AnnotationCatalog {
        self.ir.catalog()
    }

    /// Returns the file being emitted.
    #[must_use]
    pub fn file(&self) -> &'a FileContext {
        self.file
    }

    /// Returns the generator options.
    #[must_use]
    pub fn options(&self) -> GeneratorOptions {
        self.options
    }

    /// Adds an import path to the file.
    pub fn import(&mut self, path: impl Into<String>) {
        self.imports.insert(path.into());
    }

    /// Returns the imports accumulated so far.
    #[must_use]
    pub fn imports(&self) -> &BTreeSet<String> {
        &self.imports
    }

    /// Returns the package qualifier for a reference to node `id`.
    ///
    /// The qualifier is empty when the node shares this file's import path;
    /// otherwise the node's import path is added to this file's imports.
    ///
    /// # Errors
    /// Returns `SchemaError::MissingPackage` or `SchemaError::MissingImport`
    /// when the owning file lacks the annotations a qualified reference needs.
    pub fn remote_scope(&mut self, id: u64) -> Result<String, CodegenError> {
        let node = self.ir.node(id)?;
        let target = self.ir.file_of(id)?;

        let Some(package) = &target.package else {
            return Err(SchemaError::missing_package(&node.display_name).into());
        };
        if target.import == self.file.import {
            return Ok(String::new());
        }
        let Some(import) = &target.import else {
            return Err(SchemaError::missing_import(&node.display_name).into());
        };

        self.imports.insert(import.clone());
        Ok(format!("{package}."))
    }

    /// Returns the possibly package-qualified Go name of node `id`.
    ///
    /// # Errors
    /// See [`remote_scope`](Self::remote_scope).
    pub fn remote_name(&mut self, id: u64) -> Result<String, CodegenError> {
        let scope = self.remote_scope(id)?;
        Ok(format!("{scope}{}", self.ir.name(id)?))
    }

    /// Reports a value shape that cannot be encoded.
    ///
    /// In lenient mode the shape is recorded and the caller emits a
    /// placeholder; in strict mode it is an error.
    ///
    /// # Errors
    /// Returns `CodegenError::Unsupported` in strict mode.
    pub fn unsupported(
        &mut self,
        feature: &'static str,
        context: impl Into<String>,
    ) -> Result<(), CodegenError> {
        let context = context.into();
        match self.options.strictness {
            Strictness::Strict => Err(CodegenError::Unsupported { feature, context }),
            Strictness::Lenient => {
                tracing::warn!(
                    file = %self.file.display_name,
                    feature,
                    context = %context,
                    "emitting placeholder for unsupported value"
                );
                self.limitations.push(Limitation { feature, context });
                Ok(())
            }
        }
    }

    /// Returns the placeholders recorded so far.
    #[must_use]
    pub fn limitations(&self) -> &[Limitation] {
        &self.limitations
    }

    /// Consumes the scope, returning its imports and limitations.
    #[must_use]
    pub fn finish(self) -> (BTreeSet<String>, Vec<Limitation>) {
        (self.imports, self.limitations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{cross_file_ir, ir_from_json};

    #[test]
    fn test_same_import_is_unqualified() {
        let ir = cross_file_ir();
        let mut scope = EmitScope::new(&ir, 0x100, GeneratorOptions::default()).expect("scope");
        assert_eq!(scope.remote_name(0x101).expect("name"), "Item");
        assert!(scope.imports().is_empty());
    }

    #[test]
    fn test_cross_file_reference_is_qualified_and_imported() {
        let ir = cross_file_ir();
        let mut scope = EmitScope::new(&ir, 0x100, GeneratorOptions::default()).expect("scope");
        assert_eq!(scope.remote_name(0x201).expect("name"), "b.Thing");
        assert!(scope.imports().contains("pkg/b"));
    }

    #[test]
    fn test_missing_import_is_fatal() {
        let ir = cross_file_ir();
        let mut scope = EmitScope::new(&ir, 0x100, GeneratorOptions::default()).expect("scope");
        let err = scope.remote_name(0x301).expect_err("no import");
        assert!(matches!(
            err,
            CodegenError::Schema(SchemaError::MissingImport { .. })
        ));
    }

    #[test]
    fn test_missing_package_is_fatal() {
        let ir = ir_from_json(
            r#"{
            "nodes": [
                {"id": 1, "displayName": "a.capnp", "file": {}, "nestedNodes": [{"name": "A", "id": 2}]},
                {"id": 2, "displayName": "a.capnp:A", "struct": {}}
            ],
            "requestedFiles": [{"id": 1, "filename": "a.capnp"}]
        }"#,
        );
        let mut scope = EmitScope::new(&ir, 1, GeneratorOptions::default()).expect("scope");
        let err = scope.remote_name(2).expect_err("no package");
        assert!(matches!(
            err,
            CodegenError::Schema(SchemaError::MissingPackage { .. })
        ));
    }

    #[test]
    fn test_unsupported_by_strictness() {
        let ir = cross_file_ir();
        let mut lenient = EmitScope::new(&ir, 0x100, GeneratorOptions::default()).expect("scope");
        lenient.unsupported("list of struct value", "const X").expect("lenient");
        assert_eq!(lenient.limitations().len(), 1);

        let strict_options = GeneratorOptions::default().with_strictness(Strictness::Strict);
        let mut strict = EmitScope::new(&ir, 0x100, strict_options).expect("scope");
        let err = strict.unsupported("list of struct value", "const X").expect_err("strict");
        assert!(matches!(err, CodegenError::Unsupported { .. }));
        let (_, limitations) = strict.finish();
        assert!(limitations.is_empty());
    }
}
