//! Per-file code generation driver.

use crate::error::CodegenError;
use crate::format::SourceFormatter;
use crate::go::{
    ConstGenerator, EmitScope, EnumGenerator, GO_CAPNP_IMPORT, JsonGenerator, StructGenerator,
};
use crate::options::{GeneratorOptions, Limitation};
use pgo_schema::{Codec, NodeKind, RequestedFile, SchemaError, SchemaIr, validate_file};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Marker comment placed after the package clause.
pub const GENERATED_MARKER: &str = "// AUTO GENERATED - DO NOT EDIT";

/// Main code generator.
pub struct Generator<'a> {
    ir: &'a SchemaIr,
    options: GeneratorOptions,
}

/// A generated Go source file, held in memory until written.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    /// Output path relative to the output directory.
    pub path: PathBuf,
    /// Go package name.
    pub package: String,
    /// The file's own import path, listed first in the import block.
    pub own_import: Option<String>,
    /// Imports accumulated while emitting the body.
    pub imports: BTreeSet<String>,
    /// Declarations following the import block.
    pub body: String,
    /// Placeholders emitted in lenient mode.
    pub limitations: Vec<Limitation>,
}

impl<'a> Generator<'a> {
    /// Creates a new generator for the given schema.
    #[must_use]
    pub fn new(ir: &'a SchemaIr, options: GeneratorOptions) -> Self {
        Self { ir, options }
    }

    /// Generates every requested file.
    ///
    /// Either every file is generated or none is returned.
    ///
    /// # Errors
    /// Returns the first `CodegenError` raised by any file.
    pub fn generate(&self) -> Result<Vec<GeneratedFile>, CodegenError> {
        self.ir
            .requested_files()
            .iter()
            .map(|requested| self.generate_file(requested))
            .collect()
    }

    /// Generates one requested file.
    ///
    /// Annotations are validated before anything is emitted. The body holds
    /// annotation ids, then constants, then each enum and struct followed by
    /// its JSON methods.
    ///
    /// # Errors
    /// Returns `CodegenError` if validation fails, the file has no package,
    /// or any declaration cannot be emitted.
    pub fn generate_file(&self, requested: &RequestedFile) -> Result<GeneratedFile, CodegenError> {
        let ir = self.ir;
        tracing::debug!(file = %requested.filename, "generating");

        validate_file(ir, requested.id)?;
        let file = ir.file(requested.id)?;
        let Some(package) = file.package.clone() else {
            return Err(SchemaError::missing_package(&requested.filename).into());
        };

        let mut scope = EmitScope::new(ir, requested.id, self.options)?;
        let mut body = String::new();

        body.push_str(&ConstGenerator::new(&mut scope).annotations(&file.nodes)?);
        body.push_str(&ConstGenerator::new(&mut scope).generate(&file.nodes)?);

        let enums = EnumGenerator::new(ir);
        for &id in &file.nodes {
            match ir.node(id)?.kind {
                NodeKind::Enum(_) => body.push_str(&enums.generate(id)?),
                NodeKind::Struct(_) => body.push_str(&StructGenerator::new(&mut scope).generate(id)?),
                _ => continue,
            }
            body.push_str(&JsonGenerator::new(&mut scope).generate(id)?);
        }

        if file.codecs.contains(Codec::Wire) {
            scope.import("io");
            scope.import(GO_CAPNP_IMPORT);
        }

        let (imports, limitations) = scope.finish();
        tracing::debug!(
            file = %requested.filename,
            declarations = file.nodes.len(),
            imports = imports.len(),
            limitations = limitations.len(),
            "generated"
        );

        Ok(GeneratedFile {
            path: output_path(&requested.filename),
            package,
            own_import: file.import.clone(),
            imports,
            body,
            limitations,
        })
    }
}

impl GeneratedFile {
    /// Renders the complete source: package clause, marker, imports, body.
    #[must_use]
    pub fn render(&self) -> String {
        let mut output = format!("package {}\n\n{GENERATED_MARKER}\n\n", self.package);

        let own = self.own_import.iter();
        let accumulated = self
            .imports
            .iter()
            .filter(|import| Some(*import) != self.own_import.as_ref());
        let imports: Vec<&String> = own.chain(accumulated).collect();

        if !imports.is_empty() {
            output.push_str("import (\n");
            for import in imports {
                output.push_str(&format!("\t\"{import}\"\n"));
            }
            output.push_str(")\n\n");
        }

        output.push_str(&self.body);
        output
    }

    /// Formats and writes the file below `out_dir`, creating directories.
    ///
    /// # Errors
    /// Returns `CodegenError` if formatting or writing fails.
    pub fn write(
        &self,
        out_dir: &Path,
        formatter: &dyn SourceFormatter,
    ) -> Result<PathBuf, CodegenError> {
        let source = formatter.format(&self.render())?;
        self.write_source(out_dir, &source)
    }

    /// Writes already rendered source to the file's path below `out_dir`.
    ///
    /// # Errors
    /// Returns `CodegenError::Io` if a directory or the file cannot be written.
    pub fn write_source(&self, out_dir: &Path, source: &str) -> Result<PathBuf, CodegenError> {
        let path = out_dir.join(&self.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, source)?;
        tracing::info!(path = %path.display(), "wrote");
        Ok(path)
    }
}

/// Maps a schema filename to its Go output path (`a/b.capnp` -> `a/b.go`).
#[must_use]
pub fn output_path(filename: &str) -> PathBuf {
    let stem = filename.strip_suffix(".capnp").unwrap_or(filename);
    PathBuf::from(format!("{stem}.go"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Unformatted;
    use crate::options::Strictness;
    use crate::test_support::{CAPNP, IGNORED, REQUIRED, cross_file_ir, file_ir, ir_from_json};

    fn point_ir(file_annotations: &str) -> SchemaIr {
        file_ir(
            file_annotations,
            r#"{"name": "Point", "id": "0x101"}"#,
            r#"{"id": "0x101", "displayName": "test.capnp:Point", "struct": {"fields": [
                {"name": "x", "codeOrder": 0, "slot": {"offset": 0, "type": "int32"}},
                {"name": "y", "codeOrder": 1, "slot": {"offset": 1, "type": "int32"}}
            ]}}"#,
        )
    }

    fn generate_one(ir: &SchemaIr, options: GeneratorOptions) -> Result<GeneratedFile, CodegenError> {
        let mut files = Generator::new(ir, options).generate()?;
        assert_eq!(files.len(), 1);
        Ok(files.remove(0))
    }

    #[test]
    fn test_output_path() {
        assert_eq!(output_path("foo.capnp"), PathBuf::from("foo.go"));
        assert_eq!(output_path("dir/sub/foo.capnp"), PathBuf::from("dir/sub/foo.go"));
        assert_eq!(output_path("plain"), PathBuf::from("plain.go"));
    }

    #[test]
    fn test_file_header_and_body() {
        let ir = point_ir("");
        let file = generate_one(&ir, GeneratorOptions::default()).expect("generate");
        let source = file.render();

        assert!(source.starts_with(
            "package test\n\n// AUTO GENERATED - DO NOT EDIT\n\nimport (\n\t\"bufio\"\n\t\"bytes\"\n\t\"encoding/json\"\n\t\"io\"\n)\n\n"
        ));
        assert!(source.contains("type Point struct {\n\tX int32\n\tY int32\n}\n\n"));
        assert!(source.contains("func (s Point) WriteJSON(w io.Writer) error {\n"));
        assert_eq!(file.path, PathBuf::from("test.go"));
        assert!(file.limitations.is_empty());
    }

    #[test]
    fn test_no_import_block_without_imports() {
        let ir = point_ir("");
        let options = GeneratorOptions::default().with_json_writers(false);
        let file = generate_one(&ir, options).expect("generate");
        let source = file.render();
        assert!(!source.contains("import ("));
        assert!(source.starts_with("package test\n\n// AUTO GENERATED - DO NOT EDIT\n\ntype Point struct {"));
        assert!(source.contains("func (s Point) MarshalJSON() (bs []byte, err error) { return }\n"));
    }

    #[test]
    fn test_wire_codec_adds_runtime_imports() {
        let ir = point_ir(&format!(r#"{{"id": "{CAPNP}", "value": "void"}}"#));
        let options = GeneratorOptions::default().with_json_writers(false);
        let file = generate_one(&ir, options).expect("generate");
        assert!(file.imports.contains("io"));
        assert!(file.imports.contains(GO_CAPNP_IMPORT));
    }

    #[test]
    fn test_cross_file_references_are_qualified() {
        let ir = cross_file_ir();
        let file = generate_one(&ir, GeneratorOptions::default()).expect("generate");
        assert_eq!(file.package, "a");
        assert_eq!(file.own_import.as_deref(), Some("pkg/a"));
        assert!(file.imports.contains("pkg/b"));
        assert!(file.body.contains("\tThing b.Thing\n"));
        assert!(file.body.contains("\tKind b.Kind\n"));

        let source = file.render();
        let own = source.find("\t\"pkg/a\"\n").expect("own import");
        let remote = source.find("\t\"pkg/b\"\n").expect("remote import");
        assert!(own < remote);
        assert_eq!(source.matches("\"pkg/a\"").count(), 1);
    }

    #[test]
    fn test_conflicting_presence_fails_before_emission() {
        let ir = file_ir(
            "",
            r#"{"name": "User", "id": "0x101"}"#,
            &format!(
                r#"{{"id": "0x101", "displayName": "test.capnp:User", "struct": {{"fields": [
                    {{"name": "email", "codeOrder": 0, "slot": {{"offset": 0, "type": "text"}},
                      "annotations": [{{"id": "{REQUIRED}", "value": {{"text": "email"}}}},
                                      {{"id": "{IGNORED}", "value": "void"}}]}}
                ]}}}}"#
            ),
        );
        let err = generate_one(&ir, GeneratorOptions::default()).expect_err("conflict");
        match err {
            CodegenError::Schema(SchemaError::ConflictingAnnotations { field, .. }) => {
                assert_eq!(field, "email");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    fn two_file_request(second_annotations: &str) -> SchemaIr {
        ir_from_json(&format!(
            r#"{{
            "nodes": [
                {{"id": "0x100", "displayName": "one.capnp", "file": {{}},
                 "annotations": [{{"id": "0xbea97f1023792be0", "value": {{"text": "one"}}}}]}},
                {{"id": "0x200", "displayName": "two.capnp", "file": {{}},
                 "annotations": [{second_annotations}]}}
            ],
            "requestedFiles": [
                {{"id": "0x100", "filename": "one.capnp"}},
                {{"id": "0x200", "filename": "nested/two.capnp"}}
            ]
        }}"#
        ))
    }

    #[test]
    fn test_missing_package_fails_whole_request() {
        let ir = two_file_request("");
        let err = Generator::new(&ir, GeneratorOptions::default())
            .generate()
            .expect_err("missing package");
        assert!(matches!(
            err,
            CodegenError::Schema(SchemaError::MissingPackage { ref name }) if name == "nested/two.capnp"
        ));
    }

    #[test]
    fn test_strictness_controls_unsupported_values() {
        let nodes = r#"
            {"id": "0x101", "displayName": "test.capnp:Item", "struct": {}},
            {"id": "0x102", "displayName": "test.capnp:items", "const": {
                "type": {"list": {"elementType": {"struct": {"typeId": "0x101"}}}},
                "value": {"list": {"struct": [{}]}}}}"#;
        let nested = r#"{"name": "Item", "id": "0x101"}, {"name": "items", "id": "0x102"}"#;
        let ir = file_ir("", nested, nodes);

        let file = generate_one(&ir, GeneratorOptions::default()).expect("lenient");
        assert!(file.body.contains("\tItems = []Item{/* Not implemented */}\n"));
        assert_eq!(file.limitations.len(), 1);
        assert_eq!(file.limitations[0].context, "const Items");

        let strict = GeneratorOptions::default().with_strictness(Strictness::Strict);
        let err = generate_one(&ir, strict).expect_err("strict");
        assert!(matches!(err, CodegenError::Unsupported { .. }));
    }

    #[test]
    fn test_write_creates_directories() {
        let ir = two_file_request(r#"{"id": "0xbea97f1023792be0", "value": {"text": "two"}}"#);
        let files = Generator::new(&ir, GeneratorOptions::default())
            .generate()
            .expect("generate");
        let dir = tempfile::tempdir().expect("tempdir");

        let paths: Vec<PathBuf> = files
            .iter()
            .map(|file| file.write(dir.path(), &Unformatted).expect("write"))
            .collect();

        assert_eq!(paths[1], dir.path().join("nested/two.go"));
        let written = fs::read_to_string(&paths[1]).expect("read");
        assert_eq!(written, "package two\n\n// AUTO GENERATED - DO NOT EDIT\n\n");
    }
}
