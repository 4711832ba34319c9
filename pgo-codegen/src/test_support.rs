//! Request fixtures shared by the generator tests.

use pgo_schema::{AnnotationCatalog, SchemaIr, parse_request};

pub(crate) const DOC: &str = "0xc58ad6bd519f935e";
pub(crate) const TAG: &str = "0xa574b41924caefc7";
pub(crate) const NOTAG: &str = "0xc8768679ec52e012";
pub(crate) const CUSTOMTYPE: &str = "0xfa10659ae02f2093";
pub(crate) const NAME: &str = "0xc2b96012172f8df1";

pub(crate) const CAPNP: &str = "0x900";
pub(crate) const JSON: &str = "0x901";
pub(crate) const MSGP: &str = "0x902";
pub(crate) const REQUIRED: &str = "0x903";
pub(crate) const OPTIONAL: &str = "0x904";
pub(crate) const IGNORED: &str = "0x905";
pub(crate) const MIN: &str = "0x907";
pub(crate) const MAX: &str = "0x908";
pub(crate) const PATTERN: &str = "0x90a";
pub(crate) const MINLEN: &str = "0x90b";
pub(crate) const UNIQUE: &str = "0x90d";

/// Catalog with the codec and constraint ids used by the fixtures.
pub(crate) fn test_catalog() -> AnnotationCatalog {
    AnnotationCatalog {
        capnp: 0x900,
        json: 0x901,
        msgp: 0x902,
        required: 0x903,
        optional: 0x904,
        ignored: 0x905,
        multof: 0x906,
        min: 0x907,
        max: 0x908,
        format: 0x909,
        pattern: 0x90a,
        minlen: 0x90b,
        maxlen: 0x90c,
        unique: 0x90d,
        ..AnnotationCatalog::default()
    }
}

pub(crate) fn ir_from_json(json: &str) -> SchemaIr {
    let request = parse_request(json).expect("Failed to parse request");
    SchemaIr::from_request(request, test_catalog()).expect("Failed to resolve request")
}

/// Builds a request with one requested file `test.capnp` (id `0x100`,
/// package `test`) carrying the given file annotations and nodes.
pub(crate) fn file_request(file_annotations: &str, nested: &str, nodes: &str) -> String {
    let mut annotations = String::from(r#"{"id": "0xbea97f1023792be0", "value": {"text": "test"}}"#);
    if !file_annotations.is_empty() {
        annotations.push_str(", ");
        annotations.push_str(file_annotations);
    }
    let nodes = if nodes.is_empty() {
        String::new()
    } else {
        format!(", {nodes}")
    };
    format!(
        r#"{{
        "nodes": [
            {{"id": "0x100", "displayName": "test.capnp", "file": {{}},
             "annotations": [{annotations}],
             "nestedNodes": [{nested}]}}{nodes}
        ],
        "requestedFiles": [{{"id": "0x100", "filename": "test.capnp"}}]
    }}"#
    )
}

/// Resolves a single-file request built by [`file_request`].
pub(crate) fn file_ir(file_annotations: &str, nested: &str, nodes: &str) -> SchemaIr {
    ir_from_json(&file_request(file_annotations, nested, nodes))
}

/// Three files: `a` (import `pkg/a`), `b` (import `pkg/b`) and `c` (no import).
pub(crate) fn cross_file_ir() -> SchemaIr {
    ir_from_json(
        r#"{
        "nodes": [
            {"id": "0x100", "displayName": "a.capnp", "file": {},
             "annotations": [{"id": "0xbea97f1023792be0", "value": {"text": "a"}},
                             {"id": "0xe130b601260e44b5", "value": {"text": "pkg/a"}}],
             "nestedNodes": [{"name": "Item", "id": "0x101"}]},
            {"id": "0x101", "displayName": "a.capnp:Item", "struct": {"fields": [
                {"name": "thing", "codeOrder": 0, "slot": {"offset": 0, "type": {"struct": {"typeId": "0x201"}}}},
                {"name": "kind", "codeOrder": 1, "slot": {"offset": 0, "type": {"enum": {"typeId": "0x202"}}}}
            ]}},
            {"id": "0x200", "displayName": "b.capnp", "file": {},
             "annotations": [{"id": "0xbea97f1023792be0", "value": {"text": "b"}},
                             {"id": "0xe130b601260e44b5", "value": {"text": "pkg/b"}}],
             "nestedNodes": [{"name": "Thing", "id": "0x201"}, {"name": "Kind", "id": "0x202"}]},
            {"id": "0x201", "displayName": "b.capnp:Thing", "struct": {}},
            {"id": "0x202", "displayName": "b.capnp:Kind", "enum": {"enumerants": [
                {"name": "first", "codeOrder": 0}, {"name": "second", "codeOrder": 1}
            ]}},
            {"id": "0x300", "displayName": "c.capnp", "file": {},
             "annotations": [{"id": "0xbea97f1023792be0", "value": {"text": "c"}}],
             "nestedNodes": [{"name": "Other", "id": "0x301"}]},
            {"id": "0x301", "displayName": "c.capnp:Other", "struct": {}}
        ],
        "requestedFiles": [{"id": "0x100", "filename": "a.capnp"}]
    }"#,
    )
}
