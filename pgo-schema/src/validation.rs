//! Field annotation validation.
//!
//! The compiler frontend has already validated the schema itself; this module
//! only rejects annotation combinations the generator cannot express.

use crate::annotations::{AnnotationCatalog, Presence};
use crate::error::SchemaError;
use crate::ir::SchemaIr;
use crate::types::Field;

const EXCLUSIVE: [(Presence, Presence); 3] = [
    (Presence::Required, Presence::Ignored),
    (Presence::Required, Presence::Optional),
    (Presence::Optional, Presence::Ignored),
];

/// Validates every struct field emitted for a file, groups included.
///
/// # Errors
/// Returns `SchemaError::ConflictingAnnotations` for the first field that
/// carries mutually exclusive presence annotations.
pub fn validate_file(ir: &SchemaIr, file_id: u64) -> Result<(), SchemaError> {
    let file = ir.file(file_id)?;
    for &id in &file.nodes {
        validate_struct(ir, id)?;
    }
    Ok(())
}

fn validate_struct(ir: &SchemaIr, id: u64) -> Result<(), SchemaError> {
    let Some(node) = ir.node(id)?.as_struct() else {
        return Ok(());
    };
    for field in &node.fields {
        check_presence(ir.catalog(), field)?;
        if let Some(group_id) = field.group_id() {
            validate_struct(ir, group_id)?;
        }
    }
    Ok(())
}

/// Rejects fields that combine mutually exclusive presence annotations.
///
/// # Errors
/// Returns `SchemaError::ConflictingAnnotations` naming the field and the pair.
pub fn check_presence(catalog: &AnnotationCatalog, field: &Field) -> Result<(), SchemaError> {
    let set = catalog.presences(&field.annotations);
    for (first, second) in EXCLUSIVE {
        if set.contains(&first) && set.contains(&second) {
            return Err(SchemaError::ConflictingAnnotations {
                field: field.name.clone(),
                first: first.name(),
                second: second.name(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_request;

    fn catalog() -> AnnotationCatalog {
        AnnotationCatalog {
            required: 0x201,
            optional: 0x202,
            ignored: 0x203,
            ..AnnotationCatalog::default()
        }
    }

    fn field(annotation_ids: &[u64]) -> Field {
        let annotations: Vec<String> = annotation_ids
            .iter()
            .map(|id| format!(r#"{{"id": {id}, "value": {{"text": "f"}}}}"#))
            .collect();
        let json = format!(
            r#"{{"name": "email", "annotations": [{}], "slot": {{"type": "text"}}}}"#,
            annotations.join(",")
        );
        serde_json::from_str(&json).expect("Failed to parse field")
    }

    #[test]
    fn test_single_presence_is_valid() {
        assert!(check_presence(&catalog(), &field(&[0x201])).is_ok());
        assert!(check_presence(&catalog(), &field(&[0x203])).is_ok());
        assert!(check_presence(&catalog(), &field(&[])).is_ok());
    }

    #[test]
    fn test_required_and_ignored_conflict() {
        let err = check_presence(&catalog(), &field(&[0x203, 0x201])).expect_err("conflict");
        match err {
            SchemaError::ConflictingAnnotations {
                field,
                first,
                second,
            } => {
                assert_eq!(field, "email");
                assert_eq!(first, "required");
                assert_eq!(second, "ignored");
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_optional_pairs_conflict() {
        assert!(check_presence(&catalog(), &field(&[0x201, 0x202])).is_err());
        assert!(check_presence(&catalog(), &field(&[0x202, 0x203])).is_err());
    }

    #[test]
    fn test_validate_file_reaches_group_fields() {
        let json = r#"{
            "nodes": [
                {"id": 1, "displayName": "a.capnp", "file": {}, "nestedNodes": [{"name": "A", "id": 2}]},
                {"id": 2, "displayName": "a.capnp:A", "struct": {"fields": [
                    {"name": "g", "group": {"typeId": 3}}
                ]}},
                {"id": 3, "displayName": "a.capnp:A.g", "struct": {"isGroup": true, "fields": [
                    {"name": "inner", "slot": {"type": "text"},
                     "annotations": [{"id": 513, "value": {"text": "x"}}, {"id": 514, "value": {"text": "x"}}]}
                ]}}
            ],
            "requestedFiles": [{"id": 1, "filename": "a.capnp"}]
        }"#;
        let request = parse_request(json).expect("Failed to parse");
        let ir = SchemaIr::from_request(request, catalog()).expect("Failed to resolve");
        let err = validate_file(&ir, 1).expect_err("conflict");
        assert!(matches!(err, SchemaError::ConflictingAnnotations { ref field, .. } if field == "inner"));
    }
}
