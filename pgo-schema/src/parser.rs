//! Code generator request loader.
//!
//! This module loads the decoded `CodeGeneratorRequest` from its JSON
//! rendering and checks the structural guarantees the rest of the pipeline
//! relies on.

use crate::error::ParseError;
use crate::types::CodeGeneratorRequest;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

/// Parses a code generator request from a JSON string.
///
/// # Arguments
/// * `json` - Decoded request rendered as JSON
///
/// # Returns
/// Parsed request or parse error.
///
/// # Errors
/// Returns `ParseError` if the JSON is malformed or the request is structurally invalid.
pub fn parse_request(json: &str) -> Result<CodeGeneratorRequest, ParseError> {
    let request: CodeGeneratorRequest = serde_json::from_str(json)?;
    check_structure(&request)?;
    Ok(request)
}

/// Reads a code generator request from a reader until EOF.
///
/// # Errors
/// Returns `ParseError` if reading fails or the content is not a valid request.
pub fn read_request<R: Read>(mut reader: R) -> Result<CodeGeneratorRequest, ParseError> {
    let mut json = String::new();
    reader.read_to_string(&mut json)?;
    parse_request(&json)
}

/// Loads a code generator request from a file.
///
/// # Errors
/// Returns `ParseError` if the file cannot be read or parsed.
pub fn load_request(path: &Path) -> Result<CodeGeneratorRequest, ParseError> {
    let json = std::fs::read_to_string(path)?;
    parse_request(&json)
}

fn check_structure(request: &CodeGeneratorRequest) -> Result<(), ParseError> {
    if request.nodes.is_empty() {
        return Err(ParseError::invalid_structure("request contains no nodes"));
    }

    let mut seen = HashSet::new();
    for file in &request.requested_files {
        if !seen.insert(file.id) {
            return Err(ParseError::invalid_structure(format!(
                "file 0x{:x} requested twice",
                file.id
            )));
        }
        if file.filename.is_empty() {
            return Err(ParseError::invalid_structure(format!(
                "requested file 0x{:x} has no filename",
                file.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeKind;

    const SIMPLE: &str = r#"{
        "nodes": [
            {"id": "0xa1", "displayName": "point.capnp", "file": {},
             "nestedNodes": [{"name": "Point", "id": "0xa2"}]},
            {"id": "0xa2", "displayName": "point.capnp:Point", "displayNamePrefixLength": 12,
             "scopeId": "0xa1",
             "struct": {"dataWordCount": 1, "fields": [
                {"name": "x", "codeOrder": 0, "slot": {"offset": 0, "type": "int32"}},
                {"name": "y", "codeOrder": 1, "slot": {"offset": 1, "type": "int32"}}
             ]}}
        ],
        "requestedFiles": [{"id": "0xa1", "filename": "point.capnp"}]
    }"#;

    #[test]
    fn test_parse_simple_request() {
        let request = parse_request(SIMPLE).expect("Failed to parse");
        assert_eq!(request.nodes.len(), 2);
        assert_eq!(request.requested_files.len(), 1);
        assert_eq!(request.requested_files[0].id, 0xa1);
        assert!(request.nodes[0].is_file());
        match &request.nodes[1].kind {
            NodeKind::Struct(s) => {
                assert_eq!(s.fields.len(), 2);
                assert_eq!(s.data_word_count, 1);
            }
            other => panic!("unexpected kind {}", other.name()),
        }
    }

    #[test]
    fn test_read_request_from_reader() {
        let request = read_request(SIMPLE.as_bytes()).expect("Failed to read");
        assert_eq!(request.nodes[1].short_name(), "Point");
    }

    #[test]
    fn test_load_request_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("request.json");
        std::fs::write(&path, SIMPLE).expect("write");
        let request = load_request(&path).expect("Failed to load");
        assert_eq!(request.nodes.len(), 2);
    }

    #[test]
    fn test_parse_empty_request() {
        let result = parse_request(r#"{"nodes": []}"#);
        assert!(matches!(result, Err(ParseError::InvalidStructure { .. })));
    }

    #[test]
    fn test_parse_malformed_json() {
        let result = parse_request("{\"nodes\": [");
        assert!(matches!(result, Err(ParseError::Json(_))));
    }

    #[test]
    fn test_parse_duplicate_requested_file() {
        let json = r#"{
            "nodes": [{"id": 1, "file": {}}],
            "requestedFiles": [{"id": 1, "filename": "a.capnp"}, {"id": 1, "filename": "a.capnp"}]
        }"#;
        let result = parse_request(json);
        assert!(matches!(result, Err(ParseError::InvalidStructure { .. })));
    }
}
