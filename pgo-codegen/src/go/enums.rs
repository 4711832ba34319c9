//! Enum code generation.

use crate::error::CodegenError;
use crate::go::{go_quote, line, member_const};
use pgo_schema::SchemaIr;
use std::collections::HashMap;

/// One enumerant as emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    /// Declared ordinal.
    pub ordinal: u16,
    /// Go constant name.
    pub constant: String,
    /// String tag; empty when the enumerant has none.
    pub tag: String,
}

/// Generator for enum declarations.
pub struct EnumGenerator<'a> {
    ir: &'a SchemaIr,
}

impl<'a> EnumGenerator<'a> {
    /// Creates a new enum generator.
    #[must_use]
    pub fn new(ir: &'a SchemaIr) -> Self {
        Self { ir }
    }

    /// Returns an enum's values in code order.
    ///
    /// # Errors
    /// Returns a schema error if the node is not a resolved enum.
    pub fn values(&self, id: u64) -> Result<Vec<EnumValue>, CodegenError> {
        let catalog = self.ir.catalog();
        let (_, node) = self.ir.registry().get_enum(id)?;
        let name = self.ir.name(id)?;

        Ok(node
            .code_order_enumerants()
            .into_iter()
            .map(|(ordinal, enumerant)| {
                let effective = catalog
                    .name_override(&enumerant.annotations)
                    .unwrap_or(&enumerant.name);
                let mut tag = effective.to_string();
                for annotation in &enumerant.annotations {
                    if annotation.id == catalog.tag {
                        tag = annotation.value.as_text().unwrap_or("").to_string();
                    } else if annotation.id == catalog.notag {
                        tag.clear();
                    }
                }
                EnumValue {
                    ordinal,
                    constant: member_const(name, effective),
                    tag,
                }
            })
            .collect())
    }

    /// Generates the type, constants and string conversions of an enum.
    ///
    /// # Errors
    /// Returns a schema error if the node is not a resolved enum, or a
    /// generation error if two enumerants share a string tag.
    pub fn generate(&self, id: u64) -> Result<String, CodegenError> {
        let mut output = String::new();
        let node = self.ir.node(id)?;
        let name = self.ir.name(id)?;
        let values = self.values(id)?;

        let mut seen: HashMap<&str, &str> = HashMap::new();
        for value in values.iter().filter(|v| !v.tag.is_empty()) {
            if let Some(first) = seen.insert(&value.tag, &value.constant) {
                return Err(CodegenError::generation(format!(
                    "enum {name}: {first} and {} both use the string {:?}",
                    value.constant, value.tag
                )));
            }
        }

        for doc in self.ir.catalog().docs(&node.annotations) {
            output.push_str(&format!("// {doc}\n"));
        }
        output.push_str(&format!("type {name} uint16\n\n"));

        if values.is_empty() {
            return Ok(output);
        }

        output.push_str("const (\n");
        for value in &values {
            line(
                &mut output,
                1,
                &format!("{} {name} = {}", value.constant, value.ordinal),
            );
        }
        output.push_str(")\n\n");

        output.push_str(&format!("func (c {name}) String() string {{\n"));
        line(&mut output, 1, "switch c {");
        for value in values.iter().filter(|v| !v.tag.is_empty()) {
            line(&mut output, 1, &format!("case {}:", value.constant));
            line(&mut output, 2, &format!("return {}", go_quote(&value.tag)));
        }
        line(&mut output, 1, "default:");
        line(&mut output, 2, "return \"\"");
        line(&mut output, 1, "}");
        output.push_str("}\n\n");

        output.push_str(&format!("func {name}FromString(c string) {name} {{\n"));
        line(&mut output, 1, "switch c {");
        for value in values.iter().filter(|v| !v.tag.is_empty()) {
            line(&mut output, 1, &format!("case {}:", go_quote(&value.tag)));
            line(&mut output, 2, &format!("return {}", value.constant));
        }
        line(&mut output, 1, "default:");
        line(&mut output, 2, "return 0");
        line(&mut output, 1, "}");
        output.push_str("}\n\n");

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{DOC, NAME, NOTAG, TAG, file_ir};

    fn color_ir() -> SchemaIr {
        let nodes = format!(
            r#"{{"id": "0x101", "displayName": "test.capnp:Color",
                "annotations": [{{"id": "{DOC}", "value": {{"text": "Primary colors."}}}}],
                "enum": {{"enumerants": [
                    {{"name": "red", "codeOrder": 1, "annotations": [{{"id": "{TAG}", "value": {{"text": "r"}}}}]}},
                    {{"name": "green", "codeOrder": 0, "annotations": [{{"id": "{NOTAG}", "value": "void"}}]}},
                    {{"name": "blue", "codeOrder": 2, "annotations": [{{"id": "{NAME}", "value": {{"text": "azure"}}}}]}}
                ]}}}},
               {{"id": "0x102", "displayName": "test.capnp:Empty", "enum": {{}}}}"#
        );
        file_ir(
            "",
            r#"{"name": "color", "id": "0x101"}, {"name": "Empty", "id": "0x102"}"#,
            &nodes,
        )
    }

    #[test]
    fn test_enum_values_in_code_order() {
        let ir = color_ir();
        let values = EnumGenerator::new(&ir).values(0x101).expect("values");
        let constants: Vec<&str> = values.iter().map(|v| v.constant.as_str()).collect();
        assert_eq!(constants, ["COLOR_GREEN", "COLOR_RED", "COLOR_AZURE"]);
        let ordinals: Vec<u16> = values.iter().map(|v| v.ordinal).collect();
        assert_eq!(ordinals, [1, 0, 2]);
        let tags: Vec<&str> = values.iter().map(|v| v.tag.as_str()).collect();
        assert_eq!(tags, ["", "r", "azure"]);
    }

    #[test]
    fn test_generate_enum() {
        let ir = color_ir();
        let output = EnumGenerator::new(&ir).generate(0x101).expect("generate");

        assert!(output.starts_with("// Primary colors.\ntype Color uint16\n"));
        assert!(output.contains("\tCOLOR_RED Color = 0\n"));
        assert!(output.contains("\tCOLOR_GREEN Color = 1\n"));
        assert!(output.contains("func (c Color) String() string {"));
        assert!(output.contains("\tcase COLOR_RED:\n\t\treturn \"r\"\n"));
        assert!(output.contains("func ColorFromString(c string) Color {"));
        assert!(output.contains("\tcase \"azure\":\n\t\treturn COLOR_AZURE\n"));
        assert!(output.contains("\tdefault:\n\t\treturn 0\n"));
        assert!(!output.contains("case COLOR_GREEN"));
    }

    fn from_string_cases(output: &str) -> Vec<(String, String)> {
        let start = output.find("FromString(c string)").expect("FromString");
        let mut lines = output[start..].lines();
        let mut cases = Vec::new();
        while let Some(line) = lines.next() {
            if let Some(label) = line.trim().strip_prefix("case ") {
                let label = label.trim_end_matches(':').trim_matches('"').to_string();
                let target = lines
                    .next()
                    .and_then(|l| l.trim().strip_prefix("return "))
                    .expect("case body")
                    .to_string();
                cases.push((label, target));
            }
        }
        cases
    }

    #[test]
    fn test_from_string_maps_each_name_to_its_ordinal() {
        let nodes = format!(
            r#"{{"id": "0x103", "displayName": "test.capnp:Mode",
                "enum": {{"enumerants": [
                    {{"name": "fast", "codeOrder": 0}},
                    {{"name": "slow", "codeOrder": 1, "annotations": [{{"id": "{TAG}", "value": {{"text": "snail"}}}}]}},
                    {{"name": "hidden", "codeOrder": 2, "annotations": [{{"id": "{NOTAG}", "value": "void"}}]}},
                    {{"name": "auto", "codeOrder": 3}}
                ]}}}}"#
        );
        let ir = file_ir("", r#"{"name": "Mode", "id": "0x103"}"#, &nodes);
        let generator = EnumGenerator::new(&ir);
        let output = generator.generate(0x103).expect("generate");
        let ordinals: HashMap<String, u16> = generator
            .values(0x103)
            .expect("values")
            .into_iter()
            .map(|v| (v.constant, v.ordinal))
            .collect();

        let cases = from_string_cases(&output);
        let labels: Vec<&str> = cases.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, ["fast", "snail", "auto"]);

        let expected = [("fast", 0), ("snail", 1), ("auto", 3)];
        for (label, ordinal) in expected {
            let (_, target) = cases
                .iter()
                .find(|(l, _)| l == label)
                .expect("label present");
            assert_eq!(ordinals.get(target), Some(&ordinal), "label {label}");
        }

        assert!(!labels.iter().any(|l| l.eq_ignore_ascii_case("hidden")));
        assert!(!labels.contains(&"slow"));
        assert!(output.contains("\tcase \"auto\":\n\t\treturn MODE_AUTO\n\tdefault:\n\t\treturn 0\n\t}\n}\n"));
    }

    #[test]
    fn test_duplicate_string_tag_is_rejected() {
        let nodes = format!(
            r#"{{"id": "0x104", "displayName": "test.capnp:Shade",
                "enum": {{"enumerants": [
                    {{"name": "light", "codeOrder": 0, "annotations": [{{"id": "{TAG}", "value": {{"text": "dark"}}}}]}},
                    {{"name": "dark", "codeOrder": 1}}
                ]}}}}"#
        );
        let ir = file_ir("", r#"{"name": "Shade", "id": "0x104"}"#, &nodes);
        let err = EnumGenerator::new(&ir).generate(0x104).unwrap_err();
        assert!(matches!(err, CodegenError::Generation { .. }));
        assert!(err.to_string().contains("SHADE_LIGHT and SHADE_DARK"));
    }

    #[test]
    fn test_generate_enum_without_enumerants() {
        let ir = color_ir();
        let output = EnumGenerator::new(&ir).generate(0x102).expect("generate");
        assert_eq!(output, "type Empty uint16\n\n");
    }
}
