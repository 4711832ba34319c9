//! Code generator request model.
//!
//! These types mirror the decoded form of a Cap'n Proto `CodeGeneratorRequest`:
//! the node graph of every schema file the compiler loaded, and the subset of
//! files for which output was requested. Decoding the wire segments into this
//! shape is the job of an external collaborator; the generator only navigates
//! the decoded objects.

use pgo_core::{PrimitiveType, PrimitiveValue};
use serde::{Deserialize, Serialize};

/// Discriminant value of a field that is not a union member.
pub const NO_DISCRIMINANT: u16 = 0xFFFF;

fn no_discriminant() -> u16 {
    NO_DISCRIMINANT
}

/// A complete compilation request.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeGeneratorRequest {
    /// Every node loaded by the compiler, across all files.
    pub nodes: Vec<Node>,
    /// Files for which code should be emitted.
    #[serde(default)]
    pub requested_files: Vec<RequestedFile>,
}

/// A file selected for output.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestedFile {
    /// Id of the file node.
    #[serde(deserialize_with = "crate::id::deserialize")]
    pub id: u64,
    /// Declared filename, relative to the output root.
    pub filename: String,
    /// Files imported by this file.
    #[serde(default)]
    pub imports: Vec<Import>,
}

/// An import declared by a requested file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Import {
    /// Id of the imported file node.
    #[serde(deserialize_with = "crate::id::deserialize")]
    pub id: u64,
    /// Import path as written in the schema.
    pub name: String,
}

/// A schema node: one declared entity addressed by a stable 64-bit id.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Globally unique node id.
    #[serde(deserialize_with = "crate::id::deserialize")]
    pub id: u64,
    /// Fully qualified display name (`file.capnp:Outer.Inner`).
    #[serde(default)]
    pub display_name: String,
    /// Length of the display name prefix naming the enclosing scope.
    #[serde(default)]
    pub display_name_prefix_length: u32,
    /// Id of the lexical parent, or 0 for files.
    #[serde(default, deserialize_with = "crate::id::deserialize")]
    pub scope_id: u64,
    /// Named child declarations, in declaration order.
    #[serde(default)]
    pub nested_nodes: Vec<NestedNode>,
    /// Annotations applied to this node.
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    /// Kind-specific body.
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl Node {
    /// Returns the unqualified declared name.
    #[must_use]
    pub fn short_name(&self) -> &str {
        let prefix = self.display_name_prefix_length as usize;
        self.display_name.get(prefix..).unwrap_or(&self.display_name)
    }

    /// Returns the struct body, if this is a struct node.
    #[must_use]
    pub fn as_struct(&self) -> Option<&StructNode> {
        match &self.kind {
            NodeKind::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the enum body, if this is an enum node.
    #[must_use]
    pub fn as_enum(&self) -> Option<&EnumNode> {
        match &self.kind {
            NodeKind::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the const body, if this is a const node.
    #[must_use]
    pub fn as_const(&self) -> Option<&ConstNode> {
        match &self.kind {
            NodeKind::Const(c) => Some(c),
            _ => None,
        }
    }

    /// Returns true for anonymous group structs.
    #[must_use]
    pub fn is_group(&self) -> bool {
        self.as_struct().is_some_and(|s| s.is_group)
    }

    /// Returns true for file nodes.
    #[must_use]
    pub fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File(_))
    }

    /// Returns the kind name, for diagnostics.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }
}

/// Kind-specific node body.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    /// Root of a per-file nested-node tree.
    File(FileNode),
    /// Struct or group.
    Struct(StructNode),
    /// Enum.
    Enum(EnumNode),
    /// Interface. Not emitted.
    Interface(InterfaceNode),
    /// Constant.
    Const(ConstNode),
    /// Annotation declaration.
    Annotation(AnnotationNode),
}

impl NodeKind {
    /// Returns the kind name, for diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Struct(_) => "struct",
            Self::Enum(_) => "enum",
            Self::Interface(_) => "interface",
            Self::Const(_) => "const",
            Self::Annotation(_) => "annotation",
        }
    }
}

/// File node body.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FileNode {}

/// Interface node body.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InterfaceNode {}

/// Struct node body.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructNode {
    /// Size of the data section in 64-bit words.
    #[serde(default)]
    pub data_word_count: u16,
    /// Size of the pointer section.
    #[serde(default)]
    pub pointer_count: u16,
    /// True for anonymous groups.
    #[serde(default)]
    pub is_group: bool,
    /// Number of union members; zero when the struct has no union.
    #[serde(default)]
    pub discriminant_count: u16,
    /// Offset of the union tag, in 16-bit units of the data section.
    #[serde(default)]
    pub discriminant_offset: u32,
    /// Fields in declaration (ordinal) order.
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl StructNode {
    /// Returns the fields sorted by code order.
    #[must_use]
    pub fn code_order_fields(&self) -> Vec<&Field> {
        let mut fields: Vec<&Field> = self.fields.iter().collect();
        fields.sort_by_key(|f| f.code_order);
        fields
    }

    /// Returns true if the struct contains an unnamed union.
    #[must_use]
    pub const fn has_union(&self) -> bool {
        self.discriminant_count > 0
    }
}

/// A struct field.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Declared name.
    pub name: String,
    /// Position in source order.
    #[serde(default)]
    pub code_order: u16,
    /// Annotations applied to the field.
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    /// Union tag value, or [`NO_DISCRIMINANT`].
    #[serde(default = "no_discriminant")]
    pub discriminant_value: u16,
    /// Slot or group body.
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl Field {
    /// Returns true if the field is a member of its struct's union.
    #[must_use]
    pub const fn is_union_member(&self) -> bool {
        self.discriminant_value != NO_DISCRIMINANT
    }

    /// Returns the slot body, if this is a slot field.
    #[must_use]
    pub fn slot(&self) -> Option<&Slot> {
        match &self.kind {
            FieldKind::Slot(slot) => Some(slot),
            FieldKind::Group(_) => None,
        }
    }

    /// Returns the group struct id, if this is a group field.
    #[must_use]
    pub fn group_id(&self) -> Option<u64> {
        match &self.kind {
            FieldKind::Group(group) => Some(group.type_id),
            FieldKind::Slot(_) => None,
        }
    }
}

/// Field body.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    /// A plain field with storage.
    Slot(Slot),
    /// A group of fields stored in the enclosing struct.
    Group(Group),
}

/// Slot field body.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    /// Offset in units of the field's own width.
    #[serde(default)]
    pub offset: u32,
    /// Declared type.
    #[serde(rename = "type")]
    pub ty: Type,
    /// Default value, `Void` when none was given.
    #[serde(default)]
    pub default_value: Value,
    /// True if the schema spelled out the default.
    #[serde(default)]
    pub had_explicit_default: bool,
}

/// Group field body.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Id of the group's struct node.
    #[serde(deserialize_with = "crate::id::deserialize")]
    pub type_id: u64,
}

/// Enum node body.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EnumNode {
    /// Enumerants in ordinal order.
    #[serde(default)]
    pub enumerants: Vec<Enumerant>,
}

impl EnumNode {
    /// Returns `(ordinal, enumerant)` pairs sorted by code order.
    #[must_use]
    pub fn code_order_enumerants(&self) -> Vec<(u16, &Enumerant)> {
        let mut values: Vec<(u16, &Enumerant)> = self
            .enumerants
            .iter()
            .enumerate()
            .map(|(i, e)| (i as u16, e))
            .collect();
        values.sort_by_key(|(_, e)| e.code_order);
        values
    }
}

/// An enum member.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Enumerant {
    /// Declared name.
    pub name: String,
    /// Position in source order.
    #[serde(default)]
    pub code_order: u16,
    /// Annotations applied to the enumerant.
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

/// Const node body.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConstNode {
    /// Declared type.
    #[serde(rename = "type")]
    pub ty: Type,
    /// Constant value.
    pub value: Value,
}

/// Annotation declaration body.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnnotationNode {
    /// Type of the annotation's value.
    #[serde(rename = "type")]
    pub ty: Type,
}

/// A named child declaration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NestedNode {
    /// Unqualified name.
    pub name: String,
    /// Id of the child node.
    #[serde(deserialize_with = "crate::id::deserialize")]
    pub id: u64,
}

/// An applied annotation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Annotation {
    /// Id of the annotation declaration.
    #[serde(deserialize_with = "crate::id::deserialize")]
    pub id: u64,
    /// Attached value.
    #[serde(default)]
    pub value: Value,
}

/// A type reference.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Type {
    /// Void.
    Void,
    /// Bool.
    Bool,
    /// Int8.
    Int8,
    /// Int16.
    Int16,
    /// Int32.
    Int32,
    /// Int64.
    Int64,
    /// UInt8.
    Uint8,
    /// UInt16.
    Uint16,
    /// UInt32.
    Uint32,
    /// UInt64.
    Uint64,
    /// Float32.
    Float32,
    /// Float64.
    Float64,
    /// UTF-8 text.
    Text,
    /// Opaque bytes.
    Data,
    /// List of a single element type.
    List {
        /// Element type.
        #[serde(rename = "elementType")]
        element_type: Box<Type>,
    },
    /// Enum declared elsewhere.
    Enum {
        /// Enum node id.
        #[serde(rename = "typeId", deserialize_with = "crate::id::deserialize")]
        type_id: u64,
    },
    /// Struct declared elsewhere.
    Struct {
        /// Struct node id.
        #[serde(rename = "typeId", deserialize_with = "crate::id::deserialize")]
        type_id: u64,
    },
    /// Interface declared elsewhere.
    Interface {
        /// Interface node id.
        #[serde(rename = "typeId", deserialize_with = "crate::id::deserialize")]
        type_id: u64,
    },
    /// Untyped pointer.
    AnyPointer,
}

impl Type {
    /// Returns the fixed-width primitive for data-section types.
    #[must_use]
    pub const fn primitive(&self) -> Option<PrimitiveType> {
        match self {
            Self::Bool => Some(PrimitiveType::Bool),
            Self::Int8 => Some(PrimitiveType::Int8),
            Self::Int16 => Some(PrimitiveType::Int16),
            Self::Int32 => Some(PrimitiveType::Int32),
            Self::Int64 => Some(PrimitiveType::Int64),
            Self::Uint8 => Some(PrimitiveType::Uint8),
            Self::Uint16 => Some(PrimitiveType::Uint16),
            Self::Uint32 => Some(PrimitiveType::Uint32),
            Self::Uint64 => Some(PrimitiveType::Uint64),
            Self::Float32 => Some(PrimitiveType::Float32),
            Self::Float64 => Some(PrimitiveType::Float64),
            _ => None,
        }
    }

    /// Returns the kind tag name shared with [`Value::kind_name`].
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Text => "text",
            Self::Data => "data",
            Self::List { .. } => "list",
            Self::Enum { .. } => "enum",
            Self::Struct { .. } => "struct",
            Self::Interface { .. } => "interface",
            Self::AnyPointer => "anyPointer",
        }
    }

    /// Returns true if `value` carries this type's kind tag.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        self.kind_name() == value.kind_name()
    }
}

/// A decoded constant or default value, tagged by kind.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    /// Void, also used for "no default".
    #[default]
    Void,
    /// Bool.
    Bool(bool),
    /// Int8.
    Int8(i8),
    /// Int16.
    Int16(i16),
    /// Int32.
    Int32(i32),
    /// Int64.
    Int64(i64),
    /// UInt8.
    Uint8(u8),
    /// UInt16.
    Uint16(u16),
    /// UInt32.
    Uint32(u32),
    /// UInt64.
    Uint64(u64),
    /// Float32.
    Float32(f32),
    /// Float64.
    Float64(f64),
    /// Text.
    Text(String),
    /// Data.
    Data(Vec<u8>),
    /// List contents.
    List(ListValue),
    /// Enum ordinal.
    Enum(u16),
    /// Encoded struct.
    Struct(StructValue),
    /// Interface (always null).
    Interface,
    /// Untyped pointer.
    AnyPointer,
}

impl Value {
    /// Returns the kind tag name shared with [`Type::kind_name`].
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Bool(_) => "bool",
            Self::Int8(_) => "int8",
            Self::Int16(_) => "int16",
            Self::Int32(_) => "int32",
            Self::Int64(_) => "int64",
            Self::Uint8(_) => "uint8",
            Self::Uint16(_) => "uint16",
            Self::Uint32(_) => "uint32",
            Self::Uint64(_) => "uint64",
            Self::Float32(_) => "float32",
            Self::Float64(_) => "float64",
            Self::Text(_) => "text",
            Self::Data(_) => "data",
            Self::List(_) => "list",
            Self::Enum(_) => "enum",
            Self::Struct(_) => "struct",
            Self::Interface => "interface",
            Self::AnyPointer => "anyPointer",
        }
    }

    /// Returns the value as a primitive, for data-section kinds.
    #[must_use]
    pub const fn as_primitive(&self) -> Option<PrimitiveValue> {
        match *self {
            Self::Bool(v) => Some(PrimitiveValue::Bool(v)),
            Self::Int8(v) => Some(PrimitiveValue::Int8(v)),
            Self::Int16(v) => Some(PrimitiveValue::Int16(v)),
            Self::Int32(v) => Some(PrimitiveValue::Int32(v)),
            Self::Int64(v) => Some(PrimitiveValue::Int64(v)),
            Self::Uint8(v) => Some(PrimitiveValue::Uint8(v)),
            Self::Uint16(v) => Some(PrimitiveValue::Uint16(v)),
            Self::Uint32(v) => Some(PrimitiveValue::Uint32(v)),
            Self::Uint64(v) => Some(PrimitiveValue::Uint64(v)),
            Self::Float32(v) => Some(PrimitiveValue::Float32(v)),
            Self::Float64(v) => Some(PrimitiveValue::Float64(v)),
            _ => None,
        }
    }

    /// Returns the attached text, if any.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns true for the void value.
    #[must_use]
    pub const fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }
}

/// Decoded list contents, keyed by element representation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ListValue {
    /// List of void; only the length is encoded.
    Void(u32),
    /// List of bool.
    Bool(Vec<bool>),
    /// List of int8.
    Int8(Vec<i8>),
    /// List of int16.
    Int16(Vec<i16>),
    /// List of int32.
    Int32(Vec<i32>),
    /// List of int64.
    Int64(Vec<i64>),
    /// List of uint8.
    Uint8(Vec<u8>),
    /// List of uint16.
    Uint16(Vec<u16>),
    /// List of uint32.
    Uint32(Vec<u32>),
    /// List of uint64.
    Uint64(Vec<u64>),
    /// List of float32.
    Float32(Vec<f32>),
    /// List of float64.
    Float64(Vec<f64>),
    /// List of text.
    Text(Vec<String>),
    /// List of data.
    Data(Vec<Vec<u8>>),
    /// List of enum ordinals.
    Enum(Vec<u16>),
    /// List of encoded structs.
    Struct(Vec<StructValue>),
    /// List of pointers (lists, interfaces, any pointers); only the length is kept.
    Pointer(u32),
}

impl ListValue {
    /// Returns the kind tag name of the element representation.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Void(_) => "void",
            Self::Bool(_) => "bool",
            Self::Int8(_) => "int8",
            Self::Int16(_) => "int16",
            Self::Int32(_) => "int32",
            Self::Int64(_) => "int64",
            Self::Uint8(_) => "uint8",
            Self::Uint16(_) => "uint16",
            Self::Uint32(_) => "uint32",
            Self::Uint64(_) => "uint64",
            Self::Float32(_) => "float32",
            Self::Float64(_) => "float64",
            Self::Text(_) => "text",
            Self::Data(_) => "data",
            Self::Enum(_) => "enum",
            Self::Struct(_) => "struct",
            Self::Pointer(_) => "pointer",
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Void(n) | Self::Pointer(n) => *n as usize,
            Self::Bool(v) => v.len(),
            Self::Int8(v) => v.len(),
            Self::Int16(v) => v.len(),
            Self::Int32(v) => v.len(),
            Self::Int64(v) => v.len(),
            Self::Uint8(v) => v.len(),
            Self::Uint16(v) => v.len(),
            Self::Uint32(v) => v.len(),
            Self::Uint64(v) => v.len(),
            Self::Float32(v) => v.len(),
            Self::Float64(v) => v.len(),
            Self::Text(v) => v.len(),
            Self::Data(v) => v.len(),
            Self::Enum(v) => v.len(),
            Self::Struct(v) => v.len(),
        }
    }

    /// Returns true if the list has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An encoded struct: raw data section plus decoded pointer section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StructValue {
    /// Data section bytes, little-endian.
    #[serde(default)]
    pub data: Vec<u8>,
    /// Pointer section, one entry per pointer slot.
    #[serde(default)]
    pub pointers: Vec<Pointer>,
}

/// A decoded pointer slot.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Pointer {
    /// Null pointer.
    #[default]
    Null,
    /// Text blob.
    Text(String),
    /// Data blob.
    Data(Vec<u8>),
    /// List.
    List(ListValue),
    /// Nested struct.
    Struct(StructValue),
}

impl Pointer {
    /// Returns the pointer kind name, for diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Text(_) => "text",
            Self::Data(_) => "data",
            Self::List(_) => "list",
            Self::Struct(_) => "struct",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_primitive() {
        assert_eq!(Type::Int32.primitive(), Some(PrimitiveType::Int32));
        assert_eq!(Type::Bool.primitive(), Some(PrimitiveType::Bool));
        assert_eq!(Type::Text.primitive(), None);
        assert_eq!(Type::Struct { type_id: 1 }.primitive(), None);
    }

    #[test]
    fn test_type_accepts_matching_value() {
        assert!(Type::Int32.accepts(&Value::Int32(1)));
        assert!(!Type::Int32.accepts(&Value::Int64(1)));
        assert!(Type::Enum { type_id: 9 }.accepts(&Value::Enum(0)));
        assert!(
            Type::List {
                element_type: Box::new(Type::Text)
            }
            .accepts(&Value::List(ListValue::Text(vec![])))
        );
    }

    #[test]
    fn test_code_order_fields() {
        let json = r#"{"fields": [
            {"name": "b", "codeOrder": 1, "slot": {"type": "int32"}},
            {"name": "a", "codeOrder": 0, "slot": {"type": "int32"}}
        ]}"#;
        let node: StructNode = serde_json::from_str(json).expect("Failed to parse");
        let names: Vec<&str> = node
            .code_order_fields()
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, ["a", "b"]);
        assert!(!node.fields[0].is_union_member());
    }

    #[test]
    fn test_code_order_enumerants_keep_ordinals() {
        let json = r#"{"enumerants": [
            {"name": "zero", "codeOrder": 1},
            {"name": "one", "codeOrder": 0}
        ]}"#;
        let node: EnumNode = serde_json::from_str(json).expect("Failed to parse");
        let ordered = node.code_order_enumerants();
        assert_eq!(ordered[0].0, 1);
        assert_eq!(ordered[0].1.name, "one");
        assert_eq!(ordered[1].0, 0);
    }

    #[test]
    fn test_short_name() {
        let json = r#"{"id": 5, "displayName": "foo.capnp:Bar", "displayNamePrefixLength": 11, "struct": {}}"#;
        let node: Node = serde_json::from_str(json).expect("Failed to parse");
        assert_eq!(node.short_name(), "Bar");
        assert_eq!(node.kind_name(), "struct");
        assert!(!node.is_group());
    }

    #[test]
    fn test_value_forms() {
        let v: Value = serde_json::from_str(r#""void""#).expect("void");
        assert!(v.is_void());
        let v: Value = serde_json::from_str(r#"{"float32": 1.5}"#).expect("float32");
        assert_eq!(v.as_primitive(), Some(PrimitiveValue::Float32(1.5)));
        let v: Value = serde_json::from_str(r#"{"list": {"text": ["a", "b"]}}"#).expect("list");
        assert_eq!(v, Value::List(ListValue::Text(vec!["a".into(), "b".into()])));
        let v: Value =
            serde_json::from_str(r#"{"struct": {"data": [1, 0], "pointers": ["null", {"text": "x"}]}}"#)
                .expect("struct");
        match v {
            Value::Struct(s) => {
                assert_eq!(s.data, vec![1, 0]);
                assert_eq!(s.pointers[1], Pointer::Text("x".into()));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_list_value_len() {
        assert_eq!(ListValue::Void(3).len(), 3);
        assert_eq!(ListValue::Int16(vec![1, 2]).len(), 2);
        assert!(ListValue::Struct(vec![]).is_empty());
    }

    #[test]
    fn test_field_discriminant_defaults_to_none() {
        let json = r#"{"name": "g", "group": {"typeId": "0x10"}}"#;
        let field: Field = serde_json::from_str(json).expect("Failed to parse");
        assert_eq!(field.discriminant_value, NO_DISCRIMINANT);
        assert_eq!(field.group_id(), Some(16));
        assert!(field.slot().is_none());
    }
}
