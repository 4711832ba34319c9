//! Annotation catalog and codec sets.
//!
//! Annotation ids are opaque 64-bit keys defined by external schema files
//! (`go.capnp` for Go naming and packaging, `caps.capnp` for codecs and field
//! constraints). The catalog maps each concern the generator understands to
//! the id that carries it.

use crate::registry::NodeRegistry;
use crate::types::{Annotation, NodeKind, Value};
use serde::{Deserialize, Serialize};

/// Optional serialization capabilities toggled per file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    /// Cap'n Proto wire translators.
    Wire,
    /// JSON tags and writers.
    Json,
    /// MessagePack tags.
    Msgp,
}

impl Codec {
    const fn bit(self) -> u8 {
        match self {
            Self::Wire => 0b001,
            Self::Json => 0b010,
            Self::Msgp => 0b100,
        }
    }

    /// Returns the codec name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wire => "capnp",
            Self::Json => "json",
            Self::Msgp => "msgp",
        }
    }
}

/// A set of enabled codecs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CodecSet(u8);

impl CodecSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Adds a codec.
    pub fn insert(&mut self, codec: Codec) {
        self.0 |= codec.bit();
    }

    /// Returns true if the codec is enabled.
    #[must_use]
    pub const fn contains(self, codec: Codec) -> bool {
        self.0 & codec.bit() != 0
    }

    /// Returns the union of both sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns true if no codec is enabled.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Codec> for CodecSet {
    fn from_iter<I: IntoIterator<Item = Codec>>(iter: I) -> Self {
        let mut set = Self::new();
        for codec in iter {
            set.insert(codec);
        }
        set
    }
}

/// Field presence semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Presence {
    /// Always serialized.
    Required,
    /// Omitted when empty.
    Optional,
    /// Never serialized.
    Ignored,
}

impl Presence {
    /// Returns the annotation name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Optional => "optional",
            Self::Ignored => "ignored",
        }
    }
}

/// Annotation ids understood by the generator.
///
/// Ids of zero are unset and never match. `go.capnp` ids default to their
/// published values; `caps.capnp` ids are filled in by [`discover`](Self::discover)
/// or by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnnotationCatalog {
    /// Go package name (file).
    #[serde(deserialize_with = "crate::id::deserialize")]
    pub package: u64,
    /// Go import path (file).
    #[serde(deserialize_with = "crate::id::deserialize")]
    pub import: u64,
    /// Documentation comment.
    #[serde(deserialize_with = "crate::id::deserialize")]
    pub doc: u64,
    /// Enumerant string tag.
    #[serde(deserialize_with = "crate::id::deserialize")]
    pub tag: u64,
    /// Enumerant without string tag.
    #[serde(deserialize_with = "crate::id::deserialize")]
    pub notag: u64,
    /// Go type substitution for a field.
    #[serde(deserialize_with = "crate::id::deserialize")]
    pub customtype: u64,
    /// Name override.
    #[serde(deserialize_with = "crate::id::deserialize")]
    pub name: u64,
    /// Wire codec toggle (file).
    #[serde(deserialize_with = "crate::id::deserialize")]
    pub capnp: u64,
    /// JSON codec toggle (file).
    #[serde(deserialize_with = "crate::id::deserialize")]
    pub json: u64,
    /// MessagePack codec toggle (file).
    #[serde(deserialize_with = "crate::id::deserialize")]
    pub msgp: u64,
    /// Required field.
    #[serde(deserialize_with = "crate::id::deserialize")]
    pub required: u64,
    /// Optional field.
    #[serde(deserialize_with = "crate::id::deserialize")]
    pub optional: u64,
    /// Ignored field.
    #[serde(deserialize_with = "crate::id::deserialize")]
    pub ignored: u64,
    /// Numeric multiple-of bound.
    #[serde(deserialize_with = "crate::id::deserialize")]
    pub multof: u64,
    /// Numeric minimum.
    #[serde(deserialize_with = "crate::id::deserialize")]
    pub min: u64,
    /// Numeric maximum.
    #[serde(deserialize_with = "crate::id::deserialize")]
    pub max: u64,
    /// Text format.
    #[serde(deserialize_with = "crate::id::deserialize")]
    pub format: u64,
    /// Text pattern.
    #[serde(deserialize_with = "crate::id::deserialize")]
    pub pattern: u64,
    /// Minimum text or list length.
    #[serde(deserialize_with = "crate::id::deserialize")]
    pub minlen: u64,
    /// Maximum text or list length.
    #[serde(deserialize_with = "crate::id::deserialize")]
    pub maxlen: u64,
    /// List uniqueness.
    #[serde(deserialize_with = "crate::id::deserialize")]
    pub unique: u64,
}

impl Default for AnnotationCatalog {
    fn default() -> Self {
        Self {
            package: 0xbea9_7f10_2379_2be0,
            import: 0xe130_b601_260e_44b5,
            doc: 0xc58a_d6bd_519f_935e,
            tag: 0xa574_b419_24ca_efc7,
            notag: 0xc876_8679_ec52_e012,
            customtype: 0xfa10_659a_e02f_2093,
            name: 0xc2b9_6012_172f_8df1,
            capnp: 0,
            json: 0,
            msgp: 0,
            required: 0,
            optional: 0,
            ignored: 0,
            multof: 0,
            min: 0,
            max: 0,
            format: 0,
            pattern: 0,
            minlen: 0,
            maxlen: 0,
            unique: 0,
        }
    }
}

impl AnnotationCatalog {
    /// Fills unset ids from annotation declarations present in the request.
    ///
    /// Declarations are matched by display name: `caps.capnp:json` sets
    /// [`json`](Self::json), `go.capnp:package` sets [`package`](Self::package),
    /// and so on. Ids that are already set are left alone.
    pub fn discover(&mut self, registry: &NodeRegistry) {
        for node in registry.iter() {
            if !matches!(node.kind, NodeKind::Annotation(_)) {
                continue;
            }
            let Some((file, local)) = node.display_name.rsplit_once(':') else {
                continue;
            };
            let slot = if file.ends_with("caps.capnp") {
                self.caps_slot(local)
            } else if file.ends_with("go.capnp") {
                self.go_slot(local)
            } else {
                None
            };
            if let Some(slot) = slot.filter(|slot| **slot == 0) {
                tracing::debug!(annotation = %node.display_name, id = node.id, "annotation discovered");
                *slot = node.id;
            }
        }
    }

    fn caps_slot(&mut self, local: &str) -> Option<&mut u64> {
        match local {
            "capnp" => Some(&mut self.capnp),
            "json" => Some(&mut self.json),
            "msgp" => Some(&mut self.msgp),
            "required" => Some(&mut self.required),
            "optional" => Some(&mut self.optional),
            "ignored" => Some(&mut self.ignored),
            "multof" => Some(&mut self.multof),
            "min" => Some(&mut self.min),
            "max" => Some(&mut self.max),
            "format" => Some(&mut self.format),
            "pattern" => Some(&mut self.pattern),
            "minlen" => Some(&mut self.minlen),
            "maxlen" => Some(&mut self.maxlen),
            "unique" => Some(&mut self.unique),
            _ => None,
        }
    }

    fn go_slot(&mut self, local: &str) -> Option<&mut u64> {
        match local {
            "package" => Some(&mut self.package),
            "import" => Some(&mut self.import),
            "doc" => Some(&mut self.doc),
            "tag" => Some(&mut self.tag),
            "notag" => Some(&mut self.notag),
            "customtype" => Some(&mut self.customtype),
            "name" => Some(&mut self.name),
            _ => None,
        }
    }

    /// Returns the codec toggled by an annotation id.
    #[must_use]
    pub fn codec_for(&self, id: u64) -> Option<Codec> {
        if id == 0 {
            None
        } else if id == self.capnp {
            Some(Codec::Wire)
        } else if id == self.json {
            Some(Codec::Json)
        } else if id == self.msgp {
            Some(Codec::Msgp)
        } else {
            None
        }
    }

    /// Returns the presence semantics selected by an annotation id.
    #[must_use]
    pub fn presence_for(&self, id: u64) -> Option<Presence> {
        if id == 0 {
            None
        } else if id == self.required {
            Some(Presence::Required)
        } else if id == self.optional {
            Some(Presence::Optional)
        } else if id == self.ignored {
            Some(Presence::Ignored)
        } else {
            None
        }
    }

    /// Returns the first annotation with the given id.
    #[must_use]
    pub fn find<'a>(&self, annotations: &'a [Annotation], id: u64) -> Option<&'a Annotation> {
        if id == 0 {
            return None;
        }
        annotations.iter().find(|a| a.id == id)
    }

    /// Returns the text of the first annotation with the given id.
    #[must_use]
    pub fn text<'a>(&self, annotations: &'a [Annotation], id: u64) -> Option<&'a str> {
        self.find(annotations, id).and_then(|a| a.value.as_text())
    }

    /// Returns the non-empty name override, if any.
    #[must_use]
    pub fn name_override<'a>(&self, annotations: &'a [Annotation]) -> Option<&'a str> {
        if self.name == 0 {
            return None;
        }
        annotations
            .iter()
            .filter(|a| a.id == self.name)
            .filter_map(|a| a.value.as_text())
            .find(|name| !name.is_empty())
    }

    /// Returns every documentation string, in annotation order.
    #[must_use]
    pub fn docs<'a>(&self, annotations: &'a [Annotation]) -> Vec<&'a str> {
        if self.doc == 0 {
            return Vec::new();
        }
        annotations
            .iter()
            .filter(|a| a.id == self.doc)
            .filter_map(|a| a.value.as_text())
            .collect()
    }

    /// Returns the codecs enabled by file-level annotations.
    ///
    /// Codec toggles carry no text; text-valued annotations never enable a codec.
    #[must_use]
    pub fn codecs(&self, annotations: &[Annotation]) -> CodecSet {
        annotations
            .iter()
            .filter(|a| !matches!(a.value, Value::Text(_)))
            .filter_map(|a| self.codec_for(a.id))
            .collect()
    }

    /// Returns the presence annotations applied to a field, in annotation order.
    #[must_use]
    pub fn presences(&self, annotations: &[Annotation]) -> Vec<Presence> {
        annotations
            .iter()
            .filter_map(|a| self.presence_for(a.id))
            .collect()
    }
}
