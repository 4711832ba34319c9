//! Struct field tags from codec and constraint annotations.
//!
//! Codec tags come first, then constraint tags, each group in annotation
//! order, so output is stable across runs.

use crate::go::go_quote;
use pgo_core::PrimitiveType;
use pgo_schema::{Annotation, AnnotationCatalog, Codec, CodecSet, Presence, Type, Value};

/// Builds the tag string for a field, or `None` if it has no tags.
///
/// The result includes the enclosing backquotes.
#[must_use]
pub fn field_tags(
    catalog: &AnnotationCatalog,
    codecs: CodecSet,
    annotations: &[Annotation],
    ty: &Type,
) -> Option<String> {
    let mut tags = Vec::new();

    for annotation in annotations {
        if let Some(presence) = catalog.presence_for(annotation.id) {
            codec_tags(presence, &annotation.value, codecs, &mut tags);
        }
    }
    for annotation in annotations {
        if let Some(tag) = constraint_tag(catalog, annotation, ty) {
            tags.push(tag);
        }
    }

    if tags.is_empty() {
        None
    } else {
        Some(format!("`{}`", tags.join(" ")))
    }
}

fn codec_tags(presence: Presence, value: &Value, codecs: CodecSet, tags: &mut Vec<String>) {
    let name = value.as_text().unwrap_or("");
    let json = codecs.contains(Codec::Json);
    let msgp = codecs.contains(Codec::Msgp);

    match presence {
        Presence::Ignored => {
            if json {
                tags.push("json:\"-\"".to_string());
            }
            if msgp {
                tags.push("msg:\"-\"".to_string());
            }
        }
        Presence::Optional => {
            if json {
                tags.push(format!("json:{}", go_quote(&format!("{name},omitempty"))));
            }
            if msgp {
                tags.push(format!("msg:{}", go_quote(name)));
            }
        }
        Presence::Required => {
            if json {
                tags.push(format!("json:{}", go_quote(name)));
            }
            if msgp {
                tags.push(format!("msg:{}", go_quote(name)));
            }
        }
    }
}

fn constraint_tag(catalog: &AnnotationCatalog, annotation: &Annotation, ty: &Type) -> Option<String> {
    let id = annotation.id;
    if id == 0 {
        return None;
    }
    let value = &annotation.value;
    let numeric = ty.primitive().is_some_and(|p| p != PrimitiveType::Bool);

    let (key, text) = if numeric {
        match id {
            _ if id == catalog.multof => ("multof", number(value)?),
            _ if id == catalog.min => ("min", number(value)?),
            _ if id == catalog.max => ("max", number(value)?),
            _ => return None,
        }
    } else {
        match ty {
            Type::Text => match id {
                _ if id == catalog.format => ("format", value.as_text()?.to_string()),
                _ if id == catalog.pattern => ("pattern", value.as_text()?.to_string()),
                _ if id == catalog.minlen => ("minlen", number(value)?),
                _ if id == catalog.maxlen => ("maxlen", number(value)?),
                _ => return None,
            },
            Type::List { .. } => match id {
                _ if id == catalog.unique => ("unique", "true".to_string()),
                _ if id == catalog.minlen => ("minlen", number(value)?),
                _ if id == catalog.maxlen => ("maxlen", number(value)?),
                _ => return None,
            },
            _ => return None,
        }
    };

    Some(format!("{key}:{}", go_quote(&text)))
}

fn number(value: &Value) -> Option<String> {
    Some(match *value {
        Value::Int8(v) => v.to_string(),
        Value::Int16(v) => v.to_string(),
        Value::Int32(v) => v.to_string(),
        Value::Int64(v) => v.to_string(),
        Value::Uint8(v) => v.to_string(),
        Value::Uint16(v) => v.to_string(),
        Value::Uint32(v) => v.to_string(),
        Value::Uint64(v) => v.to_string(),
        Value::Float32(v) => v.to_string(),
        Value::Float64(v) => v.to_string(),
        _ => return None,
    })
}
