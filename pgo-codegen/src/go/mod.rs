//! Go code generation modules.

pub mod consts;
pub mod enums;
pub mod json;
pub mod scope;
pub mod structs;
pub mod tags;
pub mod types;
pub mod values;

pub use consts::ConstGenerator;
pub use enums::EnumGenerator;
pub use json::JsonGenerator;
pub use scope::EmitScope;
pub use structs::StructGenerator;

use pgo_schema::{AnnotationCatalog, Field, capitalize};

/// Import path of the Go Cap'n Proto runtime.
pub const GO_CAPNP_IMPORT: &str = "github.com/glycerine/go-capnproto";

/// Marker emitted where a value could not be encoded.
pub const PLACEHOLDER: &str = "/* Not implemented */";

/// Returns the Go member name of a field (name override, else declared name).
#[must_use]
pub fn field_name(catalog: &AnnotationCatalog, field: &Field) -> String {
    capitalize(catalog.name_override(&field.annotations).unwrap_or(&field.name))
}

/// Returns the constant name `UPPER(owner)_UPPER(member)`.
#[must_use]
pub fn member_const(owner: &str, member: &str) -> String {
    format!("{}_{}", owner.to_uppercase(), member.to_uppercase())
}

/// Quotes a string as a Go interpreted string literal.
#[must_use]
pub fn go_quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Appends one line of Go source at the given tab depth.
pub(crate) fn line(out: &mut String, depth: usize, text: &str) {
    for _ in 0..depth {
        out.push('\t');
    }
    out.push_str(text);
    out.push('\n');
}
