//! Type mapping from schema types to Go types.

use crate::error::CodegenError;
use crate::go::scope::EmitScope;
use pgo_schema::{Slot, Type, Value};

/// A `customtype` annotation split into its Go type and import path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomType {
    /// Go type expression, qualified by the package's last path element.
    pub go_type: String,
    /// Package import path, if the type lives in a package.
    pub import: Option<String>,
}

impl CustomType {
    /// Parses `path/to/pkg.Type`, `pkg.Type` or a bare predeclared type.
    #[must_use]
    pub fn parse(declared: &str) -> Self {
        match declared.rsplit_once('.') {
            Some((path, ty)) if !path.is_empty() && !ty.is_empty() => {
                let package = path.rsplit('/').next().unwrap_or(path);
                Self {
                    go_type: format!("{package}.{ty}"),
                    import: Some(path.to_string()),
                }
            }
            _ => Self {
                go_type: declared.to_string(),
                import: None,
            },
        }
    }
}

/// Checks that a default value's kind agrees with its declared type.
///
/// A void default means "no default" and is accepted for every type.
///
/// # Errors
/// Returns `CodegenError::ValueMismatch` when the kinds disagree.
pub fn check_default(ty: &Type, value: &Value, context: &str) -> Result<(), CodegenError> {
    if value.is_void() || ty.accepts(value) {
        Ok(())
    } else {
        Err(CodegenError::value_mismatch(
            context,
            ty.kind_name(),
            value.kind_name(),
        ))
    }
}

impl EmitScope<'_> {
    /// Maps a schema type to a Go type expression.
    ///
    /// # Errors
    /// Returns `CodegenError` if a referenced enum or struct cannot be named.
    pub fn go_type(&mut self, ty: &Type) -> Result<String, CodegenError> {
        if let Some(primitive) = ty.primitive() {
            return Ok(primitive.go_type().to_string());
        }
        Ok(match ty {
            Type::Void => "struct{}".to_string(),
            Type::Text => "string".to_string(),
            Type::Data => "[]byte".to_string(),
            Type::Enum { type_id } | Type::Struct { type_id } => self.remote_name(*type_id)?,
            Type::Interface { .. } | Type::AnyPointer => "interface{}".to_string(),
            Type::List { element_type } => match element_type.as_ref() {
                Type::Void | Type::Interface { .. } => "[]struct{}".to_string(),
                Type::List { .. } | Type::AnyPointer => "[]interface{}".to_string(),
                element => format!("[]{}", self.go_type(element)?),
            },
            _ => {
                return Err(CodegenError::generation(format!(
                    "no Go type for {}",
                    ty.kind_name()
                )));
            }
        })
    }

    /// Maps a slot field to its Go type, honouring a `customtype` override.
    ///
    /// # Errors
    /// Returns `CodegenError::ValueMismatch` if the slot's default disagrees
    /// with its type, or any error from [`go_type`](Self::go_type).
    pub fn slot_type(
        &mut self,
        slot: &Slot,
        customtype: Option<&str>,
        context: &str,
    ) -> Result<String, CodegenError> {
        check_default(&slot.ty, &slot.default_value, context)?;

        match customtype.filter(|c| !c.is_empty()) {
            Some(declared) => {
                let custom = CustomType::parse(declared);
                tracing::debug!(context, go_type = %custom.go_type, "custom type");
                if let Some(import) = custom.import {
                    self.import(import);
                }
                Ok(custom.go_type)
            }
            None => self.go_type(&slot.ty),
        }
    }
}
