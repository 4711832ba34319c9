//! Generator options.

/// Handling of value shapes that cannot be encoded faithfully.
///
/// Affected shapes are list-of-struct values, list-of-list and
/// list-of-pointer values, and non-primitive fields inside struct values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Emit a `/* Not implemented */` placeholder and record a [`Limitation`].
    #[default]
    Lenient,
    /// Fail with `CodegenError::Unsupported`.
    Strict,
}

/// Options controlling generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Unsupported value handling.
    pub strictness: Strictness,
    /// Emit full JSON writers; when false only a stub `MarshalJSON` is emitted.
    pub json_writers: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            strictness: Strictness::Lenient,
            json_writers: true,
        }
    }
}

impl GeneratorOptions {
    /// Sets the strictness mode.
    #[must_use]
    pub const fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    /// Enables or disables JSON writers.
    #[must_use]
    pub const fn with_json_writers(mut self, enabled: bool) -> Self {
        self.json_writers = enabled;
        self
    }
}

/// An unsupported value shape replaced by a placeholder in lenient mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limitation {
    /// Unsupported shape.
    pub feature: &'static str,
    /// Where the shape was found.
    pub context: String,
}
