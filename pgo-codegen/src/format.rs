//! Source formatting of generated files.

use crate::error::CodegenError;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Formats a generated source file before it is written.
pub trait SourceFormatter {
    /// Returns the formatted source.
    ///
    /// # Errors
    /// Returns `CodegenError::Format` if the source cannot be formatted.
    fn format(&self, source: &str) -> Result<String, CodegenError>;
}

/// Leaves sources as generated.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unformatted;

impl SourceFormatter for Unformatted {
    fn format(&self, source: &str) -> Result<String, CodegenError> {
        Ok(source.to_string())
    }
}

/// Pipes sources through the `gofmt` binary.
#[derive(Debug, Clone)]
pub struct Gofmt {
    binary: PathBuf,
}

impl Default for Gofmt {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("gofmt"),
        }
    }
}

impl Gofmt {
    /// Uses the given `gofmt` binary instead of the one on `PATH`.
    #[must_use]
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl SourceFormatter for Gofmt {
    fn format(&self, source: &str) -> Result<String, CodegenError> {
        let mut child = Command::new(&self.binary)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| CodegenError::format(format!("cannot run {}: {e}", self.binary.display())))?;

        // gofmt consumes all of stdin before writing any output.
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(source.as_bytes()) {
                drop(stdin);
                // The child may already have exited.
                let _ = child.kill();
                let _ = child.wait();
                return Err(CodegenError::format(format!(
                    "cannot write to {}: {e}",
                    self.binary.display()
                )));
            }
        }
        let output = child.wait_with_output()?;

        if !output.status.success() {
            return Err(CodegenError::format(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }
        String::from_utf8(output.stdout).map_err(|e| CodegenError::format(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unformatted_is_identity() {
        let source = "package x\n\ntype A struct {\nX int32\n}\n";
        assert_eq!(Unformatted.format(source).expect("format"), source);
    }

    #[test]
    fn test_missing_gofmt_binary() {
        let formatter = Gofmt::with_binary("/nonexistent/gofmt-for-tests");
        let result = formatter.format("package x\n");
        assert!(matches!(result, Err(CodegenError::Format { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_formatter_that_ignores_stdin() {
        // `true` exits without reading, so a source larger than the pipe
        // buffer cannot be written.
        let formatter = Gofmt::with_binary("true");
        let source = "// filler\n".repeat(256 * 1024);
        let err = formatter.format(&source).unwrap_err();
        assert!(matches!(err, CodegenError::Format { .. }));
        assert!(err.to_string().contains("cannot write to true"));
    }
}
