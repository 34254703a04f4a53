//! Formatter that pipes source through an external `gofmt` binary

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::SourceFormatter;
use crate::generation::GenerationError;

/// Runs `gofmt` with the source on stdin and reads the result from stdout
pub struct GofmtFormatter {
    binary: PathBuf,
}

impl GofmtFormatter {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for GofmtFormatter {
    fn default() -> Self {
        Self::new("gofmt")
    }
}

#[async_trait]
impl SourceFormatter for GofmtFormatter {
    fn name(&self) -> &'static str {
        "gofmt"
    }

    async fn format(&self, source: &str) -> Result<String, GenerationError> {
        let mut child = Command::new(&self.binary)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                GenerationError::Format(format!(
                    "Failed to run '{}': {e}",
                    self.binary.display()
                ))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(source.as_bytes()).await.map_err(|e| {
                GenerationError::Format(format!("Failed to write to gofmt: {e}"))
            })?;
            // Dropping stdin closes the pipe so gofmt sees EOF
        }

        let output = child.wait_with_output().await.map_err(|e| {
            GenerationError::Format(format!("Failed to wait for gofmt: {e}"))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::debug!(
                binary = %self.binary.display(),
                exit_code = output.status.code().unwrap_or(-1),
                "gofmt rejected generated source"
            );
            return Err(GenerationError::Format(stderr.trim().to_string()));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| GenerationError::Format(format!("gofmt produced invalid UTF-8: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_is_format_error() {
        let formatter = GofmtFormatter::new("/nonexistent/bin/gofmt");
        let err = formatter.format("package demo\n").await.unwrap_err();

        assert!(matches!(err, GenerationError::Format(_)));
        assert!(err.to_string().contains("/nonexistent/bin/gofmt"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_passes_source_through_stdin() {
        // `cat` stands in for a formatter that accepts its input unchanged
        let formatter = GofmtFormatter::new("cat");
        let formatted = formatter.format("package demo\n").await.unwrap();
        assert_eq!(formatted, "package demo\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_format_error() {
        let formatter = GofmtFormatter::new("false");
        let err = formatter.format("package demo\n").await.unwrap_err();
        assert!(matches!(err, GenerationError::Format(_)));
    }
}
