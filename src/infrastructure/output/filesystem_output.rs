//! Filesystem output for generated files
//!
//! Content goes to a temporary file next to the target and is then renamed
//! over it, so readers see either the previous file or the complete new one.

use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::fs;

use crate::generation::GenerationError;

/// Writes generated files into an output directory
pub struct FileSystemOutput {
    output_dir: PathBuf,
}

impl FileSystemOutput {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Full path for a file name inside the output directory
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    /// Atomically create or replace `file_name` with `content`
    pub async fn write(&self, file_name: &str, content: &str) -> Result<PathBuf, GenerationError> {
        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| GenerationError::io(&self.output_dir, e))?;

        let target = self.path_for(file_name);
        let dir = self.output_dir.clone();
        let bytes = content.as_bytes().to_vec();
        let destination = target.clone();

        tokio::task::spawn_blocking(move || write_atomically(&dir, &destination, &bytes))
            .await
            .map_err(|e| GenerationError::io(&target, std::io::Error::other(e.to_string())))??;

        tracing::debug!(path = %target.display(), bytes = content.len(), "Wrote generated file");
        Ok(target)
    }

    /// Current content of `file_name`, or `None` if it does not exist
    pub async fn read_existing(&self, file_name: &str) -> Result<Option<String>, GenerationError> {
        let path = self.path_for(file_name);
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(GenerationError::io(path, e)),
        }
    }
}

fn write_atomically(dir: &Path, target: &Path, bytes: &[u8]) -> Result<(), GenerationError> {
    let mut temp = NamedTempFile::new_in(dir).map_err(|e| GenerationError::io(dir, e))?;

    temp.write_all(bytes)
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| GenerationError::io(temp.path(), e))?;

    temp.persist(target)
        .map_err(|e| GenerationError::io(target, e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output = FileSystemOutput::new(temp_dir.path());

        let path = output
            .write("gen_s3_sweepers_test.go", "package s3\n")
            .await
            .unwrap();

        assert_eq!(path, temp_dir.path().join("gen_s3_sweepers_test.go"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "package s3\n");
    }

    #[tokio::test]
    async fn test_write_overwrites_and_leaves_no_temp_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output = FileSystemOutput::new(temp_dir.path());

        output.write("gen.go", "package old\n").await.unwrap();
        output.write("gen.go", "package new\n").await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("gen.go")).unwrap(),
            "package new\n"
        );
    }

    #[tokio::test]
    async fn test_write_creates_output_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let nested = temp_dir.path().join("aws/internal/service/s3");
        let output = FileSystemOutput::new(&nested);

        output.write("gen.go", "package s3\n").await.unwrap();
        assert!(nested.join("gen.go").exists());
    }

    #[tokio::test]
    async fn test_read_existing() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output = FileSystemOutput::new(temp_dir.path());

        assert_eq!(output.read_existing("gen.go").await.unwrap(), None);

        std::fs::write(temp_dir.path().join("gen.go"), "package s3\n").unwrap();
        assert_eq!(
            output.read_existing("gen.go").await.unwrap().as_deref(),
            Some("package s3\n")
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_write_into_file_path_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let blocker = temp_dir.path().join("not_a_dir");
        std::fs::write(&blocker, "").unwrap();

        let output = FileSystemOutput::new(&blocker);
        let err = output.write("gen.go", "package s3\n").await.unwrap_err();
        assert!(matches!(err, GenerationError::Io { .. }));
    }
}
