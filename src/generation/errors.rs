//! Error types for the generation domain

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while generating a sweepers file
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Format error: {0}")]
    Format(String),

    #[error("IO error ({}): {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Definitions error: {0}")]
    Definitions(String),

    #[error("Generated file is out of date: {0}")]
    Stale(String),
}

impl GenerationError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Name of the pipeline stage that produced this error
    pub fn stage(&self) -> &'static str {
        match self {
            GenerationError::MissingConfiguration(_) => "configuration",
            GenerationError::Validation(_) => "validation",
            GenerationError::Template(_) => "template",
            GenerationError::Format(_) => "format",
            GenerationError::Io { .. } => "io",
            GenerationError::Definitions(_) => "definitions",
            GenerationError::Stale(_) => "check",
        }
    }
}

impl From<tera::Error> for GenerationError {
    fn from(err: tera::Error) -> Self {
        // Tera nests the useful message in its source chain
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(inner) = source {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            source = inner.source();
        }
        GenerationError::Template(message)
    }
}
