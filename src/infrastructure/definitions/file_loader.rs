//! File-based definitions loader
//!
//! A definitions file describes one service and its resource types:
//!
//! ```yaml
//! service_name: s3
//! resource_types:
//!   Bucket:
//!     lister_function: ListBucketsPages
//!     lister_output_type: ListBucketsOutput
//!     lister_page_field: Buckets
//!     resource_name_function: Name
//! ```

use std::path::Path;
use tokio::fs;

use crate::generation::{GenerationError, GenerationRequest};

/// Read and parse a definitions file
pub async fn load_definitions(path: &Path) -> Result<GenerationRequest, GenerationError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| GenerationError::io(path, e))?;

    let request = parse_definitions(&content, path)?;

    tracing::debug!(
        path = %path.display(),
        service = %request.service_name,
        resource_types = request.resource_types.len(),
        "Loaded sweeper definitions"
    );

    Ok(request)
}

/// Parse definitions, picking the format from the file extension
pub fn parse_definitions(content: &str, path: &Path) -> Result<GenerationRequest, GenerationError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("json") => serde_json::from_str(content)
            .map_err(|e| GenerationError::Definitions(format!("Failed to parse JSON: {e}"))),
        Some("yaml") | Some("yml") => serde_yaml::from_str(content)
            .map_err(|e| GenerationError::Definitions(format!("Failed to parse YAML: {e}"))),
        Some("toml") => toml::from_str(content)
            .map_err(|e| GenerationError::Definitions(format!("Failed to parse TOML: {e}"))),
        _ => {
            // Try JSON first, then YAML
            serde_json::from_str(content)
                .or_else(|_| serde_yaml::from_str(content))
                .map_err(|e| {
                    GenerationError::Definitions(format!(
                        "Failed to parse definitions {}: {e}",
                        path.display()
                    ))
                })
        }
    }
}
