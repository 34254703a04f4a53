//! Filesystem-based template loader

use std::path::Path;
use tokio::fs;

use super::{SweeperTemplate, TemplateSource};
use crate::generation::GenerationError;

/// Load the sweepers template, preferring an override file when one is given
pub async fn load_template(
    template_path: Option<&Path>,
) -> Result<SweeperTemplate, GenerationError> {
    let Some(path) = template_path else {
        return Ok(SweeperTemplate::embedded());
    };

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| GenerationError::io(path, e))?;

    tracing::debug!(path = %path.display(), "Loaded sweepers template override");

    Ok(SweeperTemplate {
        content,
        source: TemplateSource::File(path.to_path_buf()),
    })
}
