//! Sweeper template sources
//!
//! The default template is compiled into the binary. Callers may point the
//! generator at a file instead, which is read once per run.

pub mod filesystem_loader;

pub use filesystem_loader::*;

use std::fmt;
use std::path::PathBuf;

/// Template shipped with the crate
pub const EMBEDDED_SWEEPERS_TEMPLATE: &str = include_str!("../../../templates/go/sweepers_test.go.tera");

/// Name the template is registered under in Tera
pub const SWEEPERS_TEMPLATE_NAME: &str = "sweepers_test.go.tera";

/// Where a template's text came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Embedded,
    File(PathBuf),
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateSource::Embedded => write!(f, "embedded"),
            TemplateSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A loaded sweepers template
#[derive(Debug, Clone)]
pub struct SweeperTemplate {
    pub content: String,
    pub source: TemplateSource,
}

impl SweeperTemplate {
    /// The template compiled into the binary
    pub fn embedded() -> Self {
        Self {
            content: EMBEDDED_SWEEPERS_TEMPLATE.to_string(),
            source: TemplateSource::Embedded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_template_shape() {
        let template = SweeperTemplate::embedded();
        assert_eq!(template.source, TemplateSource::Embedded);
        assert!(template.content.starts_with("// Code generated by"));
        assert!(template.content.contains("for resource_type in resource_types"));
        assert!(template.content.contains("title_case"));
    }

    #[test]
    fn test_template_source_display() {
        assert_eq!(TemplateSource::Embedded.to_string(), "embedded");
        assert_eq!(
            TemplateSource::File(PathBuf::from("custom/sweepers.tera")).to_string(),
            "custom/sweepers.tera"
        );
    }
}
