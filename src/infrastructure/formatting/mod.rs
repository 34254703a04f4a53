//! Source formatters for generated Go code

pub mod canonical;
pub mod gofmt;

pub use canonical::CanonicalGoFormatter;
pub use gofmt::GofmtFormatter;

use async_trait::async_trait;
use std::sync::Arc;

use crate::generation::{FormatterKind, GenerationError};

/// Formats generated source before it is written.
///
/// A formatter must reject input that is not valid source instead of
/// passing it through.
#[async_trait]
pub trait SourceFormatter: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    async fn format(&self, source: &str) -> Result<String, GenerationError>;
}

/// Select the formatter for the configured kind
pub fn select_formatter(kind: &FormatterKind) -> Arc<dyn SourceFormatter> {
    match kind {
        FormatterKind::Builtin => Arc::new(CanonicalGoFormatter::new()),
        FormatterKind::Gofmt { binary } => Arc::new(GofmtFormatter::new(binary.clone())),
    }
}
