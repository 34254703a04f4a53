//! Generation orchestration - the render, format, write pipeline

use std::sync::Arc;

use crate::generation::rules::validate_request;
use crate::generation::utils::output_file_name;
use crate::generation::{
    FormatterKind, GenerationError, GenerationRequest, GeneratorConfig, RenderContext,
    RenderedOutput,
};
use crate::infrastructure::formatting::{SourceFormatter, select_formatter};
use crate::infrastructure::generation::TeraTemplateRenderer;
use crate::infrastructure::output::FileSystemOutput;
use crate::infrastructure::templates::load_template;

/// Orchestrates one sweepers file generation
pub struct GenerationOrchestrator {
    formatter: Arc<dyn SourceFormatter>,
}

impl GenerationOrchestrator {
    /// Create an orchestrator with an explicit formatter
    pub fn new(formatter: Arc<dyn SourceFormatter>) -> Self {
        Self { formatter }
    }

    /// Create an orchestrator using the formatter named in the configuration
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(select_formatter(&config.formatter))
    }

    /// Validate, render and format without touching the output directory
    pub async fn render(
        &self,
        request: &GenerationRequest,
        config: &GeneratorConfig,
    ) -> Result<RenderedOutput, GenerationError> {
        // 1. Validate inputs before anything is rendered
        config.validate()?;
        validate_request(request)?;

        tracing::info!(
            service = %request.service_name,
            package = %config.package,
            resource_types = request.resource_types.len(),
            "Generating sweepers"
        );

        if let (Some(template_path), FormatterKind::Builtin) =
            (&config.template_path, &config.formatter)
        {
            // The built-in pass fixes layout only; spacing inside lines is left to the template
            tracing::warn!(
                template = %template_path.display(),
                "Custom template formatted by the built-in layout pass; use --formatter gofmt for gofmt-canonical output"
            );
        }

        // 2. Render the template
        let template = load_template(config.template_path.as_deref()).await?;
        let renderer = TeraTemplateRenderer::new(&template)?;
        let raw = renderer.render(&RenderContext::new(request, config))?;

        // 3. Format the expansion
        let formatted = self.formatter.format(&raw).await.map_err(|e| {
            tracing::error!(
                service = %request.service_name,
                formatter = self.formatter.name(),
                error = %e,
                "Generated source failed to format"
            );
            e
        })?;

        let file_name = output_file_name(&request.service_name);
        Ok(RenderedOutput {
            path: config.output_dir.join(file_name),
            raw,
            formatted,
        })
    }

    /// Render and write the sweepers file
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        config: &GeneratorConfig,
    ) -> Result<RenderedOutput, GenerationError> {
        let rendered = self.render(request, config).await?;

        // 4. Write only after every earlier stage succeeded
        let output = FileSystemOutput::new(&config.output_dir);
        output
            .write(&output_file_name(&request.service_name), &rendered.formatted)
            .await?;

        tracing::info!(path = %rendered.path.display(), "Generated sweepers file");
        Ok(rendered)
    }

    /// Render and compare against the file on disk without writing
    pub async fn check(
        &self,
        request: &GenerationRequest,
        config: &GeneratorConfig,
    ) -> Result<RenderedOutput, GenerationError> {
        let rendered = self.render(request, config).await?;

        let output = FileSystemOutput::new(&config.output_dir);
        match output
            .read_existing(&output_file_name(&request.service_name))
            .await?
        {
            Some(existing) if existing == rendered.formatted => {
                tracing::info!(path = %rendered.path.display(), "Sweepers file is up to date");
                Ok(rendered)
            }
            Some(_) => Err(GenerationError::Stale(format!(
                "{} differs from generated output",
                rendered.path.display()
            ))),
            None => Err(GenerationError::Stale(format!(
                "{} does not exist",
                rendered.path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::ResourceTypeSpec;
    use async_trait::async_trait;
    use tempfile::TempDir;
    use tracing_test::traced_test;

    struct RejectingFormatter;

    #[async_trait]
    impl SourceFormatter for RejectingFormatter {
        fn name(&self) -> &'static str {
            "rejecting"
        }

        async fn format(&self, _source: &str) -> Result<String, GenerationError> {
            Err(GenerationError::Format("expected declaration".to_string()))
        }
    }

    fn bucket_request() -> GenerationRequest {
        GenerationRequest::new("s3").with_resource_type(
            "Bucket",
            ResourceTypeSpec::new("ListBucketsPages", "ListBucketsOutput", "Buckets", "Name"),
        )
    }

    #[tokio::test]
    async fn test_generate_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = GeneratorConfig::new("s3").with_output_dir(temp_dir.path());
        let orchestrator = GenerationOrchestrator::from_config(&config);

        let rendered = orchestrator
            .generate(&bucket_request(), &config)
            .await
            .unwrap();

        assert_eq!(rendered.path, temp_dir.path().join("gen_s3_sweepers_test.go"));
        let written = std::fs::read_to_string(&rendered.path).unwrap();
        assert_eq!(written, rendered.formatted);
        assert!(written.contains("func testSweepS3Buckets(region string) error {"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_generate_logs_service_and_path() {
        let temp_dir = TempDir::new().unwrap();
        let config = GeneratorConfig::new("s3").with_output_dir(temp_dir.path());
        let orchestrator = GenerationOrchestrator::from_config(&config);

        orchestrator
            .generate(&bucket_request(), &config)
            .await
            .unwrap();

        assert!(logs_contain("Generating sweepers"));
        assert!(logs_contain("service=s3"));
        assert!(logs_contain("gen_s3_sweepers_test.go"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_custom_template_with_builtin_formatter_warns() {
        let temp_dir = TempDir::new().unwrap();
        let template_path = temp_dir.path().join("custom.tera");
        std::fs::write(&template_path, "package {{ package }}\n").unwrap();

        let config = GeneratorConfig::new("s3")
            .with_output_dir(temp_dir.path())
            .with_template_path(&template_path);
        let orchestrator = GenerationOrchestrator::from_config(&config);

        orchestrator.render(&bucket_request(), &config).await.unwrap();

        assert!(logs_contain("built-in layout pass"));
        assert!(logs_contain("custom.tera"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_embedded_template_does_not_warn() {
        let temp_dir = TempDir::new().unwrap();
        let config = GeneratorConfig::new("s3").with_output_dir(temp_dir.path());
        let orchestrator = GenerationOrchestrator::from_config(&config);

        orchestrator.render(&bucket_request(), &config).await.unwrap();

        assert!(!logs_contain("built-in layout pass"));
    }

    #[tokio::test]
    async fn test_format_failure_leaves_previous_file() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("gen_s3_sweepers_test.go");
        std::fs::write(&target, "package previous\n").unwrap();

        let config = GeneratorConfig::new("s3").with_output_dir(temp_dir.path());
        let orchestrator = GenerationOrchestrator::new(Arc::new(RejectingFormatter));

        let err = orchestrator
            .generate(&bucket_request(), &config)
            .await
            .unwrap_err();

        assert!(matches!(err, GenerationError::Format(_)));
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "package previous\n");
    }

    #[tokio::test]
    async fn test_invalid_type_name_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let config = GeneratorConfig::new("s3").with_output_dir(temp_dir.path());
        let orchestrator = GenerationOrchestrator::from_config(&config);
        let request = GenerationRequest::new("s3").with_resource_type(
            "Bucket Policy",
            ResourceTypeSpec::new("ListPoliciesPages", "ListPoliciesOutput", "Policies", "Name"),
        );

        let err = orchestrator.generate(&request, &config).await.unwrap_err();

        assert!(matches!(err, GenerationError::Validation(_)));
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_check_reports_stale_and_fresh() {
        let temp_dir = TempDir::new().unwrap();
        let config = GeneratorConfig::new("s3").with_output_dir(temp_dir.path());
        let orchestrator = GenerationOrchestrator::from_config(&config);
        let request = bucket_request();

        let missing = orchestrator.check(&request, &config).await.unwrap_err();
        assert!(matches!(missing, GenerationError::Stale(_)));

        orchestrator.generate(&request, &config).await.unwrap();
        assert!(orchestrator.check(&request, &config).await.is_ok());

        std::fs::write(temp_dir.path().join("gen_s3_sweepers_test.go"), "package s3\n").unwrap();
        let differs = orchestrator.check(&request, &config).await.unwrap_err();
        assert!(differs.to_string().contains("differs"));
    }
}
