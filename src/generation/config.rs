//! Generator configuration, resolved once by the caller

use std::path::PathBuf;

use crate::generation::GenerationError;

/// Environment variable `go generate` sets to the package of the invoking file
pub const PACKAGE_ENV_VAR: &str = "GOPACKAGE";

/// Go predicate that classifies listing errors the sweeper should skip
pub const DEFAULT_SKIP_ERROR_PREDICATE: &str = "testSweepSkipSweepError";

/// Go module path of the provider that owns the per-service `lister` packages
pub const DEFAULT_MODULE_PATH: &str = "github.com/terraform-providers/terraform-provider-aws";

/// Which formatter the generated source is passed through
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormatterKind {
    /// In-process canonical formatter
    #[default]
    Builtin,
    /// External `gofmt` binary
    Gofmt { binary: PathBuf },
}

/// Everything the pipeline needs besides the request itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub package: String,
    pub output_dir: PathBuf,
    pub formatter: FormatterKind,
    pub skip_error_predicate: String,
    pub module_path: String,
    pub template_path: Option<PathBuf>,
}

impl GeneratorConfig {
    /// Create a configuration for the given destination package
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            output_dir: PathBuf::from("."),
            formatter: FormatterKind::default(),
            skip_error_predicate: DEFAULT_SKIP_ERROR_PREDICATE.to_string(),
            module_path: DEFAULT_MODULE_PATH.to_string(),
            template_path: None,
        }
    }

    /// Resolve the configuration from the process environment
    pub fn from_env() -> Result<Self, GenerationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the configuration through an arbitrary lookup function.
    ///
    /// An unset or empty package variable is a fatal configuration error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GenerationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(PACKAGE_ENV_VAR) {
            Some(package) if !package.trim().is_empty() => Ok(Self::new(package.trim())),
            _ => Err(GenerationError::MissingConfiguration(format!(
                "required environment variable {PACKAGE_ENV_VAR} not defined"
            ))),
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_formatter(mut self, formatter: FormatterKind) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn with_skip_error_predicate(mut self, predicate: impl Into<String>) -> Self {
        self.skip_error_predicate = predicate.into();
        self
    }

    pub fn with_module_path(mut self, module_path: impl Into<String>) -> Self {
        self.module_path = module_path.into();
        self
    }

    pub fn with_template_path(mut self, template_path: impl Into<PathBuf>) -> Self {
        self.template_path = Some(template_path.into());
        self
    }

    /// Validate values that end up spliced into generated source
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.package.trim().is_empty() {
            return Err(GenerationError::MissingConfiguration(format!(
                "destination package not set ({PACKAGE_ENV_VAR})"
            )));
        }
        crate::generation::rules::validate_package_name(&self.package)?;

        crate::generation::rules::validate_go_reference(&self.skip_error_predicate)?;

        if self.module_path.trim().is_empty() {
            return Err(GenerationError::Validation(
                "Module path cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_reads_package() {
        let config = GeneratorConfig::from_lookup(lookup_from(&[("GOPACKAGE", "s3")])).unwrap();
        assert_eq!(config.package, "s3");
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.formatter, FormatterKind::Builtin);
        assert_eq!(config.skip_error_predicate, DEFAULT_SKIP_ERROR_PREDICATE);
    }

    #[test]
    fn test_from_lookup_missing_package() {
        let err = GeneratorConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, GenerationError::MissingConfiguration(_)));
        assert!(err.to_string().contains("GOPACKAGE"));
    }

    #[test]
    fn test_from_lookup_empty_package() {
        let err = GeneratorConfig::from_lookup(lookup_from(&[("GOPACKAGE", "  ")])).unwrap_err();
        assert!(matches!(err, GenerationError::MissingConfiguration(_)));
    }

    #[test]
    fn test_validate() {
        assert!(GeneratorConfig::new("aws").validate().is_ok());
        assert!(GeneratorConfig::new("not-a-package").validate().is_err());
        assert!(matches!(
            GeneratorConfig::new("").validate(),
            Err(GenerationError::MissingConfiguration(_))
        ));
        assert!(
            GeneratorConfig::new("aws")
                .with_skip_error_predicate("")
                .validate()
                .is_err()
        );
    }
}
