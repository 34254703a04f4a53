//! Render context - the typed data handed to the template engine

use serde::Serialize;

use crate::generation::{GenerationRequest, GeneratorConfig, ResourceTypeSpec};

/// One resource type as the template sees it
#[derive(Debug, Clone, Serialize)]
pub struct ResourceTypeContext<'a> {
    pub name: &'a str,
    #[serde(flatten)]
    pub spec: &'a ResourceTypeSpec,
}

/// Everything the sweepers template can reference
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext<'a> {
    pub package: &'a str,
    pub service_name: &'a str,
    pub module_path: &'a str,
    pub skip_error_predicate: &'a str,
    /// Sorted by resource-type name
    pub resource_types: Vec<ResourceTypeContext<'a>>,
}

impl<'a> RenderContext<'a> {
    pub fn new(request: &'a GenerationRequest, config: &'a GeneratorConfig) -> Self {
        let resource_types = request
            .resource_types
            .iter()
            .map(|(name, spec)| ResourceTypeContext { name, spec })
            .collect();

        Self {
            package: &config.package,
            service_name: &request.service_name,
            module_path: config.module_path.trim_end_matches('/'),
            skip_error_predicate: &config.skip_error_predicate,
            resource_types,
        }
    }

    /// Convert into a Tera context
    pub fn to_tera_context(&self) -> Result<tera::Context, tera::Error> {
        tera::Context::from_serialize(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_context_flattens_resource_types() {
        let request = GenerationRequest::new("s3").with_resource_type(
            "Bucket",
            ResourceTypeSpec::new("ListBucketsPages", "ListBucketsOutput", "Buckets", "Name"),
        );
        let config = GeneratorConfig::new("s3").with_module_path("example.com/provider/");

        let context = RenderContext::new(&request, &config);
        assert_eq!(context.module_path, "example.com/provider");

        let value = serde_json::to_value(&context).unwrap();
        assert_eq!(value["package"], "s3");
        assert_eq!(value["resource_types"][0]["name"], "Bucket");
        assert_eq!(
            value["resource_types"][0]["lister_function"],
            "ListBucketsPages"
        );
        assert_eq!(value["resource_types"][0]["resource_name_function"], "Name");
    }
}
