//! Core types for the generation domain

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Identifiers spliced into one generated sweeper function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceTypeSpec {
    pub lister_function: String,
    pub lister_output_type: String,
    pub lister_page_field: String,
    pub resource_name_function: String,
}

impl ResourceTypeSpec {
    pub fn new(
        lister_function: impl Into<String>,
        lister_output_type: impl Into<String>,
        lister_page_field: impl Into<String>,
        resource_name_function: impl Into<String>,
    ) -> Self {
        Self {
            lister_function: lister_function.into(),
            lister_output_type: lister_output_type.into(),
            lister_page_field: lister_page_field.into(),
            resource_name_function: resource_name_function.into(),
        }
    }

    /// Field name / value pairs, used for presence checks
    pub(crate) fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("lister_function", &self.lister_function),
            ("lister_output_type", &self.lister_output_type),
            ("lister_page_field", &self.lister_page_field),
            ("resource_name_function", &self.resource_name_function),
        ]
    }
}

/// Input for one generator invocation.
///
/// Resource types are kept in a `BTreeMap` so that the generated functions
/// always come out sorted by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub service_name: String,
    #[serde(default)]
    pub resource_types: BTreeMap<String, ResourceTypeSpec>,
}

impl GenerationRequest {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            resource_types: BTreeMap::new(),
        }
    }

    /// Add a resource type, replacing any previous entry with the same name
    pub fn with_resource_type(mut self, name: impl Into<String>, spec: ResourceTypeSpec) -> Self {
        self.resource_types.insert(name.into(), spec);
        self
    }
}

/// Template expansion and its formatted form, tied to the target file
#[derive(Debug, Clone)]
pub struct RenderedOutput {
    pub path: PathBuf,
    pub raw: String,
    pub formatted: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_types_iterate_sorted() {
        let spec = ResourceTypeSpec::new("ListThings", "ListThingsOutput", "Things", "Name");
        let request = GenerationRequest::new("ec2")
            .with_resource_type("Vpc", spec.clone())
            .with_resource_type("Subnet", spec.clone())
            .with_resource_type("InternetGateway", spec);

        let names: Vec<&str> = request.resource_types.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["InternetGateway", "Subnet", "Vpc"]);
    }

    #[test]
    fn test_request_deserializes_without_resource_types() {
        let request: GenerationRequest =
            serde_json::from_str(r#"{ "service_name": "s3" }"#).unwrap();
        assert_eq!(request.service_name, "s3");
        assert!(request.resource_types.is_empty());
    }
}
