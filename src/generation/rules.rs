//! Business rules for the generation domain

use once_cell::sync::Lazy;
use regex::Regex;

use crate::generation::{GenerationError, GenerationRequest};

static SERVICE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("valid service name pattern"));
static GO_IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid Go identifier pattern"));
static GO_SELECTOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("valid Go selector pattern")
});
static GO_REFERENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$")
        .expect("valid Go reference pattern")
});
static RESOURCE_TYPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("valid resource type pattern"));

/// Validates the service name, which doubles as a Go import path segment
pub fn validate_service_name(name: &str) -> Result<(), GenerationError> {
    if name.is_empty() {
        return Err(GenerationError::Validation(
            "Service name cannot be empty".to_string(),
        ));
    }

    if !SERVICE_NAME_RE.is_match(name) {
        return Err(GenerationError::Validation(format!(
            "Service name '{name}' must start with a lowercase letter and contain only lowercase letters, digits, and underscores"
        )));
    }

    Ok(())
}

/// Validates the destination Go package name
pub fn validate_package_name(name: &str) -> Result<(), GenerationError> {
    if !GO_IDENTIFIER_RE.is_match(name) {
        return Err(GenerationError::Validation(format!(
            "Package name '{name}' is not a valid Go identifier"
        )));
    }

    Ok(())
}

/// Validates a possibly package-qualified Go function name, e.g. `sweep.SkipSweepError`
pub fn validate_go_reference(name: &str) -> Result<(), GenerationError> {
    if !GO_REFERENCE_RE.is_match(name) {
        return Err(GenerationError::Validation(format!(
            "'{name}' is not a valid Go function reference"
        )));
    }

    Ok(())
}

/// Validates a resource-type name.
///
/// Names become part of Go identifiers, so anything other than letters,
/// digits and underscores is rejected rather than escaped.
pub fn validate_resource_type_name(name: &str) -> Result<(), GenerationError> {
    if !RESOURCE_TYPE_RE.is_match(name) {
        return Err(GenerationError::Validation(format!(
            "Resource type '{name}' must start with a letter and contain only letters, digits, and underscores"
        )));
    }

    Ok(())
}

/// Validates a whole request before any rendering happens
pub fn validate_request(request: &GenerationRequest) -> Result<(), GenerationError> {
    validate_service_name(&request.service_name)?;

    for (name, spec) in &request.resource_types {
        validate_resource_type_name(name)?;

        for (field, value) in spec.fields() {
            validate_spec_field(name, field, value)?;
        }
    }

    Ok(())
}

/// Validates one `ResourceTypeSpec` value before it is spliced into source.
///
/// `lister_function` and `lister_output_type` follow a package qualifier in
/// the generated code, so they must be bare identifiers. The page field and
/// the name accessor follow a value and may be selector chains such as
/// `Tags.Name`.
fn validate_spec_field(name: &str, field: &str, value: &str) -> Result<(), GenerationError> {
    if value.trim().is_empty() {
        return Err(GenerationError::Validation(format!(
            "Resource type '{name}' is missing '{field}'"
        )));
    }

    let (pattern, expected) = match field {
        "lister_page_field" | "resource_name_function" => (&*GO_SELECTOR_RE, "a Go field selector"),
        _ => (&*GO_IDENTIFIER_RE, "a Go identifier"),
    };

    if !pattern.is_match(value) {
        return Err(GenerationError::Validation(format!(
            "Resource type '{name}' has '{field}' = '{value}', which is not {expected}"
        )));
    }

    Ok(())
}
