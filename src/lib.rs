//! sweepergen - generates Go sweeper registration files from resource-type tables
//!
//! A sweeper lists and deletes cloud resources left behind by acceptance tests.
//! Each service declares its resource types once; this crate renders one
//! sweeper function per type into `gen_<service>_sweepers_test.go`.
//!
//! ```no_run
//! use sweepergen::{GenerationRequest, GeneratorConfig, ResourceTypeSpec};
//!
//! # async fn example() -> Result<(), sweepergen::GenerationError> {
//! let request = GenerationRequest::new("s3").with_resource_type(
//!     "Bucket",
//!     ResourceTypeSpec::new("ListBucketsPages", "ListBucketsOutput", "Buckets", "Name"),
//! );
//! let config = GeneratorConfig::from_env()?;
//! sweepergen::run(&request, &config).await?;
//! # Ok(())
//! # }
//! ```
#![deny(unsafe_code)]

pub mod generation;
pub mod infrastructure;

pub use generation::{
    FormatterKind, GenerationError, GenerationOrchestrator, GenerationRequest, GeneratorConfig,
    RenderedOutput, ResourceTypeSpec,
};

/// Generate the sweepers file for `request` using `config`
pub async fn run(
    request: &GenerationRequest,
    config: &GeneratorConfig,
) -> Result<RenderedOutput, GenerationError> {
    GenerationOrchestrator::from_config(config)
        .generate(request, config)
        .await
}
