//! Generation domain module - turns a service's resource-type table into a
//! sweepers source file
//!
//! The pipeline is linear: validate the request, render the template, format
//! the expansion, write the file. Any stage failing stops the run before
//! anything is written.

pub mod config;
pub mod context;
pub mod errors;
pub mod orchestrator;
pub mod rules;
pub mod types;
pub mod utils;

pub use config::*;
pub use context::*;
pub use errors::*;
pub use orchestrator::*;
pub use types::*;
