//! Loading generation requests from definition files

pub mod file_loader;

pub use file_loader::*;
