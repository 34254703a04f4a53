//! Infrastructure layer - template engine, formatters, and file I/O

pub mod definitions;
pub mod formatting;
pub mod generation;
pub mod output;
pub mod templates;
