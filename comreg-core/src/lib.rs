//! Core utilities and types for the comreg tooling.
//!
//! This crate provides the file-writing primitives and version value types
//! shared by the parser, the generator and the packaging helpers.

mod file;
mod threading;
mod version;

// File operations
pub use file::{File, GeneratedFile, write_file};
pub use threading::ThreadingModel;
// Version types
pub use version::{ApiVersion, TagVersion, VersionPart};
