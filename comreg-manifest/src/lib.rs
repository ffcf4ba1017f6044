//! Parsing and validation of comreg.toml.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod file;
mod manifest;
mod parse;

pub use error::{Error, Result};
pub use file::ComregToml;
pub use manifest::{EntryPointConfig, LibraryConfig, Manifest, VersionConfig};
pub use parse::parse_manifest;
