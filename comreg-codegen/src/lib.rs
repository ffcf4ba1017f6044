//! Registrar script (`.rgs`) generation for COM type libraries.
//!
//! - [`CodeBuilder`] - indentation-aware script builder
//! - [`resolve_entry_point`] - creatability of each class
//! - [`check_versions`] - class versions against the canonical API version
//! - [`Generator`] - rendering, preview and writing of the scripts

mod annotate;
mod builder;
mod check;
mod error;
pub mod files;
mod generator;

pub use annotate::{EntryPoint, resolve_entry_point};
pub use builder::{CodeBuilder, Indent};
pub use check::check_versions;
pub use error::{Error, Result};
pub use generator::{GenerateResult, Generator, PreviewFile, RenderedScripts};
