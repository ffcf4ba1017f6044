//! Interface-definition scanning for registration-script generation.
//!
//! Only attributed `library` and `coclass` declarations are extracted; the
//! rest of the IDL grammar is skipped without being validated.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod attrs;
mod error;
mod model;
mod parse;
mod scan;
mod version_source;

pub use error::{Error, Result, SourceContext};
pub use model::{CoClass, Guid, Library};
pub use parse::{Idl, parse_idl};
pub use version_source::{
    FixedVersion, HeaderVersion, VersionKeys, VersionSource, parse_header_version,
};
