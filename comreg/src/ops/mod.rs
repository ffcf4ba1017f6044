//! Core operations.
//!
//! This module contains the business logic for comreg commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod generate;
pub mod next_version;
pub mod stamp;

pub use check::check;
pub use generate::generate;
pub use next_version::next_version;
pub use stamp::stamp;

use comreg_codegen::EntryPoint;
use comreg_manifest::Manifest;

/// The entry point configured in `[entry-point]`, if any.
fn entry_point(manifest: &Manifest) -> Option<EntryPoint> {
    manifest
        .entry_point
        .as_ref()
        .map(|e| EntryPoint::new(&e.class, &e.additional_entries))
}
