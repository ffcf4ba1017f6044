//! Stamping of NuGet package manifests.
//!
//! Version, source URL and dependency placeholders in `.nuspec` and
//! CoApp `.autopkg` templates are filled in from the command line and from
//! the `packages.config` files of the packaged projects.

mod error;
mod packages;
mod stamp;

pub use error::{Error, Result};
pub use packages::{Dependencies, parse_packages_config};
pub use stamp::{ManifestKind, Stamp};
