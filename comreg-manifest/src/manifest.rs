//! Manifest types for comreg.toml files.

use std::path::PathBuf;

use comreg_core::{ApiVersion, ThreadingModel};
use comreg_idl::VersionKeys;
use serde::Deserialize;

/// Root manifest for comreg.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Manifest {
    /// IDL input and script outputs
    pub library: LibraryConfig,

    /// Canonical version the classes must declare
    pub version: Option<VersionConfig>,

    /// The single class registered with ProgIDs
    pub entry_point: Option<EntryPointConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct LibraryConfig {
    /// IDL file to scan
    pub idl: PathBuf,

    #[serde(default)]
    pub threading_model: ThreadingModel,

    /// Directory receiving the per-class scripts (defaults to the manifest directory)
    pub output_dir: Option<PathBuf>,

    /// File receiving the concatenation of all scripts
    pub aggregate: Option<PathBuf>,
}

/// Where the canonical version comes from.
///
/// Exactly one of `source` and `expected` must be set.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct VersionConfig {
    /// Header or IDL file with the version assignments
    pub source: Option<PathBuf>,

    /// Version given inline
    pub expected: Option<ApiVersion>,

    #[serde(default = "default_major_key")]
    pub major_key: String,

    #[serde(default = "default_minor_key")]
    pub minor_key: String,
}

impl VersionConfig {
    pub fn keys(&self) -> VersionKeys {
        VersionKeys {
            major: self.major_key.clone(),
            minor: self.minor_key.clone(),
        }
    }
}

fn default_major_key() -> String {
    VersionKeys::default().major
}

fn default_minor_key() -> String {
    VersionKeys::default().minor
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct EntryPointConfig {
    /// Name of the creatable class
    pub class: String,

    /// Registry fragment added to that class's CLSID key
    #[serde(default)]
    pub additional_entries: String,
}
