use std::path::{Path, PathBuf};

use comreg_idl::{FixedVersion, HeaderVersion, VersionSource};

use crate::{Manifest, Result};

/// A comreg.toml file on disk together with its parsed manifest.
///
/// Relative paths in the manifest are resolved against the directory
/// containing the file.
pub struct ComregToml {
    path: PathBuf,
    manifest: Manifest,
}

impl ComregToml {
    /// Open and parse a comreg.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let manifest = Manifest::from_file(&path)?;
        Ok(Self { path, manifest })
    }

    /// Wrap an already parsed manifest located at `path`.
    pub fn from_manifest(path: impl Into<PathBuf>, manifest: Manifest) -> Self {
        Self {
            path: path.into(),
            manifest,
        }
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Directory relative paths are resolved against.
    pub fn base_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir().join(path)
        }
    }

    /// Path of the IDL file to scan.
    pub fn idl_path(&self) -> PathBuf {
        self.resolve(&self.manifest.library.idl)
    }

    /// Directory receiving the per-class scripts.
    pub fn output_dir(&self) -> PathBuf {
        match &self.manifest.library.output_dir {
            Some(dir) => self.resolve(dir),
            None => self.base_dir().to_path_buf(),
        }
    }

    /// Aggregate script path, if configured.
    ///
    /// A relative aggregate path is taken relative to `output_dir`.
    pub fn aggregate_path(&self, output_dir: &Path) -> Option<PathBuf> {
        self.manifest.library.aggregate.as_ref().map(|p| {
            if p.is_absolute() {
                p.clone()
            } else {
                output_dir.join(p)
            }
        })
    }

    /// The configured canonical version source, if any.
    pub fn version_source(&self) -> Option<Box<dyn VersionSource>> {
        let version = self.manifest.version.as_ref()?;
        if let Some(expected) = version.expected {
            return Some(Box::new(FixedVersion(expected)));
        }
        version
            .source
            .as_ref()
            .map(|source| -> Box<dyn VersionSource> {
                Box::new(HeaderVersion::new(self.resolve(source), version.keys()))
            })
    }
}
