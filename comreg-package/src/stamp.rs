//! Placeholder substitution in package manifest templates.

use std::path::Path;

use comreg_core::write_file;

use crate::{Dependencies, Error, Result};

const GIT_VERSION: &str = "<<GIT-VERSION>>";
const SOURCE_URL: &str = "<<SOURCE-URL>>";
const VERSION: &str = "<<VERSION>>";
const DEPENDENCIES: &str = "<<DEPENDENCIES>>";

/// Indentation of `<dependency>` elements inside a nuspec `<dependencies>` block.
const NUSPEC_INDENT: &str = "        ";

/// Package manifest flavour, which decides how dependencies are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    /// NuGet `.nuspec` XML
    Nuspec,
    /// CoApp `.autopkg` script
    Autopkg,
}

impl ManifestKind {
    /// `.nuspec` files (any case) are nuspec, everything else is autopkg.
    pub fn from_path(path: &Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("nuspec") => Self::Nuspec,
            _ => Self::Autopkg,
        }
    }
}

/// Values substituted into a package manifest template.
#[derive(Debug, Clone)]
pub struct Stamp {
    version: String,
    url: String,
    dependencies: Dependencies,
}

impl Stamp {
    pub fn new(
        version: impl Into<String>,
        url: impl Into<String>,
        dependencies: Dependencies,
    ) -> Self {
        Self {
            version: version.into(),
            url: url.into(),
            dependencies,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn dependencies(&self) -> &Dependencies {
        &self.dependencies
    }

    /// Rewrite the manifest at `path` in place.
    pub fn stamp_file(&self, path: &Path) -> Result<()> {
        let io_error = |source| Error::Io {
            path: path.to_path_buf(),
            source,
        };

        let content = std::fs::read_to_string(path).map_err(io_error)?;
        let stamped = self.apply(&content, ManifestKind::from_path(path))?;
        write_file(path, &stamped).map_err(io_error)?;

        tracing::debug!(path = %path.display(), "stamped package manifest");
        Ok(())
    }

    /// Substitute the placeholders of `content`, line by line.
    ///
    /// Only the first placeholder kind found on a line is handled.
    pub fn apply(&self, content: &str, kind: ManifestKind) -> Result<String> {
        let mut out = String::with_capacity(content.len());
        for (index, line) in content.split_inclusive('\n').enumerate() {
            let number = index + 1;
            if line.contains(GIT_VERSION) {
                out.push_str(&line.replace(GIT_VERSION, &self.version));
            } else if line.contains(SOURCE_URL) {
                out.push_str(&line.replace(SOURCE_URL, &self.url));
            } else if line.contains(VERSION) {
                out.push_str(&self.dependency_version(line, number, kind)?);
            } else if line.contains(DEPENDENCIES) {
                out.push_str(&line.replace(DEPENDENCIES, &self.dependency_list(kind)));
            } else {
                out.push_str(line);
            }
        }
        Ok(out)
    }

    fn lookup(&self, id: &str, line: usize) -> Result<&str> {
        self.dependencies
            .get(id)
            .ok_or_else(|| Error::UnknownDependency {
                id: id.to_string(),
                line,
            })
    }

    fn dependency_version(&self, line: &str, number: usize, kind: ManifestKind) -> Result<String> {
        match kind {
            // The whole line becomes a normalised dependency element.
            ManifestKind::Nuspec => {
                let id = line
                    .split_whitespace()
                    .find_map(|token| token.strip_prefix("id=\""))
                    .and_then(|rest| rest.split('"').next())
                    .filter(|id| !id.is_empty())
                    .ok_or(Error::MissingPackageId { line: number })?;
                let version = self.lookup(id, number)?;
                Ok(format!(
                    "{NUSPEC_INDENT}<dependency id=\"{id}\" version=\"{version}\" />\n"
                ))
            }
            // `<package>/<<VERSION>>`, otherwise the package's own version
            ManifestKind::Autopkg => match line.find(&format!("/{VERSION}")) {
                Some(idx) => {
                    let id = line[..idx]
                        .split_whitespace()
                        .last()
                        .ok_or(Error::MissingPackageId { line: number })?;
                    let version = self.lookup(id, number)?;
                    Ok(line.replace(VERSION, version))
                }
                None => Ok(line.replace(VERSION, &self.version)),
            },
        }
    }

    fn dependency_list(&self, kind: ManifestKind) -> String {
        match kind {
            ManifestKind::Nuspec => self
                .dependencies
                .iter()
                .map(|(id, version)| {
                    format!("<dependency id=\"{id}\" version=\"{version}\" />\n{NUSPEC_INDENT}")
                })
                .collect(),
            ManifestKind::Autopkg => self
                .dependencies
                .iter()
                .map(|(id, version)| format!("{id}/{version}"))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}
