//! Canonical interface version lookup.

use std::path::{Path, PathBuf};

use comreg_core::ApiVersion;

use crate::{Error, Result, error::SourceContext};

/// Supplies the canonical `major.minor` version classes are checked against.
pub trait VersionSource {
    fn canonical_version(&self) -> Result<ApiVersion>;
}

/// A version given directly, e.g. from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedVersion(pub ApiVersion);

impl VersionSource for FixedVersion {
    fn canonical_version(&self) -> Result<ApiVersion> {
        Ok(self.0)
    }
}

impl<F> VersionSource for F
where
    F: Fn() -> Result<ApiVersion>,
{
    fn canonical_version(&self) -> Result<ApiVersion> {
        self()
    }
}

/// Identifier suffixes of the two version assignments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionKeys {
    pub major: String,
    pub minor: String,
}

impl Default for VersionKeys {
    fn default() -> Self {
        Self {
            major: "VERSION_MAJOR".to_string(),
            minor: "VERSION_MINOR".to_string(),
        }
    }
}

/// Reads the version from a header or IDL file containing assignments such
/// as `MYLIB_VERSION_MAJOR = 1,` and `MYLIB_VERSION_MINOR = 2,`.
#[derive(Debug, Clone)]
pub struct HeaderVersion {
    path: PathBuf,
    keys: VersionKeys,
}

impl HeaderVersion {
    pub fn new(path: impl Into<PathBuf>, keys: VersionKeys) -> Self {
        Self {
            path: path.into(),
            keys,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VersionSource for HeaderVersion {
    fn canonical_version(&self) -> Result<ApiVersion> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            Box::new(Error::Io {
                path: self.path.clone(),
                source: e,
            })
        })?;
        parse_header_version(&content, &self.path.display().to_string(), &self.keys)
    }
}

/// Extract `major.minor` from assignment lines in `content`.
///
/// A line matches when the identifier left of `=` ends with the key; the
/// value is the leading integer on the right, so trailing `,` or `;` and
/// comments are ignored. The first match for each key wins.
pub fn parse_header_version(content: &str, filename: &str, keys: &VersionKeys) -> Result<ApiVersion> {
    let ctx = SourceContext::new(content, filename);
    let major = find_assignment(&ctx, &keys.major)?;
    let minor = find_assignment(&ctx, &keys.minor)?;
    Ok(ApiVersion::new(major, minor))
}

fn find_assignment(ctx: &SourceContext, key: &str) -> Result<u32> {
    let mut offset = 0;

    for line in ctx.src().split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        let Some((lhs, rhs)) = line.split_once('=') else {
            continue;
        };
        // `==` comparisons are not assignments
        if rhs.starts_with('=') {
            continue;
        }
        let Some(ident) = lhs.split_whitespace().last() else {
            continue;
        };
        if !ident.ends_with(key) {
            continue;
        }

        let value_start = line_start + lhs.len() + 1 + (rhs.len() - rhs.trim_start().len());
        let digits: &str = {
            let value = rhs.trim_start();
            let end = value
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(value.len());
            &value[..end]
        };
        let span_len = digits.len().max(1);

        return digits
            .parse::<u32>()
            .map_err(|_| ctx.invalid_version_value(ident, value_start..value_start + span_len));
    }

    Err(ctx.version_key_not_found(key))
}
