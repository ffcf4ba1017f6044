//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use miette::SourceSpan;

use crate::{Error, Manifest, Result, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "comreg.toml")
    }
}

impl Manifest {
    /// Parse a comreg.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a comreg.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;
    validate_manifest(&manifest, &ctx)?;
    Ok(manifest)
}

fn validate_manifest(manifest: &Manifest, ctx: &SourceContext) -> Result<()> {
    if manifest.library.idl.as_os_str().is_empty() {
        return Err(ctx.validation_error(
            "`library.idl` must name an IDL file",
            find_key_span(ctx.src(), "idl"),
        ));
    }

    if let Some(version) = &manifest.version {
        match (&version.source, &version.expected) {
            (Some(_), Some(_)) => {
                return Err(ctx.validation_error(
                    "`version.source` and `version.expected` are mutually exclusive",
                    find_key_span(ctx.src(), "expected"),
                ));
            }
            (None, None) => {
                return Err(ctx.validation_error(
                    "`[version]` needs either `source` or `expected`",
                    find_key_span(ctx.src(), "[version]"),
                ));
            }
            _ => {}
        }
        for (key, value) in [
            ("major-key", &version.major_key),
            ("minor-key", &version.minor_key),
        ] {
            if value.trim().is_empty() {
                return Err(ctx.validation_error(
                    format!("`version.{}` must not be empty", key),
                    find_key_span(ctx.src(), key),
                ));
            }
        }
    }

    if let Some(entry) = &manifest.entry_point {
        if let Some(reason) = validate_identifier(&entry.class) {
            return Err(ctx.validation_error(
                format!("invalid entry-point class '{}': {}", entry.class, reason),
                find_key_span(ctx.src(), "class"),
            ));
        }
    }

    Ok(())
}

/// Find the span of `key = ...` (or a literal table header) in the source.
pub(crate) fn find_key_span(src: &str, key: &str) -> Option<SourceSpan> {
    if key.starts_with('[') {
        return src.find(key).map(|pos| SourceSpan::from((pos, key.len())));
    }

    let mut offset = 0;
    for line in src.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix(key) {
            if rest.trim_start().starts_with('=') {
                let start = offset + (line.len() - trimmed.len());
                return Some(SourceSpan::from((start, key.len())));
            }
        }
        offset += line.len();
    }
    None
}

/// Returns `None` if `name` is a valid IDL identifier, or the reason it is not.
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let Some(first) = name.chars().next() else {
        return Some("name is empty");
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Some("must start with a letter or underscore");
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Some("use only letters, numbers, and underscores");
    }
    None
}
