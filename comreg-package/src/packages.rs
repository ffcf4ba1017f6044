//! NuGet `packages.config` reading.

use std::{borrow::Cow, path::Path};

use indexmap::IndexMap;

use crate::{Error, Result};

/// Package versions keyed by package id, in the order first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependencies {
    packages: IndexMap<String, String>,
}

impl Dependencies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the dependencies listed in a `packages.config` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse_packages_config(&content, &path.display().to_string())
    }

    /// Add a package, rejecting a second, different version of the same id.
    pub fn insert(&mut self, id: impl Into<String>, version: impl Into<String>) -> Result<()> {
        let id = id.into();
        let version = version.into();
        match self.packages.get(&id) {
            Some(existing) if *existing != version => Err(Error::DependencyConflict {
                id,
                first: existing.clone(),
                second: version,
            }),
            Some(_) => Ok(()),
            None => {
                self.packages.insert(id, version);
                Ok(())
            }
        }
    }

    /// Merge `other` into `self`, keeping the existing order.
    pub fn merge(&mut self, other: Dependencies) -> Result<()> {
        for (id, version) in other.packages {
            self.insert(id, version)?;
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.packages.get(id).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.packages.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Parse the `<package id=".." version=".."/>` entries of a `packages.config`.
///
/// Only elements and their attributes are looked at; comments, the XML
/// declaration and any other element are skipped.
pub fn parse_packages_config(content: &str, filename: &str) -> Result<Dependencies> {
    let invalid = |reason: &str| Error::InvalidPackagesConfig {
        path: filename.to_string(),
        reason: reason.to_string(),
    };

    let mut dependencies = Dependencies::new();
    let mut has_root = false;
    let mut rest = content;

    while let Some(start) = rest.find('<') {
        rest = &rest[start..];

        if let Some(comment) = rest.strip_prefix("<!--") {
            let end = comment.find("-->").ok_or_else(|| invalid("unterminated comment"))?;
            rest = &comment[end + 3..];
            continue;
        }

        let end = tag_end(rest).ok_or_else(|| invalid("unterminated element"))?;
        let tag = &rest[1..end];
        rest = &rest[end + 1..];

        let name_len = tag
            .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
            .unwrap_or(tag.len());
        match &tag[..name_len] {
            "packages" => has_root = true,
            "package" => {
                let attrs = attributes(&tag[name_len..])
                    .ok_or_else(|| invalid("malformed attributes in <package>"))?;
                let find = |key: &str| {
                    attrs
                        .iter()
                        .find(|(k, _)| *k == key)
                        .map(|(_, v)| unescape(v))
                };

                let id = find("id").ok_or_else(|| invalid("<package> without an `id`"))?;
                let version = find("version")
                    .ok_or_else(|| invalid(&format!("package '{id}' has no `version`")))?;
                dependencies.insert(id, version)?;
            }
            _ => {}
        }
    }

    if !has_root {
        return Err(invalid("missing <packages> element"));
    }

    tracing::debug!(file = filename, packages = dependencies.len(), "read packages.config");
    Ok(dependencies)
}

/// Index of the `>` closing the tag at the start of `text`, skipping quoted values.
fn tag_end(text: &str) -> Option<usize> {
    let mut quote = None;
    for (i, c) in text.char_indices().skip(1) {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), c) if c == q => quote = None,
            (None, '>') => return Some(i),
            _ => {}
        }
    }
    None
}

/// Decode the predefined XML entities and numeric character references.
///
/// Unrecognised references are left as written.
fn unescape(value: &str) -> Cow<'_, str> {
    if !value.contains('&') {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest
            .find(';')
            .and_then(|semi| Some((entity(&rest[1..semi])?, semi)));
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = match name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => name.strip_prefix('#')?.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Split `name="value"` pairs; `None` if the text is not a valid attribute list.
fn attributes(text: &str) -> Option<Vec<(&str, &str)>> {
    let mut attrs = Vec::new();
    let mut rest = text.trim_start();

    loop {
        rest = rest.trim_start_matches('/').trim_start();
        if rest.is_empty() {
            return Some(attrs);
        }

        let eq = rest.find('=')?;
        let name = rest[..eq].trim();
        if name.is_empty() || name.contains(char::is_whitespace) {
            return None;
        }

        let value = rest[eq + 1..].trim_start();
        let quote = value.chars().next().filter(|c| *c == '"' || *c == '\'')?;
        let close = value[1..].find(quote)?;
        attrs.push((name, &value[1..close + 1]));
        rest = value[close + 2..].trim_start();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PACKAGES: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<packages>
  <!-- <package id="Commented.Out" version="0.0.1" /> -->
  <package id="Image3dAPI" version="1.2.3" targetFramework="native" />
  <package id='zlib' version='1.2.11'/>
</packages>
"#;

    #[test]
    fn test_parse_packages_in_order() {
        let deps = parse_packages_config(PACKAGES, "packages.config").unwrap();

        let entries: Vec<_> = deps.iter().collect();
        assert_eq!(entries, [("Image3dAPI", "1.2.3"), ("zlib", "1.2.11")]);
    }

    #[test]
    fn test_empty_packages() {
        let deps = parse_packages_config("<packages />", "packages.config").unwrap();
        assert!(deps.is_empty());
    }

    #[test]
    fn test_missing_root() {
        let err = parse_packages_config("<configuration/>", "p.config").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid packages.config 'p.config': missing <packages> element"
        );
    }

    #[test]
    fn test_package_without_id() {
        let err =
            parse_packages_config("<packages><package version=\"1\"/></packages>", "p").unwrap_err();
        assert!(matches!(err, Error::InvalidPackagesConfig { ref reason, .. } if reason.contains("`id`")));
    }

    #[test]
    fn test_package_without_version() {
        let err = parse_packages_config("<packages><package id=\"a\"/></packages>", "p").unwrap_err();
        assert!(err.to_string().contains("package 'a' has no `version`"));
    }

    #[test]
    fn test_unterminated_element() {
        let err = parse_packages_config("<packages><package id=\"a\"", "p").unwrap_err();
        assert!(err.to_string().contains("unterminated element"));
    }

    #[test]
    fn test_quoted_angle_bracket() {
        let deps =
            parse_packages_config("<packages><package id=\"a>b\" version=\"1\"/></packages>", "p")
                .unwrap();
        assert_eq!(deps.get("a>b"), Some("1"));
    }

    #[test]
    fn test_attribute_entities_are_decoded() {
        let deps = parse_packages_config(
            r#"<packages>
  <package id="a&amp;b" version="1.0&#45;rc&#x2E;1" />
  <package id="&lt;x&gt;&quot;&apos;" version="2" />
</packages>"#,
            "p",
        )
        .unwrap();

        let entries: Vec<_> = deps.iter().collect();
        assert_eq!(entries, [("a&b", "1.0-rc.1"), ("<x>\"'", "2")]);
    }

    #[test]
    fn test_unescape_is_single_pass() {
        assert_eq!(unescape("&amp;lt;"), "&lt;");
        assert_eq!(unescape("a & b;"), "a & b;");
        assert_eq!(unescape("&bogus;&amp"), "&bogus;&amp");
        assert!(matches!(unescape("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_insert_conflict() {
        let mut deps = Dependencies::new();
        deps.insert("zlib", "1.2.11").unwrap();
        deps.insert("zlib", "1.2.11").unwrap();

        let err = deps.insert("zlib", "1.3").unwrap_err();
        assert_eq!(err.to_string(), "version mismatch in package zlib: 1.2.11 vs. 1.3");
        assert_eq!(deps.get("zlib"), Some("1.2.11"));
    }

    #[test]
    fn test_merge_keeps_first_seen_order() {
        let mut deps = Dependencies::new();
        deps.insert("b", "2").unwrap();

        let mut other = Dependencies::new();
        other.insert("a", "1").unwrap();
        other.insert("b", "2").unwrap();
        deps.merge(other).unwrap();

        let ids: Vec<_> = deps.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, ["b", "a"]);
    }
}
