use std::fmt;

use uuid::Uuid;

/// A stable identifier as written in the source.
///
/// The text is validated as a UUID but kept verbatim (minus any braces),
/// so generated scripts use exactly the spelling of the IDL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Guid(String);

impl Guid {
    pub fn parse(text: &str) -> Result<Self, uuid::Error> {
        let text = text.trim();
        let text = text
            .strip_prefix('{')
            .and_then(|t| t.strip_suffix('}'))
            .unwrap_or(text);
        Uuid::parse_str(text)?;
        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The type library declared by the IDL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    /// Library identifier, used as the ProgID prefix
    pub name: String,
    /// Type library identifier
    pub typelib: Guid,
}

/// A component class (`coclass`) declared inside the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoClass {
    pub name: String,
    pub clsid: Guid,
    /// Dotted numeric version from `version(...)`, if declared
    pub version: Option<String>,
    /// Whether ProgID entries are registered for this class
    pub creatable: bool,
    /// Registry fragment inserted verbatim into the class key
    pub additional_entries: String,
}

impl CoClass {
    /// A freshly parsed class: creatable, with no additional entries.
    pub fn new(name: impl Into<String>, clsid: Guid, version: Option<String>) -> Self {
        Self {
            name: name.into(),
            clsid,
            version,
            creatable: true,
            additional_entries: String::new(),
        }
    }
}

/// `true` for dotted numeric text such as `1`, `1.0` or `2.10.3`.
pub(crate) fn is_dotted_numeric(text: &str) -> bool {
    !text.is_empty()
        && text
            .split('.')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
}
