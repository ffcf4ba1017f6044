use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};

/// An interface version in `major.minor` form.
///
/// Parsing accepts a bare major (`"2"` is `2.0`); display always
/// includes the minor component, which is the form used for comparisons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct ApiVersion {
    major: u32,
    minor: u32,
}

impl ApiVersion {
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }
}

impl TryFrom<String> for ApiVersion {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Serialize for ApiVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for ApiVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (major, minor) = match s.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (s, "0"),
        };
        let parse = |part: &str, what: &str| {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(format!("invalid {} in version '{}'", what, s));
            }
            part.parse::<u32>()
                .map_err(|_| format!("invalid {} in version '{}'", what, s))
        };
        Ok(Self {
            major: parse(major, "major")?,
            minor: parse(minor, "minor")?,
        })
    }
}

/// Which component of a [`TagVersion`] to bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionPart {
    Major,
    Minor,
    Patch,
}

impl VersionPart {
    fn index(self) -> usize {
        match self {
            VersionPart::Major => 0,
            VersionPart::Minor => 1,
            VersionPart::Patch => 2,
        }
    }
}

/// A release version read from a git tag: one to three numeric components.
///
/// The number of components is preserved through increments, so `0.9`
/// bumps to `0.10` rather than `0.10.0`. Missing components count as zero
/// when comparing, so `1.2 == 1.2.0`.
#[derive(Debug, Clone)]
pub struct TagVersion {
    parts: Vec<u32>,
}

impl TagVersion {
    pub fn new(parts: impl Into<Vec<u32>>) -> Self {
        Self {
            parts: parts.into(),
        }
    }

    pub fn parts(&self) -> &[u32] {
        &self.parts
    }

    fn part(&self, idx: usize) -> u32 {
        self.parts.get(idx).copied().unwrap_or(0)
    }

    /// Increment `part`, zero every lower component and pad missing ones.
    ///
    /// `None` if the component is already `u32::MAX`.
    pub fn increment(&self, part: VersionPart) -> Option<Self> {
        let idx = part.index();
        let mut parts = self.parts.clone();
        if parts.len() <= idx {
            parts.resize(idx + 1, 0);
        }
        parts[idx] = parts[idx].checked_add(1)?;
        for lower in parts.iter_mut().skip(idx + 1) {
            *lower = 0;
        }
        Some(Self { parts })
    }
}

impl Ord for TagVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        (0..len)
            .map(|i| self.part(i).cmp(&other.part(i)))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialEq for TagVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TagVersion {}

impl PartialOrd for TagVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TagVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.parts.iter().map(u32::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

impl FromStr for TagVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() > 3 {
            return Err(format!("invalid version '{}', expected 'X[.Y[.Z]]'", s));
        }
        let parts = parts
            .iter()
            .map(|p| {
                if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(format!("invalid version '{}', expected 'X[.Y[.Z]]'", s));
                }
                p.parse::<u32>()
                    .map_err(|_| format!("version component '{}' out of range", p))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { parts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_version_display() {
        assert_eq!(ApiVersion::new(1, 2).to_string(), "1.2");
        assert_eq!(ApiVersion::default().to_string(), "0.0");
    }

    #[test]
    fn test_api_version_from_str() {
        assert_eq!("1.2".parse::<ApiVersion>().unwrap(), ApiVersion::new(1, 2));
        assert_eq!("3".parse::<ApiVersion>().unwrap(), ApiVersion::new(3, 0));
        assert_eq!(" 1.02 ".parse::<ApiVersion>().unwrap(), ApiVersion::new(1, 2));
    }

    #[test]
    fn test_api_version_from_str_invalid() {
        assert!("".parse::<ApiVersion>().is_err());
        assert!("1.".parse::<ApiVersion>().is_err());
        assert!("1.2.3".parse::<ApiVersion>().is_err());
        assert!("a.b".parse::<ApiVersion>().is_err());
        assert!("-1.0".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn test_api_version_deserialize() {
        #[derive(Deserialize)]
        struct Config {
            version: ApiVersion,
        }
        let config: Config = toml::from_str(r#"version = "1.2""#).unwrap();
        assert_eq!(config.version, ApiVersion::new(1, 2));
    }

    #[test]
    fn test_api_version_serialize() {
        #[derive(Serialize)]
        struct Config {
            version: ApiVersion,
        }
        let toml = toml::to_string(&Config {
            version: ApiVersion::new(2, 5),
        })
        .unwrap();
        assert_eq!(toml.trim(), r#"version = "2.5""#);
    }

    #[test]
    fn test_tag_version_from_str() {
        assert_eq!("1".parse::<TagVersion>().unwrap().parts(), &[1]);
        assert_eq!("1.2.3".parse::<TagVersion>().unwrap().parts(), &[1, 2, 3]);
        assert!("1.2.3.4".parse::<TagVersion>().is_err());
        assert!("v1.2".parse::<TagVersion>().is_err());
        assert!("1.2b1".parse::<TagVersion>().is_err());
        assert!("".parse::<TagVersion>().is_err());
    }

    #[test]
    fn test_tag_version_ordering() {
        let v = |s: &str| s.parse::<TagVersion>().unwrap();
        assert!(v("1.10") > v("1.9"));
        assert!(v("2.0") > v("1.99.99"));
        assert!(v("1.2.1") > v("1.2"));
        assert_eq!(v("1.2").cmp(&v("1.2.0")), Ordering::Equal);
    }

    #[test]
    fn test_tag_version_equality_pads_with_zero() {
        let v = |s: &str| s.parse::<TagVersion>().unwrap();
        assert_eq!(v("1.2"), v("1.2.0"));
        assert_eq!(v("3"), v("3.0.0"));
        assert_ne!(v("1.2"), v("1.2.1"));
        assert_eq!(v("1.2") == v("1.2.0"), v("1.2").cmp(&v("1.2.0")).is_eq());
    }

    #[test]
    fn test_tag_version_increment() {
        let v = |s: &str| s.parse::<TagVersion>().unwrap();
        let bump = |s: &str, part| v(s).increment(part).unwrap().to_string();
        assert_eq!(bump("0.9", VersionPart::Minor), "0.10");
        assert_eq!(bump("0.9", VersionPart::Major), "1.0");
        assert_eq!(bump("1.2", VersionPart::Patch), "1.2.1");
        assert_eq!(bump("1.2.3", VersionPart::Minor), "1.3.0");
        assert_eq!(bump("4", VersionPart::Patch), "4.0.1");
    }

    #[test]
    fn test_tag_version_increment_overflow() {
        let v = |s: &str| s.parse::<TagVersion>().unwrap();
        assert_eq!(v("4294967295.0").increment(VersionPart::Major), None);
        assert_eq!(v("1.4294967295").increment(VersionPart::Minor), None);
        assert_eq!(
            v("1.4294967295").increment(VersionPart::Major).unwrap().to_string(),
            "2.0"
        );
    }
}
