//! COM threading model declared for in-process servers.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Value written to `InprocServer32\ThreadingModel`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadingModel {
    /// Single-threaded apartment only
    Apartment,
    /// Multi-threaded apartment only
    Free,
    /// Either apartment type
    #[default]
    Both,
    /// Neutral apartment
    Neutral,
}

impl ThreadingModel {
    /// Returns the registry token, e.g. `Both`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreadingModel::Apartment => "Apartment",
            ThreadingModel::Free => "Free",
            ThreadingModel::Both => "Both",
            ThreadingModel::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for ThreadingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ThreadingModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "apartment" | "sta" => Ok(ThreadingModel::Apartment),
            "free" | "mta" => Ok(ThreadingModel::Free),
            "both" => Ok(ThreadingModel::Both),
            "neutral" => Ok(ThreadingModel::Neutral),
            _ => Err(format!(
                "unknown threading model '{}', expected 'apartment', 'free', 'both' or 'neutral'",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("both".parse::<ThreadingModel>().unwrap(), ThreadingModel::Both);
        assert_eq!("Apartment".parse::<ThreadingModel>().unwrap(), ThreadingModel::Apartment);
        assert_eq!("sta".parse::<ThreadingModel>().unwrap(), ThreadingModel::Apartment);
        assert_eq!("MTA".parse::<ThreadingModel>().unwrap(), ThreadingModel::Free);
        assert!("rental".parse::<ThreadingModel>().is_err());
    }

    #[test]
    fn test_registry_token() {
        assert_eq!(ThreadingModel::Both.to_string(), "Both");
        assert_eq!(ThreadingModel::Neutral.to_string(), "Neutral");
        assert_eq!(ThreadingModel::default(), ThreadingModel::Both);
    }

    #[test]
    fn test_deserialize() {
        #[derive(Deserialize)]
        struct Config {
            model: ThreadingModel,
        }
        let config: Config = toml::from_str(r#"model = "free""#).unwrap();
        assert_eq!(config.model, ThreadingModel::Free);
    }
}
