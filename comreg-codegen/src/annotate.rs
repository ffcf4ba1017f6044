//! Creatability and extra registry entries per class.

use comreg_idl::CoClass;

use crate::{Error, Result};

/// The single class exposed through ProgIDs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPoint {
    pub class: String,
    /// Registry fragment inserted into the class key
    pub additional_entries: String,
}

impl EntryPoint {
    pub fn new(class: impl Into<String>, additional_entries: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            additional_entries: additional_entries.into(),
        }
    }
}

/// Mark the entry point creatable and every other class non-creatable.
///
/// Without an entry point the classes are left as parsed.
pub fn resolve_entry_point(
    classes: &mut [CoClass],
    entry_point: Option<&EntryPoint>,
    library: &str,
) -> Result<()> {
    let Some(entry) = entry_point else {
        return Ok(());
    };

    if !classes.iter().any(|c| c.name == entry.class) {
        return Err(Error::UnknownEntryPoint {
            class: entry.class.clone(),
            library: library.to_string(),
        });
    }

    for class in classes.iter_mut() {
        if class.name == entry.class {
            class.creatable = true;
            class.additional_entries = entry.additional_entries.clone();
        } else {
            class.creatable = false;
            class.additional_entries.clear();
        }
    }

    tracing::debug!(class = %entry.class, "resolved entry point");
    Ok(())
}

#[cfg(test)]
mod tests {
    use comreg_idl::Guid;

    use super::*;

    fn classes() -> Vec<CoClass> {
        ["Loader", "Source", "Stream"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let clsid = Guid::parse(&format!("00000000-0000-0000-0000-00000000000{i}")).unwrap();
                CoClass::new(*name, clsid, Some("1.0".into()))
            })
            .collect()
    }

    #[test]
    fn test_no_entry_point_keeps_defaults() {
        let mut classes = classes();
        resolve_entry_point(&mut classes, None, "Lib").unwrap();

        assert!(classes.iter().all(|c| c.creatable));
        assert!(classes.iter().all(|c| c.additional_entries.is_empty()));
    }

    #[test]
    fn test_entry_point_is_only_creatable_class() {
        let mut classes = classes();
        let entry = EntryPoint::new("Source", "val AppID = s '%APPID%'");
        resolve_entry_point(&mut classes, Some(&entry), "Lib").unwrap();

        let creatable: Vec<&str> = classes
            .iter()
            .filter(|c| c.creatable)
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(creatable, ["Source"]);
        assert_eq!(classes[1].additional_entries, "val AppID = s '%APPID%'");
        assert!(classes[0].additional_entries.is_empty());
    }

    #[test]
    fn test_unknown_entry_point() {
        let mut classes = classes();
        let entry = EntryPoint::new("Missing", "");
        let err = resolve_entry_point(&mut classes, Some(&entry), "Lib").unwrap_err();

        assert!(matches!(err, Error::UnknownEntryPoint { ref class, .. } if class == "Missing"));
        assert!(classes.iter().all(|c| c.creatable));
    }
}
