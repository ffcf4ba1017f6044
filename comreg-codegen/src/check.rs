//! Cross-check of class versions against the canonical API version.

use comreg_core::ApiVersion;
use comreg_idl::CoClass;

use crate::{Error, Result};

/// Fail on the first class whose version does not equal `expected`.
///
/// Versions are compared after normalisation, so `1` matches `1.0`.
/// A class without a version never matches.
pub fn check_versions(classes: &[CoClass], expected: ApiVersion) -> Result<()> {
    for class in classes {
        let found = class
            .version
            .as_deref()
            .and_then(|v| v.parse::<ApiVersion>().ok());

        if found != Some(expected) {
            return Err(Error::VersionMismatch {
                class: class.name.clone(),
                found: class.version.clone(),
                expected: expected.to_string(),
            });
        }
    }

    tracing::debug!(%expected, classes = classes.len(), "class versions match");
    Ok(())
}
