//! Check operation - configuration and IDL validation.

use comreg_codegen::{check_versions, resolve_entry_point};
use comreg_core::ApiVersion;
use comreg_idl::Idl;
use comreg_manifest::ComregToml;

use crate::reports::{CheckReport, ClassInfo};

/// Execute the check operation.
///
/// Resolves the entry point and cross-checks class versions exactly like
/// `generate` would, without rendering anything.
pub fn check(config: &ComregToml, idl: &Idl, expected_version: Option<ApiVersion>) -> CheckReport {
    let mut classes = idl.classes.clone();
    let mut errors = Vec::new();

    let entry_point = super::entry_point(config.manifest());
    if let Err(e) = resolve_entry_point(&mut classes, entry_point.as_ref(), &idl.library.name) {
        errors.push(e.to_string());
    }
    if let Some(expected) = expected_version {
        if let Err(e) = check_versions(&classes, expected) {
            errors.push(e.to_string());
        }
    }

    CheckReport {
        config_path: config.path().to_path_buf(),
        library: idl.library.name.clone(),
        typelib: idl.library.typelib.to_string(),
        threading_model: config.manifest().library.threading_model.to_string(),
        expected_version: expected_version.map(|v| v.to_string()),
        classes: classes
            .into_iter()
            .map(|c| ClassInfo {
                name: c.name,
                version: c.version,
                creatable: c.creatable,
            })
            .collect(),
        errors,
    }
}
