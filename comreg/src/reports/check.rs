//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from configuration validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    pub library: String,
    pub typelib: String,
    pub threading_model: String,
    /// Canonical version, when a version source is configured.
    pub expected_version: Option<String>,
    /// Classes after entry-point resolution.
    pub classes: Vec<ClassInfo>,
    /// Error messages.
    pub errors: Vec<String>,
}

/// A class as it would be registered.
#[derive(Debug)]
pub struct ClassInfo {
    pub name: String,
    pub version: Option<String>,
    pub creatable: bool,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.warning(&format!("error: {}", error));
        }

        if !self.is_valid() {
            return;
        }

        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.newline();

        out.key_value("Library", &format!("{} {{{}}}", self.library, self.typelib));
        out.key_value("Threading model", &self.threading_model);
        if let Some(version) = &self.expected_version {
            out.key_value("API version", version);
        }
        out.newline();

        out.section(&format!("Classes ({})", self.classes.len()));
        for class in &self.classes {
            let version = class.version.as_deref().unwrap_or("unversioned");
            let kind = if class.creatable {
                "creatable"
            } else {
                "not creatable"
            };
            out.list_item(&format!("{} {} ({})", class.name, version, kind));
        }
    }
}
