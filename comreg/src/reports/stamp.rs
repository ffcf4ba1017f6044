//! Stamp command report.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from stamping a package manifest.
#[derive(Debug)]
pub struct StampReport {
    pub file: PathBuf,
    pub version: String,
    pub url: String,
    /// `packages.config` files read, in order.
    pub packages: Vec<PathBuf>,
}

impl Report for StampReport {
    fn render(&self, out: &mut dyn Output) {
        for path in &self.packages {
            out.preformatted(&format!("Parsing dependencies from {}", path.display()));
        }
        out.preformatted(&format!(
            "Setting version and URL of {} to {} and {}",
            self.file.display(),
            self.version,
            self.url
        ));
    }
}
