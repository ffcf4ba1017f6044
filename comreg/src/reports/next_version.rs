//! Next-version command report.

use comreg_core::TagVersion;

use super::output::{Output, Report};

/// The derived release version.
#[derive(Debug)]
pub struct NextVersionReport {
    pub next: TagVersion,
}

impl Report for NextVersionReport {
    /// Only the version is printed, without a newline, for use in build scripts.
    fn render(&self, out: &mut dyn Output) {
        out.raw(&self.next.to_string());
    }
}
