//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod check;
mod generate;
mod next_version;
mod output;
mod stamp;

pub use check::{CheckReport, ClassInfo};
pub use generate::{GenerateReport, GenerationResult, PreviewFile, WrittenFile};
pub use next_version::NextVersionReport;
pub use output::{Output, Report, TerminalOutput};
pub use stamp::StampReport;

#[cfg(test)]
pub(crate) use output::testing;
