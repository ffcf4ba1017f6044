//! Generate command report data structures.

use std::path::{Path, PathBuf};

use super::output::{Output, Report};

/// Report data from script generation.
#[derive(Debug)]
pub struct GenerateReport {
    /// Library the scripts were generated for.
    pub library: String,
    /// Generation result (files written or preview).
    pub result: GenerationResult,
}

/// Result of script generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Paths written to disk, in write order.
    Written(Vec<PathBuf>),
    /// Dry-run preview.
    Preview(Vec<PreviewFile>),
}

/// Progress line for one file, rendered as soon as it is on disk.
#[derive(Debug)]
pub struct WrittenFile<'a>(pub &'a Path);

impl Report for WrittenFile<'_> {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!("Written {}", self.0.display()));
    }
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            // Each path already got its `WrittenFile` line while writing.
            GenerationResult::Written(_) => {}
            GenerationResult::Preview(files) => {
                for file in files {
                    out.divider(&file.path);
                    out.preformatted(&file.content);
                }

                out.divider("Summary");
                out.preformatted(&format!(
                    "{} files would be generated for {}",
                    files.len(),
                    self.library
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::testing::BufferOutput;

    #[test]
    fn test_written_line() {
        let mut out = BufferOutput::default();
        WrittenFile(Path::new("out/Image3dFileLoader.rgs")).render(&mut out);
        WrittenFile(Path::new("out/DummyLoader.rgs")).render(&mut out);

        assert_eq!(
            out.buffer,
            "Written out/Image3dFileLoader.rgs\nWritten out/DummyLoader.rgs\n"
        );
    }

    #[test]
    fn test_written_report_does_not_repeat_progress() {
        let report = GenerateReport {
            library: "DummyLoader".into(),
            result: GenerationResult::Written(vec![PathBuf::from("out/DummyLoader.rgs")]),
        };
        let mut out = BufferOutput::default();
        report.render(&mut out);

        assert_eq!(out.buffer, "");
    }

    #[test]
    fn test_preview() {
        let report = GenerateReport {
            library: "Lib".into(),
            result: GenerationResult::Preview(vec![PreviewFile {
                path: "Foo.rgs".into(),
                content: "HKCR\n{\n}\n".into(),
            }]),
        };
        let mut out = BufferOutput::default();
        report.render(&mut out);

        assert_eq!(
            out.buffer,
            "── Foo.rgs ──\nHKCR\n{\n}\n\n── Summary ──\n1 files would be generated for Lib\n"
        );
    }
}
