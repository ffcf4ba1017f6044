//! Stamp operation - package manifest placeholders.

use std::path::{Path, PathBuf};

use comreg_package::{Dependencies, Stamp};
use eyre::{Context, Result};

use crate::reports::StampReport;

/// Options for the stamp operation.
pub struct StampOptions<'a> {
    /// Manifest template rewritten in place.
    pub file: &'a Path,
    pub version: &'a str,
    pub url: &'a str,
    /// `packages.config` files, merged in order.
    pub packages: &'a [PathBuf],
}

/// Execute the stamp operation.
pub fn stamp(opts: StampOptions) -> Result<StampReport> {
    let mut dependencies = Dependencies::new();
    for path in opts.packages {
        let parsed = Dependencies::from_file(path)
            .wrap_err_with(|| format!("Failed to read dependencies from {}", path.display()))?;
        dependencies.merge(parsed)?;
    }

    tracing::debug!(dependencies = dependencies.len(), "merged package dependencies");
    Stamp::new(opts.version, opts.url, dependencies)
        .stamp_file(opts.file)
        .wrap_err_with(|| format!("Failed to stamp {}", opts.file.display()))?;

    Ok(StampReport {
        file: opts.file.to_path_buf(),
        version: opts.version.to_string(),
        url: opts.url.to_string(),
        packages: opts.packages.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_stamp_autopkg() {
        let temp = TempDir::new().unwrap();
        let packages = temp.path().join("packages.config");
        let autopkg = temp.path().join("Image3dAPI.autopkg");
        fs::write(
            &packages,
            "<packages>\n  <package id=\"zlib\" version=\"1.2.11\" />\n</packages>\n",
        )
        .unwrap();
        fs::write(&autopkg, "version: <<GIT-VERSION>>;\ndeps: <<DEPENDENCIES>>;\n").unwrap();

        let report = stamp(StampOptions {
            file: &autopkg,
            version: "1.3",
            url: "https://example.com",
            packages: &[packages.clone()],
        })
        .unwrap();

        assert_eq!(report.packages, [packages]);
        assert_eq!(
            fs::read_to_string(&autopkg).unwrap(),
            "version: 1.3;\ndeps: zlib/1.2.11;\n"
        );
    }

    #[test]
    fn test_conflicting_packages() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a.config");
        let b = temp.path().join("b.config");
        let nuspec = temp.path().join("pkg.nuspec");
        fs::write(&a, "<packages><package id=\"zlib\" version=\"1.2\"/></packages>").unwrap();
        fs::write(&b, "<packages><package id=\"zlib\" version=\"1.3\"/></packages>").unwrap();
        fs::write(&nuspec, "<version><<GIT-VERSION>></version>\n").unwrap();

        let err = stamp(StampOptions {
            file: &nuspec,
            version: "1.0",
            url: "url",
            packages: &[a, b],
        })
        .unwrap_err();

        assert!(err.to_string().contains("version mismatch in package zlib"));
        assert_eq!(
            fs::read_to_string(&nuspec).unwrap(),
            "<version><<GIT-VERSION>></version>\n"
        );
    }
}
