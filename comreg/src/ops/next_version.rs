//! Next-version operation - release version from git tags.

use std::{path::Path, process::Command};

use comreg_core::{TagVersion, VersionPart};
use eyre::{Context, Result, bail, eyre};

use crate::reports::NextVersionReport;

/// Execute the next-version operation.
///
/// Reads the tags of the repository at `repo`, takes the highest version
/// tag and increments `part`.
pub fn next_version(repo: &Path, part: VersionPart) -> Result<NextVersionReport> {
    let output = Command::new("git")
        .arg("tag")
        .current_dir(repo)
        .output()
        .wrap_err("Failed to run `git tag`")?;

    if !output.status.success() {
        bail!(
            "`git tag` failed in {}: {}",
            repo.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let previous = highest_tag(stdout.lines())
        .ok_or_else(|| eyre!("no version tags found in {}", repo.display()))?;
    let next = bump(&previous, part)?;

    tracing::debug!(%previous, %next, "derived next version");
    Ok(NextVersionReport { next })
}

fn bump(previous: &TagVersion, part: VersionPart) -> Result<TagVersion> {
    previous
        .increment(part)
        .ok_or_else(|| eyre!("cannot increment {part:?} of {previous}: component would overflow"))
}

/// The highest version among `tags`; unparsable tags are skipped with a warning.
///
/// Of two equal versions (`1.0` and `1.0.0`) the first one listed wins.
fn highest_tag<'a>(tags: impl IntoIterator<Item = &'a str>) -> Option<TagVersion> {
    let mut highest: Option<TagVersion> = None;

    for tag in tags {
        let tag = tag.trim_matches(|c| matches!(c, ' ' | '/' | '\r' | '\n'));
        if tag.is_empty() {
            continue;
        }

        match tag.parse::<TagVersion>() {
            Ok(version) => {
                if highest.as_ref().is_none_or(|h| version > *h) {
                    highest = Some(version);
                }
            }
            Err(_) => tracing::warn!("Ignoring unparsable tag {tag}"),
        }
    }

    highest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highest_tag_is_numeric() {
        let tags = ["0.9", "0.10", "0.2.5"];
        assert_eq!(highest_tag(tags), Some(TagVersion::new([0, 10])));
    }

    #[test]
    fn test_unparsable_tags_are_ignored() {
        let tags = ["release-candidate", "1.2/", " 1.1 ", "v2.0", "1.2.3.4", ""];
        assert_eq!(highest_tag(tags), Some(TagVersion::new([1, 2])));
    }

    #[test]
    fn test_crlf_output() {
        let output = "1.0\r\n1.1\r\n";
        assert_eq!(highest_tag(output.lines()), Some(TagVersion::new([1, 1])));
    }

    #[test]
    fn test_equal_versions_keep_first() {
        let highest = highest_tag(["1.0", "1.0.0"]).unwrap();
        assert_eq!(highest.to_string(), "1.0");
    }

    #[test]
    fn test_no_tags() {
        assert_eq!(highest_tag(["nightly"]), None);
        assert_eq!(highest_tag([]), None);
    }

    #[test]
    fn test_increment_from_highest() {
        let highest = highest_tag(["0.8", "0.9"]).unwrap();
        assert_eq!(bump(&highest, VersionPart::Minor).unwrap().to_string(), "0.10");
        assert_eq!(bump(&highest, VersionPart::Major).unwrap().to_string(), "1.0");
        assert_eq!(bump(&highest, VersionPart::Patch).unwrap().to_string(), "0.9.1");
    }

    #[test]
    fn test_increment_overflow_is_an_error() {
        let highest = highest_tag(["1.0", "4294967295.0"]).unwrap();

        let err = bump(&highest, VersionPart::Major).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot increment Major of 4294967295.0: component would overflow"
        );
        assert_eq!(bump(&highest, VersionPart::Minor).unwrap().to_string(), "4294967295.1");
    }
}
