//! @ai:module:intent Splice the markdown report into a README between markers
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReadmePatcher, splice, START_MARKER, END_MARKER

use anyhow::{Context, Result};
use std::path::Path;

pub const START_MARKER: &str = "<!-- RESULTS -->";
pub const END_MARKER: &str = "<!-- END_RESULTS -->";

/// @ai:intent Replace the text between the markers with `inserted`
/// @ai:post text outside the marker pair is preserved byte for byte
/// @ai:effects pure
pub fn splice(document: &str, inserted: &str) -> String {
    match document.split_once(START_MARKER) {
        Some((before, after)) => {
            // a missing end marker means the results run to the end of the file
            let rest = after.split_once(END_MARKER).map(|(_, rest)| rest).unwrap_or("");
            format!("{before}{START_MARKER}{inserted}{END_MARKER}{rest}")
        }
        None => format!("{document}\n{START_MARKER}{inserted}{END_MARKER}"),
    }
}

/// @ai:intent Rewrites the results block of a README file
pub struct ReadmePatcher;

impl ReadmePatcher {
    /// @ai:intent Create a new README patcher
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Splice the report into the README; false when the README is absent
    /// @ai:effects fs:read, fs:write
    pub fn patch(&self, readme: &Path, report: &str) -> Result<bool> {
        if !readme.exists() {
            tracing::info!("{} not found, skipping README update", readme.display());
            return Ok(false);
        }

        let document = std::fs::read_to_string(readme)
            .with_context(|| format!("Failed to read {}", readme.display()))?;

        let inserted = format!("\n{}\n", report);
        std::fs::write(readme, splice(&document, &inserted))
            .with_context(|| format!("Failed to write {}", readme.display()))?;

        tracing::info!("Updated results section in {}", readme.display());
        Ok(true)
    }
}

impl Default for ReadmePatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_splice_between_markers() {
        let document = "A<!-- RESULTS -->B<!-- END_RESULTS -->C";
        assert_eq!(splice(document, "X"), "A<!-- RESULTS -->X<!-- END_RESULTS -->C");
    }

    #[test]
    fn test_splice_is_idempotent() {
        let once = splice("intro\n<!-- RESULTS -->old<!-- END_RESULTS -->\nfooter\n", "\nnew\n");
        assert_eq!(splice(&once, "\nnew\n"), once);
    }

    #[test]
    fn test_splice_without_end_marker_replaces_tail() {
        let document = "A<!-- RESULTS -->stale tail";
        assert_eq!(splice(document, "X"), "A<!-- RESULTS -->X<!-- END_RESULTS -->");
    }

    #[test]
    fn test_splice_without_markers_appends_block() {
        assert_eq!(
            splice("# Title\n", "X"),
            "# Title\n\n<!-- RESULTS -->X<!-- END_RESULTS -->"
        );
    }

    #[test]
    fn test_patch_missing_readme_is_skipped() {
        let temp = TempDir::new().unwrap();
        let readme = temp.path().join("README.md");

        assert!(!ReadmePatcher::new().patch(&readme, "report").unwrap());
        assert!(!readme.exists());
    }

    #[test]
    fn test_patch_rewrites_results_block() {
        let temp = TempDir::new().unwrap();
        let readme = temp.path().join("README.md");
        std::fs::write(&readme, "# Demo\n<!-- RESULTS -->\nold\n<!-- END_RESULTS -->\nMore\n").unwrap();

        assert!(ReadmePatcher::new().patch(&readme, "# Report").unwrap());

        let content = std::fs::read_to_string(&readme).unwrap();
        assert_eq!(content, "# Demo\n<!-- RESULTS -->\n# Report\n<!-- END_RESULTS -->\nMore\n");
    }
}
