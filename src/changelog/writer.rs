//! Append timestamped change sections to the changelog.

use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::Path;

use chrono::Local;

use crate::changes::{ChangeCategory, ChangeSummary};
use crate::error::ChangelogError;

use super::diff::FileDiff;

/// Timestamp format of each section heading.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time formatted for a section heading.
pub fn current_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Render one changelog section.
///
/// Measures, tables and other changes list their paths; relationships and
/// visuals are noted by presence only. Each diff is wrapped in a collapsible
/// `<details>` block.
pub fn render_section(timestamp: &str, summary: &ChangeSummary, diffs: &[FileDiff]) -> String {
    let mut section = format!("\n## {}\n", timestamp);

    for (category, paths) in summary.non_empty() {
        let heading = match category {
            ChangeCategory::Measures => "- Measures updated:",
            ChangeCategory::Tables => "- Tables modified:",
            ChangeCategory::Relationships => {
                section.push_str("- Relationships updated\n");
                continue;
            }
            ChangeCategory::Visuals => {
                section.push_str("- Visuals / report layout changed\n");
                continue;
            }
            ChangeCategory::Other => "- Other changes:",
        };

        section.push_str(heading);
        section.push('\n');
        for path in paths {
            let _ = writeln!(section, "  - {}", path);
        }
    }

    for file in diffs {
        let _ = write!(
            section,
            "\n<details>\n<summary>Diff: {}</summary>\n\n```diff\n{}\n```\n</details>\n",
            file.path, file.diff
        );
    }

    section
}

/// Append a rendered section to the changelog, creating the file if needed.
///
/// Existing content is never rewritten; the section is written in one call.
pub fn append_changelog(path: &Path, section: &str) -> Result<(), ChangelogError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(ChangelogError::WriteFailed)?;

    file.write_all(section.as_bytes())
        .map_err(ChangelogError::WriteFailed)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_section_full() {
        let summary = ChangeSummary::from_paths(&[
            "Model/Measures/Sales.tmdl",
            "Model/Tables/Orders.tmdl",
            "Model/relationships.tmdl",
            "Report/visual1.json",
            "README.md",
        ]);
        let diffs = vec![FileDiff {
            path: "Model/Measures/Sales.tmdl".to_string(),
            diff: "-a\n+b".to_string(),
        }];

        let section = render_section("2024-01-01 12:00:00", &summary, &diffs);

        assert_eq!(
            section,
            "\n## 2024-01-01 12:00:00\n\
             - Measures updated:\n  - Model/Measures/Sales.tmdl\n\
             - Tables modified:\n  - Model/Tables/Orders.tmdl\n\
             - Relationships updated\n\
             - Visuals / report layout changed\n\
             - Other changes:\n  - README.md\n\
             \n<details>\n<summary>Diff: Model/Measures/Sales.tmdl</summary>\n\n\
             ```diff\n-a\n+b\n```\n</details>\n"
        );
    }

    #[test]
    fn test_render_section_omits_empty_categories() {
        let summary = ChangeSummary::from_paths(&["Report/visual1.json"]);
        let section = render_section("2024-01-01 12:00:00", &summary, &[]);

        assert_eq!(
            section,
            "\n## 2024-01-01 12:00:00\n- Visuals / report layout changed\n"
        );
    }

    #[test]
    fn test_current_timestamp_format() {
        let ts = current_timestamp();
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn test_append_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CHANGELOG.md");

        append_changelog(&path, "\n## first\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "\n## first\n");
    }

    #[test]
    fn test_append_preserves_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CHANGELOG.md");
        std::fs::write(&path, "# Changelog\n\nHand-written notes.\n").unwrap();

        append_changelog(&path, "\n## one\n").unwrap();
        append_changelog(&path, "\n## two\n").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "# Changelog\n\nHand-written notes.\n\n## one\n\n## two\n"
        );
    }

    #[test]
    fn test_append_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("CHANGELOG.md");

        let result = append_changelog(&path, "\n## x\n");
        assert!(matches!(result, Err(ChangelogError::WriteFailed(_))));
    }
}
