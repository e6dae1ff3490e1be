//! Commit message composition from a change summary.

use super::classify::{ChangeCategory, ChangeSummary};

/// Compose the commit message for a summary.
///
/// Produces the header followed by one bullet per non-empty category:
/// ```text
/// PBIP auto update:
/// - Measures updated (2)
/// - Tables modified (1)
/// - Relationships updated
/// - Report visuals / layout changed
/// - Other changes (3)
/// ```
pub fn compose_commit_message(summary: &ChangeSummary, header: &str) -> String {
    let mut lines = vec![header.to_string()];

    for (category, paths) in summary.non_empty() {
        let line = match category {
            ChangeCategory::Measures => format!("- Measures updated ({})", paths.len()),
            ChangeCategory::Tables => format!("- Tables modified ({})", paths.len()),
            ChangeCategory::Relationships => "- Relationships updated".to_string(),
            ChangeCategory::Visuals => "- Report visuals / layout changed".to_string(),
            ChangeCategory::Other => format!("- Other changes ({})", paths.len()),
        };
        lines.push(line);
    }

    lines.join("\n")
}
