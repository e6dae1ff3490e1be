//! Diff previews embedded in changelog entries.

use std::path::Path;

use tracing::{debug, warn};

use crate::git::GitBackend;

/// A diff preview for one changed file, already truncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub path: String,
    pub diff: String,
}

/// Whether the path's extension is one of `extensions` (case-insensitive).
pub fn has_diff_extension(path: &str, extensions: &[String]) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// Return at most the first `limit` characters of `text`.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Fetch truncated diffs for every path with a recognized extension.
///
/// Paths keep their input order. A failed diff is logged and skipped, as is
/// an empty one (e.g. an untracked file), so this never fails.
pub async fn collect_diffs<G: GitBackend + ?Sized>(
    git: &G,
    paths: &[String],
    extensions: &[String],
    limit: usize,
) -> Vec<FileDiff> {
    let mut diffs = Vec::new();

    for path in paths.iter().filter(|p| has_diff_extension(p, extensions)) {
        match git.diff(path).await {
            Ok(diff) if diff.is_empty() => {
                debug!("No diff text for {}", path);
            }
            Ok(diff) => diffs.push(FileDiff {
                path: path.clone(),
                diff: truncate_chars(&diff, limit).to_string(),
            }),
            Err(e) => {
                warn!("Skipping diff preview for {}: {}", path, e);
            }
        }
    }

    diffs
}
