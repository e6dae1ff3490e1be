//! Append-only changelog with per-category detail and diff previews.

pub mod diff;
pub mod writer;

pub use diff::{FileDiff, collect_diffs};
pub use writer::{append_changelog, current_timestamp, render_section};
