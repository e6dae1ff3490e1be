//! Parsing of `git status --porcelain -z` output.

/// Width of the `XY ` status prefix on every porcelain record.
const STATUS_PREFIX_LEN: usize = 3;

/// Extract changed paths from `git status --porcelain -z` output.
///
/// Records are NUL-terminated and paths are verbatim, never quoted or
/// escaped. Each record is `XY <path>`; the two status columns and the
/// separating space are stripped. A rename or copy (`X` is `R` or `C`) is
/// followed by an extra record holding the original path, which is skipped.
pub fn parse_porcelain(output: &str) -> Vec<String> {
    let mut paths = Vec::new();
    let mut records = output.split('\0');

    while let Some(record) = records.next() {
        let Some(path) = record.get(STATUS_PREFIX_LEN..) else {
            continue;
        };
        if matches!(record.as_bytes().first(), Some(b'R' | b'C')) {
            records.next();
        }
        if !path.is_empty() {
            paths.push(path.to_string());
        }
    }

    paths
}
