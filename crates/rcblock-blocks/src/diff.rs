//! Unified diffs for dry-run previews

use similar::{ChangeTag, TextDiff};

/// Render a unified diff between two versions of a document.
///
/// Returns an empty string when the versions are identical.
pub fn unified_diff(label: &str, before: &str, after: &str) -> String {
    if before == after {
        return String::new();
    }

    let diff = TextDiff::from_lines(before, after);
    diff.unified_diff()
        .context_radius(3)
        .header(&format!("a/{label}"), &format!("b/{label}"))
        .to_string()
}

/// Count inserted and deleted lines.
pub fn line_stats(before: &str, after: &str) -> (usize, usize) {
    let diff = TextDiff::from_lines(before, after);
    diff.iter_all_changes()
        .fold((0, 0), |(ins, del), change| match change.tag() {
            ChangeTag::Insert => (ins + 1, del),
            ChangeTag::Delete => (ins, del + 1),
            ChangeTag::Equal => (ins, del),
        })
}
