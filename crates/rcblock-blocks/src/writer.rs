//! Pure line transforms for managed blocks.

use crate::parser::Region;

/// Remove every region from `lines`, markers included.
///
/// `regions` must be in document order and non-overlapping, as produced by
/// [`scan`](crate::scan).
pub fn strip_regions<'a, S: AsRef<str>>(lines: &'a [S], regions: &[Region]) -> Vec<&'a str> {
    let mut kept = Vec::with_capacity(lines.len());
    let mut regions = regions.iter().peekable();

    for (index, line) in lines.iter().enumerate() {
        while regions.next_if(|r| r.end < index).is_some() {}
        match regions.peek() {
            Some(region) if region.start <= index && index <= region.end => {}
            _ => kept.push(line.as_ref()),
        }
    }
    kept
}

/// Strip all existing copies and append `block` at the end.
pub fn replace_all<S: AsRef<str>>(lines: &[S], regions: &[Region], block: &[String]) -> Vec<String> {
    let mut out: Vec<String> = strip_regions(lines, regions)
        .into_iter()
        .map(str::to_string)
        .collect();
    out.extend(block.iter().cloned());
    out
}

/// Join lines into file content, one `\n` after each line.
///
/// An empty list becomes an empty string.
pub fn join_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut content = String::with_capacity(lines.iter().map(|l| l.as_ref().len() + 1).sum());
    for line in lines {
        content.push_str(line.as_ref());
        content.push('\n');
    }
    content
}
