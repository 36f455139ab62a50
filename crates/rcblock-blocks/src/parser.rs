//! Marker scanning.
//!
//! Locates every `start`..`end` region of a block in a list of lines and
//! classifies the document as having no block, one or more well-formed
//! copies, or unbalanced markers.

use crate::BlockSpec;

/// Inclusive line range of one block copy, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Index of the start marker line.
    pub start: usize,
    /// Index of the end marker line.
    pub end: usize,
}

impl Region {
    /// Body lines, markers excluded.
    pub fn body<'a, S: AsRef<str>>(&self, lines: &'a [S]) -> Vec<&'a str> {
        lines[self.start + 1..self.end]
            .iter()
            .map(|l| l.as_ref())
            .collect()
    }

    /// Full block lines, markers included.
    pub fn lines<'a, S: AsRef<str>>(&self, lines: &'a [S]) -> Vec<&'a str> {
        lines[self.start..=self.end]
            .iter()
            .map(|l| l.as_ref())
            .collect()
    }
}

/// Result of scanning a document for one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockScan {
    /// Neither marker occurs.
    Absent,
    /// One or more well-formed copies, in document order.
    Found(Vec<Region>),
    /// Markers occur but do not pair up.
    Partial { starts: usize, ends: usize },
}

/// Scan `lines` for copies of `spec`.
///
/// Markers match on full-line equality. Pairing is strict: each start must be
/// closed by an end before the next start, and no end may appear without an
/// open start. Anything else is `Partial`, even with equal counts.
///
/// # Example
/// ```
/// use rcblock_blocks::{BlockScan, BlockSpec, Region, scan};
///
/// let spec = BlockSpec::new("x", "# >>> X >>>", "# <<< X <<<").unwrap();
/// let lines = ["a", "# >>> X >>>", "body", "# <<< X <<<"];
/// assert_eq!(scan(&lines, &spec), BlockScan::Found(vec![Region { start: 1, end: 3 }]));
/// ```
pub fn scan<S: AsRef<str>>(lines: &[S], spec: &BlockSpec) -> BlockScan {
    let mut starts = 0;
    let mut ends = 0;
    let mut balanced = true;
    let mut open: Option<usize> = None;
    let mut regions = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        if line == spec.start() {
            starts += 1;
            if open.is_some() {
                balanced = false;
            }
            open = Some(index);
        } else if line == spec.end() {
            ends += 1;
            match open.take() {
                Some(start) => regions.push(Region { start, end: index }),
                None => balanced = false,
            }
        }
    }

    if open.is_some() {
        balanced = false;
    }

    if starts == 0 && ends == 0 {
        BlockScan::Absent
    } else if !balanced {
        tracing::debug!(block = spec.name(), starts, ends, "unbalanced markers");
        BlockScan::Partial { starts, ends }
    } else {
        BlockScan::Found(regions)
    }
}

/// Split document text into lines, dropping line terminators (`\n` or `\r\n`).
pub fn split_lines(content: &str) -> Vec<&str> {
    content.lines().collect()
}
