//! Turning byte ranges into lines and columns.

use std::fmt;
use text_size::{TextRange, TextSize};

/// The starts of every line of a text.
#[derive(Debug)]
pub struct LineIndex {
  starts: Vec<TextSize>,
}

impl LineIndex {
  /// Indexes `text`.
  #[must_use]
  pub fn new(text: &str) -> Self {
    let mut starts = vec![TextSize::from(0)];
    let mut offset = TextSize::from(0);
    for c in text.chars() {
      offset += TextSize::of(c);
      if c == '\n' {
        starts.push(offset);
      }
    }
    Self { starts }
  }

  /// Returns where `range` starts in `text`, which must be the text this indexed.
  #[must_use]
  pub fn location(&self, text: &str, range: TextRange) -> Location {
    let line = self.starts.partition_point(|&s| s <= range.start()).saturating_sub(1);
    let start = usize::from(self.starts[line]);
    let end = usize::from(range.start()).min(text.len());
    let col = text.get(start..end).map_or(0, |s| s.chars().count());
    Location { range, line: line + 1, col: col + 1 }
  }
}

/// A range with the line and column it starts at, both starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
  /// The byte range.
  pub range: TextRange,
  /// The line.
  pub line: usize,
  /// The column, in characters.
  pub col: usize,
}

impl fmt::Display for Location {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.line, self.col)
  }
}
