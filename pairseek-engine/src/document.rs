//! In-memory document abstraction.
//!
//! The engine works in byte offsets internally; [`TextDocument`] adds the
//! position lookup needed to hand line/column ranges back to callers, plus
//! the substring extraction the scan-window driver relies on.

use pairseek_core::Offsets;
use serde::{Deserialize, Serialize};

/// A zero-based line/column position. Columns are byte columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Zero-based line number
    pub line: usize,
    /// Zero-based byte column within the line
    pub character: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

/// A half-open position range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    /// Start position, inclusive
    pub start: Position,
    /// End position, exclusive
    pub end: Position,
}

impl Range {
    /// Create a new range.
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// An immutable text document with offset/position conversion.
#[derive(Debug, Clone)]
pub struct TextDocument {
    text: String,
    language_id: Option<String>,
    /// Byte offset of the first character of each line
    line_starts: Vec<usize>,
}

impl TextDocument {
    /// Create a document without language information.
    ///
    /// Without a language id the delimiter catalog serves its default
    /// tables.
    pub fn new(text: impl Into<String>) -> Self {
        Self::build(text.into(), None)
    }

    /// Create a document for a specific language id (for example `"python"`).
    pub fn with_language(text: impl Into<String>, language_id: impl Into<String>) -> Self {
        Self::build(text.into(), Some(language_id.into()))
    }

    fn build(text: String, language_id: Option<String>) -> Self {
        let mut line_starts = vec![0];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(offset + 1);
            }
        }
        Self {
            text,
            language_id,
            line_starts,
        }
    }

    /// The document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Total length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the document is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The language id, if any.
    pub fn language_id(&self) -> Option<&str> {
        self.language_id.as_deref()
    }

    /// Offsets covering the whole document.
    pub fn full_offsets(&self) -> Offsets {
        Offsets::new(0, self.text.len())
    }

    /// The substring covered by `offsets`.
    ///
    /// # Panics
    ///
    /// Panics if the offsets exceed the document length or split a UTF-8
    /// code point; callers are expected to pass offsets derived from this
    /// document.
    pub fn slice(&self, offsets: Offsets) -> &str {
        &self.text[offsets.start..offsets.end]
    }

    /// Convert a byte offset into a position, clamping to the document end.
    pub fn position_at(&self, offset: usize) -> Position {
        let offset = offset.min(self.text.len());
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        Position::new(line, offset - self.line_starts[line])
    }

    /// Convert a position into a byte offset, clamping to the document end.
    pub fn offset_at(&self, position: Position) -> usize {
        let Some(&line_start) = self.line_starts.get(position.line) else {
            return self.text.len();
        };
        let line_end = self
            .line_starts
            .get(position.line + 1)
            .copied()
            .unwrap_or(self.text.len());
        (line_start + position.character).min(line_end)
    }
}
