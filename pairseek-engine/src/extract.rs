//! Translation of window-relative match offsets into document ranges.

use pairseek_core::{Offsets, SurroundingPairOffsets};

use crate::document::{Range, TextDocument};

/// A resolved surrounding pair, in absolute document terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurroundingPair {
    /// Absolute offsets of both delimiters
    pub offsets: SurroundingPairOffsets,
    /// From the start of the left delimiter to the end of the right one
    pub content: Range,
    /// The text between the two delimiters
    pub interior: Range,
    /// The left delimiter itself
    pub left_delimiter: Range,
    /// The right delimiter itself
    pub right_delimiter: Range,
}

/// Translate a pair matched relative to a scan window into absolute
/// document ranges.
///
/// `base_offset` is the document offset of the window the pair offsets are
/// relative to; the tree-based path passes zero since syntax-tree offsets
/// are already absolute.
pub fn extract_pair_ranges(
    document: &TextDocument,
    base_offset: usize,
    pair: &SurroundingPairOffsets,
) -> SurroundingPair {
    let left = shift(pair.left_delimiter, base_offset);
    let right = shift(pair.right_delimiter, base_offset);

    let range = |offsets: Offsets| {
        Range::new(
            document.position_at(offsets.start),
            document.position_at(offsets.end),
        )
    };

    SurroundingPair {
        offsets: SurroundingPairOffsets {
            left_delimiter: left,
            right_delimiter: right,
        },
        content: range(Offsets::new(left.start, right.end)),
        interior: range(Offsets::new(left.end, right.start)),
        left_delimiter: range(left),
        right_delimiter: range(right),
    }
}

fn shift(offsets: Offsets, base: usize) -> Offsets {
    Offsets::new(offsets.start + base, offsets.end + base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Position;

    #[test]
    fn translates_window_relative_offsets() {
        let document = TextDocument::new("xx\nfoo(bar)");
        // Pair matched inside a window starting at offset 3 ("foo(bar)").
        let pair = SurroundingPairOffsets {
            left_delimiter: Offsets::new(3, 4),
            right_delimiter: Offsets::new(7, 8),
        };
        let extracted = extract_pair_ranges(&document, 3, &pair);

        assert_eq!(extracted.offsets.left_delimiter, Offsets::new(6, 7));
        assert_eq!(extracted.offsets.right_delimiter, Offsets::new(10, 11));
        assert_eq!(
            extracted.content,
            Range::new(Position::new(1, 3), Position::new(1, 8))
        );
        assert_eq!(
            extracted.interior,
            Range::new(Position::new(1, 4), Position::new(1, 7))
        );
        assert_eq!(
            extracted.left_delimiter,
            Range::new(Position::new(1, 3), Position::new(1, 4))
        );
        assert_eq!(
            extracted.right_delimiter,
            Range::new(Position::new(1, 7), Position::new(1, 8))
        );
    }
}
