//! Resumable scan for unmatched delimiters.
//!
//! [`UnmatchedDelimiterCursor`] walks an occurrence list in one direction,
//! keeping a signed depth counter per delimiter class, and yields each
//! occurrence that is not balanced by anything already passed. Both search
//! phases of the matcher are built on this primitive.

use smallvec::SmallVec;

use crate::types::{
    DelimiterClass, DelimiterSide, IndividualDelimiter, OccurrenceSource, Offsets,
};

/// Direction in which a cursor consumes its occurrence list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDirection {
    /// Towards higher indices
    Forward,
    /// Towards lower indices
    Backward,
}

/// An unmatched delimiter yielded by a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatedDelimiter {
    /// Index of the occurrence within the source list
    pub index: usize,
    /// Offsets of the occurrence
    pub offsets: Offsets,
    /// Resolved identity of the occurrence
    pub info: IndividualDelimiter,
}

/// A one-directional resumable cursor over an occurrence list.
///
/// Each [`advance`] call scans from where the previous call left off and
/// returns the next unmatched delimiter among the currently acceptable
/// classes, or `None` once the list is exhausted. The acceptable set may
/// change between calls; the depth counters carry over.
///
/// A cursor is consumed in a single direction for its whole life. The two
/// cursors used by the containment phase are fully independent values and
/// never share counter state.
///
/// [`advance`]: UnmatchedDelimiterCursor::advance
#[derive(Debug)]
pub struct UnmatchedDelimiterCursor<'a, S: OccurrenceSource + ?Sized> {
    source: &'a S,
    direction: ScanDirection,
    /// Next index to visit; parks outside `0..len` once exhausted
    position: isize,
    /// Signed depth per class; positive means "more openings than closings
    /// seen", in scan order
    balances: SmallVec<[(DelimiterClass, i32); 4]>,
}

impl<'a, S: OccurrenceSource + ?Sized> UnmatchedDelimiterCursor<'a, S> {
    /// Create a cursor starting at `start_index`.
    ///
    /// The start index may lie outside the list bounds, in which case the
    /// cursor is already exhausted; this happens naturally when the
    /// containment phase starts its leftward cursor at `initial_index - 1`
    /// and `initial_index` is zero.
    pub fn new(source: &'a S, start_index: isize, direction: ScanDirection) -> Self {
        Self {
            source,
            direction,
            position: start_index,
            balances: SmallVec::new(),
        }
    }

    /// Scan until the next unmatched delimiter whose class is in
    /// `acceptable`, or `None` when the list is exhausted.
    ///
    /// Occurrences whose identity resolves to absent, and occurrences of
    /// classes outside `acceptable`, are passed over without touching the
    /// depth counters.
    pub fn advance(&mut self, acceptable: &[DelimiterClass]) -> Option<LocatedDelimiter> {
        loop {
            let index = self.take_next_index()?;

            let Some(info) = self.source.delimiter_info(index) else {
                continue;
            };
            if !acceptable.contains(&info.class) {
                continue;
            }

            let delta = increment(self.direction, info.side);
            let balance = self.balance_mut(info.class);
            *balance += delta;

            if *balance == -1 {
                // The opposite scan is expected to consume the matching
                // delimiter, so this class starts level again.
                *balance = 0;
                return Some(LocatedDelimiter {
                    index,
                    offsets: self.source.offsets(index),
                    info,
                });
            }
        }
    }

    fn take_next_index(&mut self) -> Option<usize> {
        if self.position < 0 || self.position >= self.source.len() as isize {
            return None;
        }
        let index = self.position as usize;
        self.position += match self.direction {
            ScanDirection::Forward => 1,
            ScanDirection::Backward => -1,
        };
        Some(index)
    }

    fn balance_mut(&mut self, class: DelimiterClass) -> &mut i32 {
        if let Some(position) = self.balances.iter().position(|(c, _)| *c == class) {
            return &mut self.balances[position].1;
        }
        self.balances.push((class, 0));
        let last = self.balances.len() - 1;
        &mut self.balances[last].1
    }
}

/// Depth delta contributed by one occurrence.
///
/// Scanning forward, an opening delimiter increments its class depth and a
/// closing one decrements it; backward the roles swap. A self-symmetric
/// spelling always decrements, otherwise a run of quotes would push the
/// depth up forever and never yield.
fn increment(direction: ScanDirection, side: DelimiterSide) -> i32 {
    match (direction, side) {
        (ScanDirection::Forward, DelimiterSide::Left) => 1,
        (ScanDirection::Forward, DelimiterSide::Right | DelimiterSide::Unknown) => -1,
        (ScanDirection::Backward, DelimiterSide::Right) => 1,
        (ScanDirection::Backward, DelimiterSide::Left | DelimiterSide::Unknown) => -1,
    }
}

/// Convenience wrapper: the first unmatched delimiter in one direction.
pub(crate) fn first_unmatched<S: OccurrenceSource + ?Sized>(
    source: &S,
    start_index: isize,
    direction: ScanDirection,
    acceptable: &[DelimiterClass],
) -> Option<LocatedDelimiter> {
    UnmatchedDelimiterCursor::new(source, start_index, direction).advance(acceptable)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paren(text: &'static str, start: usize) -> (Offsets, Option<IndividualDelimiter>) {
        let side = match text {
            "(" => DelimiterSide::Left,
            ")" => DelimiterSide::Right,
            _ => panic!("not a paren"),
        };
        (
            Offsets::new(start, start + 1),
            Some(IndividualDelimiter {
                text,
                side,
                class: DelimiterClass::Parentheses,
            }),
        )
    }

    fn quote(start: usize) -> (Offsets, Option<IndividualDelimiter>) {
        (
            Offsets::new(start, start + 1),
            Some(IndividualDelimiter {
                text: "\"",
                side: DelimiterSide::Unknown,
                class: DelimiterClass::DoubleQuotes,
            }),
        )
    }

    const PARENS: &[DelimiterClass] = &[DelimiterClass::Parentheses];

    #[test]
    fn forward_scan_skips_nested_pairs() {
        // ( ( ) )  scanning forward from index 1 the nested pair balances
        // out and the outer closing paren is yielded.
        let occurrences = [paren("(", 0), paren("(", 2), paren(")", 4), paren(")", 6)];
        let found = first_unmatched(&occurrences[..], 1, ScanDirection::Forward, PARENS)
            .expect("should find outer close");
        assert_eq!(found.index, 3);
    }

    #[test]
    fn backward_scan_finds_unmatched_opening() {
        let occurrences = [paren("(", 0), paren("(", 2), paren(")", 4)];
        let found = first_unmatched(&occurrences[..], 2, ScanDirection::Backward, PARENS)
            .expect("should find opening");
        // Index 2 is `)` which matches the `(` at index 1; index 0 is
        // unmatched.
        assert_eq!(found.index, 0);
    }

    #[test]
    fn exhausted_cursor_returns_none() {
        let occurrences = [paren("(", 0)];
        assert!(first_unmatched(&occurrences[..], -1, ScanDirection::Backward, PARENS).is_none());
        assert!(first_unmatched(&occurrences[..], 1, ScanDirection::Forward, PARENS).is_none());
    }

    #[test]
    fn self_symmetric_spelling_always_yields_first() {
        let occurrences = [quote(0), quote(4)];
        let found = first_unmatched(
            &occurrences[..],
            0,
            ScanDirection::Forward,
            &[DelimiterClass::DoubleQuotes],
        )
        .expect("quotes always yield");
        assert_eq!(found.index, 0);
    }

    #[test]
    fn resumable_with_changing_acceptable_set() {
        let bracket = (
            Offsets::new(2, 3),
            Some(IndividualDelimiter {
                text: "]",
                side: DelimiterSide::Right,
                class: DelimiterClass::SquareBrackets,
            }),
        );
        let occurrences = [paren("(", 0), bracket, paren(")", 4)];
        let mut cursor = UnmatchedDelimiterCursor::new(&occurrences[..], 0, ScanDirection::Forward);

        // First advance only accepts brackets; the paren at index 0 is
        // skipped without counting.
        let first = cursor
            .advance(&[DelimiterClass::SquareBrackets])
            .expect("bracket");
        assert_eq!(first.index, 1);

        // Second advance accepts parens; the `(` at index 0 was never
        // counted, so `)` at index 2 closes nothing and is yielded.
        let second = cursor.advance(PARENS).expect("paren");
        assert_eq!(second.index, 2);
    }

    #[test]
    fn counters_carry_over_between_advances() {
        let occurrences = [paren("(", 0), paren(")", 2), paren(")", 4)];
        let mut cursor = UnmatchedDelimiterCursor::new(&occurrences[..], 0, ScanDirection::Forward);
        // `(` then `)` balance out; the second `)` is unmatched.
        let found = cursor.advance(PARENS).expect("unmatched close");
        assert_eq!(found.index, 2);
        assert!(cursor.advance(PARENS).is_none());
    }
}
