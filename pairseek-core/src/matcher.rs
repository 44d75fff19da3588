//! Two-phase surrounding-pair search.
//!
//! Phase 1 looks for a delimiter the selection touches and expands from it
//! to its opposite. Phase 2 scans outwards in both directions for the
//! smallest pair whose interior contains the selection. "No pair found" is
//! the expected frequent outcome and is reported as `None`.

use crate::locator::{
    first_unmatched, LocatedDelimiter, ScanDirection, UnmatchedDelimiterCursor,
};
use crate::types::{
    DelimiterClass, DelimiterSide, Direction, IndividualDelimiter, OccurrenceSource, Offsets,
    SearchOptions, SurroundingPairOffsets,
};

/// Find the surrounding pair for `selection` within an occurrence list.
///
/// `acceptable_classes` restricts which delimiter classes may form the
/// pair. `bail_on_unmatched_adjacent` must be set whenever the occurrence
/// list does not provably cover the whole document: if the selection
/// touches a delimiter whose opposite lies outside the list, the search
/// fails outright so the caller can retry with a larger window instead of
/// settling for a wrong enclosing pair.
pub fn find_surrounding_pair<S: OccurrenceSource + ?Sized>(
    source: &S,
    acceptable_classes: &[DelimiterClass],
    selection: Offsets,
    options: &SearchOptions,
    bail_on_unmatched_adjacent: bool,
) -> Option<SurroundingPairOffsets> {
    // First occurrence that ends at or after the selection end. The
    // occurrence list is position-ordered, so binary search applies.
    let initial_index = lower_bound_by_end(source, selection.end);

    match adjacent_pair(
        source,
        selection,
        options,
        initial_index,
        bail_on_unmatched_adjacent,
    ) {
        Adjacency::Found(pair) => Some(pair),
        Adjacency::Bail => None,
        Adjacency::Fallthrough => {
            containing_pair(source, acceptable_classes, selection, options, initial_index)
        }
    }
}

/// Index of the first occurrence whose end offset is `>= end`.
fn lower_bound_by_end<S: OccurrenceSource + ?Sized>(source: &S, end: usize) -> usize {
    let mut lo = 0;
    let mut hi = source.len();
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if source.offsets(mid).end < end {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

enum Adjacency {
    Found(SurroundingPairOffsets),
    /// An adjacent delimiter exists but its opposite is not in the list and
    /// the list may be truncated; the whole search must fail.
    Bail,
    Fallthrough,
}

/// Phase 1: a pair where the selection touches a delimiter itself.
///
/// The occurrence at `initial_index + 1` is tried before `initial_index`:
/// when the selection end coincides with a delimiter boundary, the later
/// occurrence is the one the selection actually touches.
fn adjacent_pair<S: OccurrenceSource + ?Sized>(
    source: &S,
    selection: Offsets,
    options: &SearchOptions,
    initial_index: usize,
    bail_on_unmatched_adjacent: bool,
) -> Adjacency {
    for index in [initial_index + 1, initial_index] {
        if index >= source.len() {
            continue;
        }
        let offsets = source.offsets(index);
        if !offsets.contains(selection) {
            continue;
        }
        let Some(info) = source.delimiter_info(index) else {
            continue;
        };

        match opposite_delimiter(source, index, info, options.force_direction) {
            Some(opposite) => {
                let pair = SurroundingPairOffsets::from_unordered(offsets, opposite.offsets);
                if options.require_strong_containment
                    && !(pair.left_delimiter.start < selection.start
                        && pair.right_delimiter.end > selection.end)
                {
                    // The pair does not strictly straddle the selection;
                    // let the containment phase look for a larger one.
                    return Adjacency::Fallthrough;
                }
                return Adjacency::Found(pair);
            }
            None if bail_on_unmatched_adjacent => return Adjacency::Bail,
            None => {}
        }
    }

    Adjacency::Fallthrough
}

/// The opposite delimiter of the same class, scanning away from `index`.
///
/// The scan direction follows the delimiter's side; an ambiguous side tries
/// rightward then leftward, unless the caller forced a direction.
fn opposite_delimiter<S: OccurrenceSource + ?Sized>(
    source: &S,
    index: usize,
    info: IndividualDelimiter,
    force_direction: Option<Direction>,
) -> Option<LocatedDelimiter> {
    let acceptable = [info.class];
    let index = index as isize;

    let effective_side = match force_direction {
        // A forced leftward search treats the matched delimiter as closing.
        Some(Direction::Left) => DelimiterSide::Right,
        Some(Direction::Right) => DelimiterSide::Left,
        None => info.side,
    };

    match effective_side {
        DelimiterSide::Left => {
            first_unmatched(source, index + 1, ScanDirection::Forward, &acceptable)
        }
        DelimiterSide::Right => {
            first_unmatched(source, index - 1, ScanDirection::Backward, &acceptable)
        }
        DelimiterSide::Unknown => {
            first_unmatched(source, index + 1, ScanDirection::Forward, &acceptable).or_else(|| {
                first_unmatched(source, index - 1, ScanDirection::Backward, &acceptable)
            })
        }
    }
}

/// Phase 2: the smallest pair containing the selection.
///
/// Two independent cursors scan outwards from the selection. The rightward
/// cursor accepts every requested class and yields unmatched closing
/// delimiters innermost-first; after each yield the leftward cursor looks
/// for the matching unmatched opening delimiter of exactly that class.
/// Cursor state carries over between iterations, so each loop turn resumes
/// where the previous one stopped and the first pair that reaches back to
/// the selection start is the smallest enclosing one.
fn containing_pair<S: OccurrenceSource + ?Sized>(
    source: &S,
    acceptable_classes: &[DelimiterClass],
    selection: Offsets,
    options: &SearchOptions,
    initial_index: usize,
) -> Option<SurroundingPairOffsets> {
    let mut right_cursor =
        UnmatchedDelimiterCursor::new(source, initial_index as isize, ScanDirection::Forward);
    let mut left_cursor =
        UnmatchedDelimiterCursor::new(source, initial_index as isize - 1, ScanDirection::Backward);

    loop {
        let right = right_cursor.advance(acceptable_classes)?;

        // The leftward scan only accepts the class the rightward scan just
        // found.
        let left_classes = [right.info.class];
        let left = left_cursor.advance(&left_classes)?;

        if left.offsets.start <= selection.start {
            if options.require_strong_containment
                && !(left.offsets.end <= selection.start && right.offsets.start >= selection.end)
            {
                // The candidate touches the selection; keep scanning
                // outwards for a larger enclosing pair.
                continue;
            }
            return Some(SurroundingPairOffsets::from_unordered(
                left.offsets,
                right.offsets,
            ));
        }
    }
}
