//! Scan-window driver for text-based searches.
//!
//! Scanning a whole large document for one pair lookup is wasteful, so the
//! driver runs the text scanner over a window centered on the selection end
//! and regrows it geometrically until a trustworthy answer emerges. A pair
//! touching the truncated edge of a window is rejected: a longer spelling
//! or a better match could lie just outside. Once the window covers the
//! whole document, whatever the scan says is final.

use pairseek_core::{
    find_surrounding_pair, DelimiterClass, IndividualDelimiter, Offsets, SearchOptions,
    SurroundingPairOffsets,
};

use crate::document::TextDocument;
use crate::extract::{extract_pair_ranges, SurroundingPair};
use crate::finder::FinderConfig;
use crate::scanner::text::TextOccurrences;

/// Search the document text for a pair surrounding `selection`, growing the
/// scan window until the result is conclusive.
pub(crate) fn find_pair_in_text(
    document: &TextDocument,
    selection: Offsets,
    delimiters: &[IndividualDelimiter],
    acceptable_classes: &[DelimiterClass],
    options: &SearchOptions,
    config: &FinderConfig,
) -> Option<SurroundingPair> {
    let mut scan_length = config.initial_scan_length;
    while scan_length < config.max_scan_length {
        let window = scan_window(document, selection, scan_length);
        let at_start = window.start == 0;
        let at_end = window.end == document.len();

        if window.contains(selection) {
            let window_text = document.slice(window);
            let window_selection = Offsets::new(
                selection.start - window.start,
                selection.end - window.start,
            );
            let occurrences =
                TextOccurrences::scan(window_text, delimiters, options.force_direction);

            // A window truncated on either side may cut a pair in half, so
            // an adjacent delimiter without a mate in the window is not
            // proof of anything yet.
            let exhaustive = at_start && at_end;
            let found = find_surrounding_pair(
                &occurrences,
                acceptable_classes,
                window_selection,
                options,
                !exhaustive,
            );

            match found {
                Some(pair) if trusted(&pair, window_text.len(), at_start, at_end) => {
                    return Some(extract_pair_ranges(document, window.start, &pair));
                }
                Some(_) => {
                    tracing::debug!(scan_length, "pair touches window edge, regrowing");
                }
                None if exhaustive => return None,
                None => {}
            }
        }

        scan_length *= config.expansion_factor;
        tracing::debug!(scan_length, "growing scan window");
    }

    None
}

/// The byte window of length `scan_length` centered on the selection end,
/// clamped to the document and widened to UTF-8 boundaries.
fn scan_window(document: &TextDocument, selection: Offsets, scan_length: usize) -> Offsets {
    let half = scan_length / 2;
    let start = selection.end.saturating_sub(half);
    let end = (selection.end + half).min(document.len());
    Offsets::new(
        floor_char_boundary(document.text(), start),
        ceil_char_boundary(document.text(), end),
    )
}

/// Whether a matched pair can be believed given which window edges are
/// truncated. A delimiter flush against a truncated edge may be the tail of
/// a longer spelling.
fn trusted(
    pair: &SurroundingPairOffsets,
    window_len: usize,
    at_start: bool,
    at_end: bool,
) -> bool {
    let touches_start = !at_start && pair.left_delimiter.start == 0;
    let touches_end = !at_end && pair.right_delimiter.end == window_len;
    !touches_start && !touches_end
}

fn floor_char_boundary(text: &str, mut offset: usize) -> usize {
    while offset > 0 && !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

fn ceil_char_boundary(text: &str, mut offset: usize) -> usize {
    while offset < text.len() && !text.is_char_boundary(offset) {
        offset += 1;
    }
    offset
}
