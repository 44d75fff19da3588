//! Regex-based occurrence scanner for plain text.
//!
//! One disjunctive pattern over all requested spellings is run across the
//! scan window. A leading `\\.` alternative consumes escape sequences so a
//! backslash-preceded delimiter is never taken at face value; if the
//! consumed sequence is itself a requested spelling (the escaped delimiter
//! classes), it still resolves to a real occurrence.
//!
//! Self-symmetric spellings are disambiguated by a heuristic: the nearest
//! earlier same-class occurrence on the same line determines the side (its
//! opposite); no such occurrence means an opening delimiter. The chain of
//! inferences this sets off is resolved iteratively and memoized per
//! occurrence, which keeps the cost linear. The heuristic is best-effort
//! and known to guess wrong in some multi-quote-per-line text.

use std::cell::RefCell;

use pairseek_core::{
    DelimiterClass, DelimiterSide, Direction, IndividualDelimiter, OccurrenceSource, Offsets,
};
use regex::Regex;

use super::spelling_map;

/// A candidate occurrence before identity resolution.
#[derive(Debug, Clone, Copy)]
struct RawOccurrence {
    offsets: Offsets,
    /// Catalog identity of the matched text; `None` for an escape sequence
    /// that is not itself a requested spelling
    info: Option<IndividualDelimiter>,
}

/// Occurrence list produced by scanning a text window.
///
/// The side-resolution cache is scoped to this value and dropped with it;
/// classification depends on the requested classes and must never leak
/// into another scan.
#[derive(Debug)]
pub struct TextOccurrences<'t> {
    text: &'t str,
    raw: Vec<RawOccurrence>,
    force_direction: Option<Direction>,
    cache: RefCell<Vec<Option<Option<IndividualDelimiter>>>>,
}

impl<'t> TextOccurrences<'t> {
    /// Scan `text` for occurrences of the given spellings.
    pub fn scan(
        text: &'t str,
        delimiters: &[IndividualDelimiter],
        force_direction: Option<Direction>,
    ) -> Self {
        let map = spelling_map(delimiters);
        let pattern = delimiter_pattern(delimiters);
        let raw: Vec<RawOccurrence> = pattern
            .find_iter(text)
            .map(|found| RawOccurrence {
                offsets: Offsets::new(found.start(), found.end()),
                info: map.get(found.as_str()).copied(),
            })
            .collect();
        let cache = RefCell::new(vec![None; raw.len()]);
        Self {
            text,
            raw,
            force_direction,
            cache,
        }
    }

    fn resolve(&self, index: usize) -> Option<IndividualDelimiter> {
        let raw = self.raw[index].info?;
        if raw.side != DelimiterSide::Unknown || self.force_direction.is_some() {
            return Some(raw);
        }
        let side = self.infer_side(index, raw.class);
        Some(IndividualDelimiter { side, ..raw })
    }

    /// Resolve the side of a self-symmetric occurrence, memoizing every
    /// occurrence visited along the way.
    ///
    /// Walks the chain of same-line same-class predecessors until it hits
    /// one with a known side or the start of the line, then assigns
    /// alternating sides back down the chain.
    fn infer_side(&self, index: usize, class: DelimiterClass) -> DelimiterSide {
        let mut chain = vec![index];
        let mut side;
        loop {
            let current = *chain.last().expect("chain is never empty");
            match self.previous_same_class(current, class) {
                None => {
                    side = DelimiterSide::Left;
                    break;
                }
                Some(previous) if self.line_break_between(previous, current) => {
                    side = DelimiterSide::Left;
                    break;
                }
                Some(previous) => {
                    if let Some(resolved) = self.cache.borrow()[previous] {
                        side = match resolved.map(|info| info.side) {
                            Some(DelimiterSide::Left) => DelimiterSide::Right,
                            _ => DelimiterSide::Left,
                        };
                        break;
                    }
                    // A predecessor with a fixed catalog side anchors the
                    // chain without joining it; classes can mix fixed and
                    // self-symmetric spellings (lua's `[[`/`]]` next to `"`).
                    match self.raw[previous].info.map(|info| info.side) {
                        Some(DelimiterSide::Left) => {
                            side = DelimiterSide::Right;
                            break;
                        }
                        Some(DelimiterSide::Right) => {
                            side = DelimiterSide::Left;
                            break;
                        }
                        _ => chain.push(previous),
                    }
                }
            }
        }

        // Assign sides outward from the deepest unresolved occurrence.
        let mut cache = self.cache.borrow_mut();
        for &occurrence in chain.iter().rev() {
            let raw = self.raw[occurrence]
                .info
                .expect("chain members have catalog identity");
            cache[occurrence] = Some(Some(IndividualDelimiter { side, ..raw }));
            side = match side {
                DelimiterSide::Left => DelimiterSide::Right,
                _ => DelimiterSide::Left,
            };
        }

        // The loop above advanced one step past the occurrence we started
        // from; undo that.
        match side {
            DelimiterSide::Left => DelimiterSide::Right,
            _ => DelimiterSide::Left,
        }
    }

    /// Index of the nearest earlier occurrence of the same class.
    fn previous_same_class(&self, index: usize, class: DelimiterClass) -> Option<usize> {
        self.raw[..index]
            .iter()
            .rposition(|raw| raw.info.is_some_and(|info| info.class == class))
    }

    fn line_break_between(&self, earlier: usize, later: usize) -> bool {
        let gap = &self.text[self.raw[earlier].offsets.end..self.raw[later].offsets.start];
        gap.contains('\n')
    }
}

impl OccurrenceSource for TextOccurrences<'_> {
    fn len(&self) -> usize {
        self.raw.len()
    }

    fn offsets(&self, index: usize) -> Offsets {
        self.raw[index].offsets
    }

    fn delimiter_info(&self, index: usize) -> Option<IndividualDelimiter> {
        if let Some(cached) = self.cache.borrow()[index] {
            return cached;
        }
        let resolved = self.resolve(index);
        self.cache.borrow_mut()[index] = Some(resolved);
        resolved
    }
}

/// Build the disjunctive scan pattern: escape sequences first, then every
/// spelling longest-first so composite spellings win over their prefixes
/// (`\"` over `"`, `"""` over `"`).
fn delimiter_pattern(delimiters: &[IndividualDelimiter]) -> Regex {
    let mut spellings: Vec<&str> = delimiters.iter().map(|d| d.text).collect();
    spellings.sort_unstable_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    spellings.dedup();

    let disjunct = spellings
        .iter()
        .map(|spelling| regex::escape(spelling))
        .collect::<Vec<_>>()
        .join("|");

    let pattern = format!(r"(?s)\\.|{disjunct}");
    Regex::new(&pattern).expect("escaped spelling disjunction always compiles")
}
