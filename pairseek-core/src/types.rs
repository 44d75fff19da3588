//! Data model shared by the matching algorithm and the occurrence scanners.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A half-open `[start, end)` range of offsets within some reference window.
///
/// Offsets are byte offsets relative to whatever text the occurrence list
/// was built from; translating them back to absolute document positions is
/// the caller's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offsets {
    /// Start offset, inclusive
    pub start: usize,
    /// End offset, exclusive
    pub end: usize,
}

impl Offsets {
    /// Create a new offset range.
    ///
    /// Debug builds assert `start <= end`.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "offsets out of order: {start}..{end}");
        Self { start, end }
    }

    /// Whether this range weakly contains `other` (touching counts).
    pub fn contains(&self, other: Offsets) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// Whether this range contains `other` with strict inequality on both
    /// sides.
    pub fn strictly_contains(&self, other: Offsets) -> bool {
        self.start < other.start && self.end > other.end
    }

    /// Length of the range.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the range is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Which side of a pair a delimiter spelling belongs to.
///
/// `Unknown` covers self-symmetric spellings such as `"` whose role has to
/// be inferred from context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelimiterSide {
    /// Opening delimiter
    Left,
    /// Closing delimiter
    Right,
    /// Self-symmetric spelling; the side depends on context
    Unknown,
}

/// Caller-forced scan direction for self-symmetric delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    /// The pair is expected to lie to the left of the matched delimiter
    Left,
    /// The pair is expected to lie to the right of the matched delimiter
    Right,
}

/// A named category of paired delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DelimiterClass {
    /// `(` … `)`
    Parentheses,
    /// `[` … `]`
    SquareBrackets,
    /// `{` … `}`
    CurlyBrackets,
    /// `<` … `>`, including tag delimiters such as `</`
    AngleBrackets,
    /// `'` … `'`
    SingleQuotes,
    /// `"` … `"`
    DoubleQuotes,
    /// `` ` `` … `` ` ``
    BacktickQuotes,
    /// `'''` … `'''` (only spelled in languages that define it)
    TripleSingleQuotes,
    /// `"""` … `"""` (only spelled in languages that define it)
    TripleDoubleQuotes,
    /// `\(` … `\)`
    EscapedParentheses,
    /// `\[` … `\]`
    EscapedSquareBrackets,
    /// `\'` … `\'`
    EscapedSingleQuotes,
    /// `\"` … `\"`
    EscapedDoubleQuotes,
}

impl DelimiterClass {
    /// All simple delimiter classes.
    pub const ALL: &'static [DelimiterClass] = &[
        DelimiterClass::Parentheses,
        DelimiterClass::SquareBrackets,
        DelimiterClass::CurlyBrackets,
        DelimiterClass::AngleBrackets,
        DelimiterClass::SingleQuotes,
        DelimiterClass::DoubleQuotes,
        DelimiterClass::BacktickQuotes,
        DelimiterClass::TripleSingleQuotes,
        DelimiterClass::TripleDoubleQuotes,
        DelimiterClass::EscapedParentheses,
        DelimiterClass::EscapedSquareBrackets,
        DelimiterClass::EscapedSingleQuotes,
        DelimiterClass::EscapedDoubleQuotes,
    ];

    /// The camelCase name used in serialized requests.
    pub fn name(&self) -> &'static str {
        match self {
            DelimiterClass::Parentheses => "parentheses",
            DelimiterClass::SquareBrackets => "squareBrackets",
            DelimiterClass::CurlyBrackets => "curlyBrackets",
            DelimiterClass::AngleBrackets => "angleBrackets",
            DelimiterClass::SingleQuotes => "singleQuotes",
            DelimiterClass::DoubleQuotes => "doubleQuotes",
            DelimiterClass::BacktickQuotes => "backtickQuotes",
            DelimiterClass::TripleSingleQuotes => "tripleSingleQuotes",
            DelimiterClass::TripleDoubleQuotes => "tripleDoubleQuotes",
            DelimiterClass::EscapedParentheses => "escapedParentheses",
            DelimiterClass::EscapedSquareBrackets => "escapedSquareBrackets",
            DelimiterClass::EscapedSingleQuotes => "escapedSingleQuotes",
            DelimiterClass::EscapedDoubleQuotes => "escapedDoubleQuotes",
        }
    }
}

impl fmt::Display for DelimiterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One concrete spelling of a delimiter class.
///
/// A class may have several spellings per side (an opening tag delimiter
/// may be spelled `</` or `<`), and a spelling whose left and right forms
/// coincide carries side [`DelimiterSide::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndividualDelimiter {
    /// The delimiter text as it appears in the document
    pub text: &'static str,
    /// Which side of the pair this spelling realizes
    pub side: DelimiterSide,
    /// The class this spelling belongs to
    pub class: DelimiterClass,
}

/// The matched pair, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurroundingPairOffsets {
    /// Offsets of the opening delimiter
    pub left_delimiter: Offsets,
    /// Offsets of the closing delimiter
    pub right_delimiter: Offsets,
}

impl SurroundingPairOffsets {
    /// Build a pair from two delimiter ranges in either order, normalizing
    /// so that the earlier one becomes the left delimiter.
    pub fn from_unordered(a: Offsets, b: Offsets) -> Self {
        let (left_delimiter, right_delimiter) = if a.start < b.start { (a, b) } else { (b, a) };
        Self {
            left_delimiter,
            right_delimiter,
        }
    }
}

/// Options controlling a single pair search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Force the scan direction for a delimiter whose side is ambiguous,
    /// instead of inferring it from context
    pub force_direction: Option<Direction>,
    /// Require both delimiters to lie strictly outside the selection; a pair
    /// merely touching the selection bounds is rejected in favour of the
    /// next larger enclosing pair
    pub require_strong_containment: bool,
}

/// A position-ordered list of candidate delimiter occurrences.
///
/// The identity of an occurrence may be expensive or context-dependent to
/// resolve, so it is queried lazily through [`delimiter_info`]; an
/// occurrence that resolves to `None` is not a usable delimiter and is
/// skipped by the algorithm. Implementations are expected to memoize the
/// resolution, which must stay stable for the lifetime of the value.
///
/// [`delimiter_info`]: OccurrenceSource::delimiter_info
pub trait OccurrenceSource {
    /// Number of occurrences in the list.
    fn len(&self) -> usize;

    /// Whether the list is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Offsets of the occurrence at `index`.
    fn offsets(&self, index: usize) -> Offsets;

    /// Resolved identity of the occurrence at `index`, or `None` if it
    /// turns out not to be a real delimiter (for example a greater-than
    /// operator that merely spells like an angle bracket).
    fn delimiter_info(&self, index: usize) -> Option<IndividualDelimiter>;
}

/// A plain pre-resolved occurrence list; mostly useful in tests.
impl OccurrenceSource for [(Offsets, Option<IndividualDelimiter>)] {
    fn len(&self) -> usize {
        <[_]>::len(self)
    }

    fn offsets(&self, index: usize) -> Offsets {
        self[index].0
    }

    fn delimiter_info(&self, index: usize) -> Option<IndividualDelimiter> {
        self[index].1
    }
}
