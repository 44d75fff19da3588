//! Static delimiter catalog.
//!
//! Maps each delimiter class to its left and right spellings, with
//! per-language overrides for languages whose lexers spell delimiters
//! differently (nix `''` strings, lua long brackets, python triple quotes,
//! ruby `%Q(` literals). Composite targets expand to lists of simple
//! classes. The tables are the only state shared between searches and are
//! read-only.

use pairseek_core::{DelimiterClass, DelimiterSide, IndividualDelimiter};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// What the caller asked to surround the selection with: one simple class
/// or a composite shorthand for several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DelimiterTarget {
    /// A single delimiter class
    Simple(DelimiterClass),
    /// A composite shorthand
    Composite(CompositeClass),
}

/// Composite delimiter shorthands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompositeClass {
    /// Every simple class
    Any,
    /// All string-quote classes
    String,
    /// All bracket classes
    CollectionBoundary,
}

impl DelimiterTarget {
    /// Expand the target to the simple classes it covers.
    pub fn classes(&self) -> Vec<DelimiterClass> {
        match self {
            DelimiterTarget::Simple(class) => vec![*class],
            DelimiterTarget::Composite(CompositeClass::Any) => DelimiterClass::ALL.to_vec(),
            DelimiterTarget::Composite(CompositeClass::String) => vec![
                DelimiterClass::TripleDoubleQuotes,
                DelimiterClass::TripleSingleQuotes,
                DelimiterClass::DoubleQuotes,
                DelimiterClass::SingleQuotes,
                DelimiterClass::BacktickQuotes,
            ],
            DelimiterTarget::Composite(CompositeClass::CollectionBoundary) => vec![
                DelimiterClass::Parentheses,
                DelimiterClass::SquareBrackets,
                DelimiterClass::CurlyBrackets,
                DelimiterClass::AngleBrackets,
            ],
        }
    }
}

impl From<DelimiterClass> for DelimiterTarget {
    fn from(class: DelimiterClass) -> Self {
        DelimiterTarget::Simple(class)
    }
}

impl From<CompositeClass> for DelimiterTarget {
    fn from(composite: CompositeClass) -> Self {
        DelimiterTarget::Composite(composite)
    }
}

/// Left and right spellings of one class.
#[derive(Debug, Clone, Copy)]
struct DelimiterEntry {
    left: &'static [&'static str],
    right: &'static [&'static str],
}

/// Default spellings, independent of language.
///
/// The multi-spelling entries cover lexers that hand out composite tokens:
/// `$(`/`${` interpolation openers share the class of their plain form, and
/// tag delimiters `</`/`/>` count as angle brackets. Triple-quote classes
/// have no default spelling; only language overrides provide them.
fn default_entry(class: DelimiterClass) -> DelimiterEntry {
    match class {
        DelimiterClass::Parentheses => DelimiterEntry {
            left: &["(", "$("],
            right: &[")"],
        },
        DelimiterClass::SquareBrackets => DelimiterEntry {
            left: &["["],
            right: &["]"],
        },
        DelimiterClass::CurlyBrackets => DelimiterEntry {
            left: &["{", "${"],
            right: &["}"],
        },
        DelimiterClass::AngleBrackets => DelimiterEntry {
            left: &["</", "<"],
            right: &[">", "/>"],
        },
        DelimiterClass::SingleQuotes => DelimiterEntry {
            left: &["'"],
            right: &["'"],
        },
        DelimiterClass::DoubleQuotes => DelimiterEntry {
            left: &["\""],
            right: &["\""],
        },
        DelimiterClass::BacktickQuotes => DelimiterEntry {
            left: &["`"],
            right: &["`"],
        },
        DelimiterClass::TripleSingleQuotes | DelimiterClass::TripleDoubleQuotes => DelimiterEntry {
            left: &[],
            right: &[],
        },
        DelimiterClass::EscapedParentheses => DelimiterEntry {
            left: &["\\("],
            right: &["\\)"],
        },
        DelimiterClass::EscapedSquareBrackets => DelimiterEntry {
            left: &["\\["],
            right: &["\\]"],
        },
        DelimiterClass::EscapedSingleQuotes => DelimiterEntry {
            left: &["\\'"],
            right: &["\\'"],
        },
        DelimiterClass::EscapedDoubleQuotes => DelimiterEntry {
            left: &["\\\""],
            right: &["\\\""],
        },
    }
}

/// Per-language replacements for individual classes.
fn entry_for(language_id: Option<&str>, class: DelimiterClass) -> DelimiterEntry {
    match (language_id, class) {
        (Some("nix"), DelimiterClass::SingleQuotes) => DelimiterEntry {
            left: &["''"],
            right: &["''"],
        },
        (Some("lua"), DelimiterClass::DoubleQuotes) => DelimiterEntry {
            left: &["\"", "[["],
            right: &["\"", "]]"],
        },
        (Some("python"), DelimiterClass::TripleSingleQuotes) => DelimiterEntry {
            left: &["'''"],
            right: &["'''"],
        },
        (Some("python"), DelimiterClass::TripleDoubleQuotes) => DelimiterEntry {
            left: &["\"\"\""],
            right: &["\"\"\""],
        },
        (Some("ruby"), DelimiterClass::TripleDoubleQuotes) => DelimiterEntry {
            left: &["%Q("],
            right: &[")"],
        },
        _ => default_entry(class),
    }
}

/// Every distinct spelling of the requested classes, annotated with its
/// side.
///
/// A spelling that appears in both the left and the right list of its class
/// (quotes) is reported once with side [`DelimiterSide::Unknown`]. An empty
/// spelling in a table is a catalog bug: development builds fail fast,
/// release builds skip the entry. A request whose expansion produces no
/// spellings at all cannot ever match and is reported as
/// [`EngineError::UnsupportedDelimiter`].
pub fn individual_delimiters(
    language_id: Option<&str>,
    classes: &[DelimiterClass],
) -> Result<Vec<IndividualDelimiter>> {
    let mut result = Vec::new();

    for &class in classes {
        let entry = entry_for(language_id, class);
        for &text in entry.left.iter().chain(entry.right) {
            debug_assert!(!text.is_empty(), "empty spelling for {class}");
            if text.is_empty() || result.iter().any(|d: &IndividualDelimiter| {
                d.class == class && d.text == text
            }) {
                continue;
            }
            let side = match (entry.left.contains(&text), entry.right.contains(&text)) {
                (true, true) => DelimiterSide::Unknown,
                (true, false) => DelimiterSide::Left,
                _ => DelimiterSide::Right,
            };
            result.push(IndividualDelimiter { text, side, class });
        }
    }

    if result.is_empty() {
        return Err(EngineError::UnsupportedDelimiter {
            classes: classes.to_vec(),
            language: language_id.unwrap_or("plaintext").to_string(),
        });
    }

    Ok(result)
}
