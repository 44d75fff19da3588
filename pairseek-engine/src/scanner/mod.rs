//! Delimiter occurrence scanners.
//!
//! Two interchangeable producers of position-ordered occurrence lists: a
//! regex scanner over plain text and a syntax-tree scanner over tree-sitter
//! nodes. Both feed the core matcher through the
//! [`OccurrenceSource`](pairseek_core::OccurrenceSource) contract and defer
//! delimiter identity resolution until the matcher asks for it.

pub mod text;
pub mod tree;

use std::collections::HashMap;

use pairseek_core::IndividualDelimiter;

/// Map from spelling text to delimiter identity.
///
/// Later entries win on collision, mirroring the catalog order; collisions
/// only arise from language overrides that reuse a spelling (ruby `)`).
pub(crate) fn spelling_map(
    delimiters: &[IndividualDelimiter],
) -> HashMap<&'static str, IndividualDelimiter> {
    delimiters.iter().map(|d| (d.text, *d)).collect()
}
