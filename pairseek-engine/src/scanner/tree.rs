//! Syntax-tree occurrence scanner.
//!
//! Starting at the node covering the selection, walk upward through the
//! ancestors; at each ancestor collect the descendant leaves whose kind is
//! a requested spelling and hand the list to the core matcher. The first
//! ancestor that produces a pair wins; walking up one parent at a time only
//! avoids collecting leaves for the whole file, the root node would give
//! the same answer.
//!
//! Self-symmetric spellings are disambiguated structurally: the first
//! child of its parent opens, the last child closes. The same structural
//! test separates a generic's angle bracket from a greater-than operator,
//! except inside malformed regions where the tree is not trustworthy.

use pairseek_core::{
    find_surrounding_pair, DelimiterClass, DelimiterSide, Direction, IndividualDelimiter,
    OccurrenceSource, Offsets, SearchOptions,
};
use tree_sitter::Node;

use super::spelling_map;
use crate::document::TextDocument;
use crate::extract::{extract_pair_ranges, SurroundingPair};

/// A delimiter leaf collected from the tree, with the structural facts its
/// resolution needs.
#[derive(Debug, Clone, Copy)]
struct RawOccurrence {
    offsets: Offsets,
    info: IndividualDelimiter,
    structural_side: DelimiterSide,
    in_error_region: bool,
}

/// Occurrence list over the delimiter leaves of one ancestor node.
#[derive(Debug)]
pub struct TreeOccurrences {
    raw: Vec<RawOccurrence>,
    force_direction: Option<Direction>,
}

impl TreeOccurrences {
    fn collect(
        node: Node<'_>,
        map: &std::collections::HashMap<&'static str, IndividualDelimiter>,
        force_direction: Option<Direction>,
    ) -> Self {
        let mut raw = Vec::new();
        collect_delimiter_leaves(node, map, &mut raw);
        Self {
            raw,
            force_direction,
        }
    }
}

impl OccurrenceSource for TreeOccurrences {
    fn len(&self) -> usize {
        self.raw.len()
    }

    fn offsets(&self, index: usize) -> Offsets {
        self.raw[index].offsets
    }

    fn delimiter_info(&self, index: usize) -> Option<IndividualDelimiter> {
        let occurrence = self.raw[index];
        let info = occurrence.info;

        // An angle-bracket leaf whose position within its parent
        // contradicts its catalog side is a comparison operator, not a
        // delimiter, unless the region is malformed and the structure
        // cannot be trusted.
        if info.class == DelimiterClass::AngleBrackets
            && occurrence.structural_side != info.side
            && !occurrence.in_error_region
        {
            return None;
        }

        if info.side == DelimiterSide::Unknown && self.force_direction.is_none() {
            return Some(IndividualDelimiter {
                side: occurrence.structural_side,
                ..info
            });
        }
        Some(info)
    }
}

/// Find a surrounding pair using the syntax tree.
///
/// `start_node` is any node overlapping the selection; typically the
/// smallest descendant covering it.
pub fn find_pair_in_tree(
    document: &TextDocument,
    start_node: Node<'_>,
    selection: Offsets,
    delimiters: &[IndividualDelimiter],
    acceptable_classes: &[DelimiterClass],
    options: &SearchOptions,
) -> Option<SurroundingPair> {
    let map = spelling_map(delimiters);

    let mut current = Some(start_node);
    while let Some(node) = current {
        let node_offsets = Offsets::new(node.start_byte(), node.end_byte());
        if node_offsets.contains(selection) {
            let occurrences = TreeOccurrences::collect(node, &map, options.force_direction);

            // A delimiter adjacent to the selection whose opposite is
            // missing from this ancestor's span may still be matched by a
            // larger ancestor, so bail instead of settling. At the root
            // there is nothing larger left.
            let bail_on_unmatched_adjacent = node.parent().is_some();

            if let Some(pair) = find_surrounding_pair(
                &occurrences,
                acceptable_classes,
                selection,
                options,
                bail_on_unmatched_adjacent,
            ) {
                return Some(extract_pair_ranges(document, 0, &pair));
            }
        }
        current = node.parent();
    }

    None
}

/// Collect delimiter leaves under `node` in document order.
///
/// Zero-width leaves inserted by error recovery are skipped; they spell
/// like delimiters but have no text.
fn collect_delimiter_leaves(
    node: Node<'_>,
    map: &std::collections::HashMap<&'static str, IndividualDelimiter>,
    out: &mut Vec<RawOccurrence>,
) {
    if node.child_count() == 0 {
        if node.is_missing() {
            return;
        }
        let Some(&info) = map.get(node.kind()) else {
            return;
        };
        out.push(RawOccurrence {
            offsets: Offsets::new(node.start_byte(), node.end_byte()),
            info,
            structural_side: structural_side(node),
            in_error_region: in_error_region(node),
        });
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_delimiter_leaves(child, map, out);
    }
}

/// Side implied by the leaf's position within its parent.
fn structural_side(node: Node<'_>) -> DelimiterSide {
    let Some(parent) = node.parent() else {
        return DelimiterSide::Unknown;
    };
    if parent.child(0) == Some(node) {
        DelimiterSide::Left
    } else if parent.child(parent.child_count().saturating_sub(1)) == Some(node) {
        DelimiterSide::Right
    } else {
        DelimiterSide::Unknown
    }
}

/// Whether the leaf sits inside a malformed region of the tree.
fn in_error_region(node: Node<'_>) -> bool {
    let mut current = Some(node);
    while let Some(n) = current {
        if n.is_error() {
            return true;
        }
        current = n.parent();
    }
    false
}
