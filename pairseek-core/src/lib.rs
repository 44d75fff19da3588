//! Core surrounding-pair matching algorithm
//!
//! Given a position-ordered list of candidate delimiter occurrences and a
//! selection, this crate finds the pair of delimiters that either touches
//! the selection or most tightly contains it. The occurrence list itself is
//! produced elsewhere (see `pairseek-engine` for a regex scanner and a
//! syntax-tree scanner); the algorithm here only needs the
//! [`OccurrenceSource`] contract.
//!
//! The search runs in two phases:
//!
//! 1. **Adjacency**: if the selection touches a delimiter itself, expand
//!    from that delimiter to its opposite.
//! 2. **Containment**: otherwise scan outwards in both directions for the
//!    smallest enclosing pair.
//!
//! Both phases are built on [`UnmatchedDelimiterCursor`], a resumable
//! one-directional scan that yields delimiters not balanced by anything
//! already passed.

#![warn(missing_docs)]

pub mod locator;
pub mod matcher;
pub mod types;

pub use locator::{LocatedDelimiter, ScanDirection, UnmatchedDelimiterCursor};
pub use matcher::find_surrounding_pair;
pub use types::{
    DelimiterClass, DelimiterSide, Direction, IndividualDelimiter, OccurrenceSource, Offsets,
    SearchOptions, SurroundingPairOffsets,
};
