//! Surrounding-pair resolution engine.
//!
//! Given a document, a selection, and a delimiter target, the engine finds
//! the smallest matching pair of delimiters surrounding the selection. Two
//! search paths share one matching core: a text path that scans a growing
//! window with a regex, and a syntax-tree path that walks tree-sitter
//! ancestors and reads delimiter roles off the tree structure.
//!
//! ```
//! use pairseek_core::{DelimiterClass, Offsets};
//! use pairseek_engine::{PairRequest, SurroundingPairFinder, TextDocument};
//!
//! let finder = SurroundingPairFinder::new();
//! let document = TextDocument::new("foo(bar(baz)qux)");
//! let request = PairRequest::new(DelimiterClass::Parentheses);
//!
//! let pair = finder
//!     .find(&document, Offsets::new(8, 11), &request)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(pair.offsets.left_delimiter, Offsets::new(7, 8));
//! assert_eq!(pair.offsets.right_delimiter, Offsets::new(11, 12));
//! ```

#![warn(missing_docs)]

pub mod catalog;
pub mod document;
mod driver;
pub mod error;
pub mod extract;
pub mod finder;
pub mod scanner;

pub use catalog::{individual_delimiters, CompositeClass, DelimiterTarget};
pub use document::{Position, Range, TextDocument};
pub use error::{EngineError, Result};
pub use extract::SurroundingPair;
pub use finder::{FinderConfig, PairRequest, SurroundingPairFinder};

pub use pairseek_core::{
    DelimiterClass, DelimiterSide, Direction, IndividualDelimiter, Offsets, SearchOptions,
    SurroundingPairOffsets,
};
