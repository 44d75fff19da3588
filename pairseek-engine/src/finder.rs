//! Public search facade.
//!
//! [`SurroundingPairFinder`] validates the request, expands the delimiter
//! target through the catalog, and dispatches to the text driver or the
//! syntax-tree search.

use pairseek_core::{find_surrounding_pair, Direction, Offsets, SearchOptions};
use serde::{Deserialize, Serialize};
use tree_sitter::Tree;

use crate::catalog::{individual_delimiters, DelimiterTarget};
use crate::document::TextDocument;
use crate::driver::find_pair_in_text;
use crate::error::{EngineError, Result};
use crate::extract::{extract_pair_ranges, SurroundingPair};
use crate::scanner::text::TextOccurrences;
use crate::scanner::tree::find_pair_in_tree;

/// Scan-window tuning for text-based searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinderConfig {
    /// Length in bytes of the first scan window
    pub initial_scan_length: usize,
    /// Give up growing once the window length reaches this bound
    pub max_scan_length: usize,
    /// Multiplier applied to the window length on each regrowth
    pub expansion_factor: usize,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            initial_scan_length: 200,
            max_scan_length: 50_000,
            expansion_factor: 3,
        }
    }
}

impl FinderConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.initial_scan_length == 0 {
            return Err(EngineError::ConfigError(
                "initial_scan_length must be positive".into(),
            ));
        }
        // The driver grows while the window length stays below the cap, so
        // a cap not exceeding the initial length would never scan at all.
        if self.max_scan_length <= self.initial_scan_length {
            return Err(EngineError::ConfigError(
                "max_scan_length must exceed initial_scan_length".into(),
            ));
        }
        if self.expansion_factor < 2 {
            return Err(EngineError::ConfigError(
                "expansion_factor must be at least 2".into(),
            ));
        }
        Ok(())
    }
}

/// One surrounding-pair search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairRequest {
    /// Which delimiters to look for
    pub target: DelimiterTarget,
    /// Restrict the adjacency phase to delimiters the selection precedes
    /// (`Right`) or follows (`Left`)
    #[serde(default)]
    pub force_direction: Option<Direction>,
    /// Require both delimiters strictly outside the selection
    #[serde(default)]
    pub require_strong_containment: bool,
}

impl PairRequest {
    /// A plain request for `target` with default options.
    pub fn new(target: impl Into<DelimiterTarget>) -> Self {
        Self {
            target: target.into(),
            force_direction: None,
            require_strong_containment: false,
        }
    }
}

/// Surrounding-pair search engine.
#[derive(Debug, Clone, Default)]
pub struct SurroundingPairFinder {
    config: FinderConfig,
}

impl SurroundingPairFinder {
    /// Create a finder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a finder with a custom configuration.
    pub fn with_config(config: FinderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Find the smallest delimiter pair surrounding `selection` using the
    /// document text alone.
    ///
    /// Returns `Ok(None)` when no pair of the requested classes surrounds
    /// the selection.
    pub fn find(
        &self,
        document: &TextDocument,
        selection: Offsets,
        request: &PairRequest,
    ) -> Result<Option<SurroundingPair>> {
        self.validate_selection(document, selection)?;
        let classes = request.target.classes();
        let delimiters = individual_delimiters(document.language_id(), &classes)?;
        let options = search_options(request);

        tracing::debug!(?selection, ?request.target, "text-based pair search");
        Ok(find_pair_in_text(
            document,
            selection,
            &delimiters,
            &classes,
            &options,
            &self.config,
        ))
    }

    /// Find the smallest delimiter pair surrounding `selection` using a
    /// tree-sitter parse of the document.
    ///
    /// When the selection sits inside a string or comment, its content is
    /// first searched textually so that delimiters the parser does not
    /// tokenize (a parenthesis inside a string literal) are still found;
    /// the syntax-tree walk is the fallback.
    pub fn find_in_tree(
        &self,
        document: &TextDocument,
        tree: &Tree,
        selection: Offsets,
        request: &PairRequest,
    ) -> Result<Option<SurroundingPair>> {
        self.validate_selection(document, selection)?;
        let classes = request.target.classes();
        let delimiters = individual_delimiters(document.language_id(), &classes)?;
        let options = search_options(request);

        let node = tree
            .root_node()
            .descendant_for_byte_range(selection.start, selection.end)
            .unwrap_or_else(|| tree.root_node());

        if let Some(fragment) = enclosing_opaque_fragment(node, selection) {
            tracing::debug!(?selection, ?fragment, "textual search inside opaque node");
            let text = document.slice(fragment);
            let occurrences = TextOccurrences::scan(text, &delimiters, options.force_direction);
            let relative = Offsets::new(
                selection.start - fragment.start,
                selection.end - fragment.start,
            );
            if let Some(pair) =
                find_surrounding_pair(&occurrences, &classes, relative, &options, false)
            {
                return Ok(Some(extract_pair_ranges(document, fragment.start, &pair)));
            }
        }

        tracing::debug!(?selection, ?request.target, "tree-based pair search");
        Ok(find_pair_in_tree(
            document, node, selection, &delimiters, &classes, &options,
        ))
    }

    fn validate_selection(&self, document: &TextDocument, selection: Offsets) -> Result<()> {
        if selection.start > selection.end || selection.end > document.len() {
            return Err(EngineError::InvalidSelection {
                start: selection.start,
                end: selection.end,
                document_len: document.len(),
            });
        }
        Ok(())
    }
}

fn search_options(request: &PairRequest) -> SearchOptions {
    SearchOptions {
        force_direction: request.force_direction,
        require_strong_containment: request.require_strong_containment,
    }
}

/// The byte range of the nearest ancestor node whose content the parser
/// treats as opaque text (strings, comments), if one covers the selection.
fn enclosing_opaque_fragment(node: tree_sitter::Node<'_>, selection: Offsets) -> Option<Offsets> {
    let mut current = Some(node);
    while let Some(n) = current {
        let offsets = Offsets::new(n.start_byte(), n.end_byte());
        if offsets.contains(selection) {
            let kind = n.kind();
            if kind.contains("string") || kind.contains("comment") {
                return Some(offsets);
            }
        }
        current = n.parent();
    }
    None
}
