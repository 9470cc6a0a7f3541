//! Native text layer extraction
//!
//! Walks a page's structured text and produces one record per non-empty line.

use super::merge::merge_line;
use super::types::{PageBlock, StructuredPage};

/// Outcome of reading a page's native text layer
#[derive(Debug, Clone, PartialEq)]
pub enum TextLayer {
    /// The page has block-level text structure; may still hold zero records
    HasNativeText(Vec<PageBlock>),
    /// The page exposes no blocks at all
    NoNativeText,
}

impl TextLayer {
    pub fn is_present(&self) -> bool {
        matches!(self, TextLayer::HasNativeText(_))
    }
}

/// Extract line-level records from a page's structured text.
///
/// Only blocks exposing lines contribute. A page with zero blocks yields
/// `NoNativeText`; lines that merge to nothing are skipped without changing
/// that outcome.
pub fn extract_text_layer(page: &StructuredPage) -> TextLayer {
    if page.blocks.is_empty() {
        return TextLayer::NoNativeText;
    }

    let records = page
        .blocks
        .iter()
        .filter_map(|block| block.lines())
        .flatten()
        .filter_map(|line| merge_line(&line.spans))
        .collect();

    TextLayer::HasNativeText(records)
}
