//! Line merging
//!
//! Combines the spans of one text line into a single record whose bbox is the
//! tightest rectangle enclosing every non-empty span.

use super::types::{PageBlock, Span};

/// Merge the spans of a single line.
///
/// Spans whose trimmed text is empty are discarded. Surviving texts are joined
/// by a single space in source order. Returns `None` when nothing survives.
pub fn merge_line(spans: &[Span]) -> Option<PageBlock> {
    let mut surviving = spans
        .iter()
        .map(|span| (span.text.trim(), span.bbox))
        .filter(|(text, _)| !text.is_empty());

    let (first_text, first_bbox) = surviving.next()?;
    let mut text = first_text.to_string();
    let mut bbox = first_bbox;

    for (span_text, span_bbox) in surviving {
        text.push(' ');
        text.push_str(span_text);
        bbox = bbox.union(&span_bbox);
    }

    Some(PageBlock { text, bbox })
}
