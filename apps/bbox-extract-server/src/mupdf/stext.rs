//! Structured Text Helpers
//!
//! Decodes MuPDF's structured text into the explicit
//! `StructuredPage → Block → Line → Span` records.

use mupdf::{Quad, TextBlockType, TextPage, TextPageOptions};

use crate::extraction::{Block, BoundingBox, Line, Span, StructuredPage};

/// Options for structured text extraction
#[derive(Debug, Clone, Default)]
pub struct StextOptions {
    /// Preserve whitespace
    pub preserve_whitespace: bool,
    /// Emit image blocks; pages with only images then count as having structure
    pub preserve_images: bool,
    /// Preserve ligatures
    pub preserve_ligatures: bool,
    /// Inhibit spaces between characters
    pub inhibit_spaces: bool,
}

impl StextOptions {
    /// Convert to MuPDF TextPageOptions
    pub fn to_mupdf_options(&self) -> TextPageOptions {
        let mut opts = TextPageOptions::empty();

        if self.preserve_whitespace {
            opts |= TextPageOptions::PRESERVE_WHITESPACE;
        }
        if self.preserve_images {
            opts |= TextPageOptions::PRESERVE_IMAGES;
        }
        if self.preserve_ligatures {
            opts |= TextPageOptions::PRESERVE_LIGATURES;
        }
        if self.inhibit_spaces {
            opts |= TextPageOptions::INHIBIT_SPACES;
        }

        opts
    }
}

/// Character bounding box from its quad
fn quad_bbox(quad: &Quad) -> BoundingBox {
    let x0 = quad.ul.x.min(quad.ll.x);
    let y0 = quad.ul.y.min(quad.ur.y);
    let x1 = quad.ur.x.max(quad.lr.x);
    let y1 = quad.ll.y.max(quad.lr.y);
    BoundingBox::new(x0, y0, x1, y1)
}

/// Accumulates consecutive characters of one font size into a span
#[derive(Default)]
struct SpanBuilder {
    text: String,
    bbox: Option<BoundingBox>,
    size: Option<f32>,
}

impl SpanBuilder {
    fn push(&mut self, c: char, bbox: BoundingBox, size: f32) -> Option<Span> {
        let finished = match self.size {
            Some(current) if (current - size).abs() > f32::EPSILON => self.finish(),
            _ => None,
        };

        self.text.push(c);
        self.bbox = Some(match self.bbox {
            Some(b) => b.union(&bbox),
            None => bbox,
        });
        self.size = Some(size);

        finished
    }

    fn finish(&mut self) -> Option<Span> {
        let bbox = self.bbox.take()?;
        self.size = None;
        Some(Span::new(std::mem::take(&mut self.text), bbox))
    }
}

/// Decode a MuPDF text page.
///
/// MuPDF exposes no span level; characters are grouped into spans by runs of
/// identical font size, the only style attribute available per character.
/// Image blocks, and text blocks without lines, decode to `Block::Image`.
pub fn decode_text_page(text_page: &TextPage, width: f32, height: f32) -> StructuredPage {
    let mut blocks = Vec::new();

    for block in text_page.blocks() {
        let block_bounds = block.bounds();
        let bbox = BoundingBox::new(
            block_bounds.x0,
            block_bounds.y0,
            block_bounds.x1,
            block_bounds.y1,
        );

        if matches!(block.r#type(), TextBlockType::Image) {
            blocks.push(Block::Image { bbox });
            continue;
        }

        let mut lines = Vec::new();

        for line in block.lines() {
            let mut spans = Vec::new();
            let mut builder = SpanBuilder::default();

            for ch in line.chars() {
                if let Some(c) = ch.char() {
                    if let Some(span) = builder.push(c, quad_bbox(&ch.quad()), ch.size()) {
                        spans.push(span);
                    }
                }
            }
            spans.extend(builder.finish());

            lines.push(Line::new(spans));
        }

        blocks.push(if lines.is_empty() {
            Block::Image { bbox }
        } else {
            Block::Text { bbox, lines }
        });
    }

    StructuredPage {
        width,
        height,
        blocks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stext_options_default() {
        let opts = StextOptions::default();
        assert!(opts.to_mupdf_options().is_empty());
    }

    #[test]
    fn test_stext_options_preserve_images() {
        let opts = StextOptions {
            preserve_images: true,
            ..Default::default()
        };
        let mupdf_opts = opts.to_mupdf_options();
        assert!(mupdf_opts.contains(TextPageOptions::PRESERVE_IMAGES));
        assert!(!mupdf_opts.contains(TextPageOptions::PRESERVE_WHITESPACE));
    }

    #[test]
    fn test_span_builder_splits_on_size_change() {
        let mut builder = SpanBuilder::default();
        let b = |x: f32| BoundingBox::new(x, 0.0, x + 5.0, 10.0);

        assert!(builder.push('H', b(0.0), 12.0).is_none());
        assert!(builder.push('i', b(5.0), 12.0).is_none());
        let first = builder.push('!', b(10.0), 18.0).unwrap();
        let second = builder.finish().unwrap();

        assert_eq!(first.text, "Hi");
        assert_eq!(first.bbox.to_array(), [0.0, 0.0, 10.0, 10.0]);
        assert_eq!(second.text, "!");
        assert!(builder.finish().is_none());
    }
}
