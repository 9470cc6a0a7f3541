//! Extraction types
//!
//! Output records (`TextBlock`) and the explicit native text structure
//! (`StructuredPage` → `Block` → `Line` → `Span`) decoded from a document's
//! text layer.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in page-space units, serialized as `[x0, y0, x1, y1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BoundingBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BoundingBox {
    /// Create a bounding box from two corners.
    ///
    /// Corners are reordered so that `x0 <= x1` and `y0 <= y1` always hold.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Create a bounding box from an origin and a size (OCR token layout).
    pub fn from_origin_size(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self::new(left, top, left + width, top + height)
    }

    /// Smallest box enclosing both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Whether `other` lies entirely inside `self`.
    pub fn contains(&self, other: &BoundingBox) -> bool {
        self.x0 <= other.x0 && self.y0 <= other.y0 && self.x1 >= other.x1 && self.y1 >= other.y1
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.x0, self.y0, self.x1, self.y1]
    }
}

impl From<[f32; 4]> for BoundingBox {
    fn from(b: [f32; 4]) -> Self {
        BoundingBox::new(b[0], b[1], b[2], b[3])
    }
}

impl From<BoundingBox> for [f32; 4] {
    fn from(b: BoundingBox) -> Self {
        b.to_array()
    }
}

/// A text record produced by one of the page extractors, before the
/// document processor assigns its page number.
#[derive(Debug, Clone, PartialEq)]
pub struct PageBlock {
    pub text: String,
    pub bbox: BoundingBox,
}

impl PageBlock {
    /// Tag this block with its 1-indexed page number.
    pub fn on_page(self, page: usize) -> TextBlock {
        TextBlock {
            text: self.text,
            bbox: self.bbox,
            page,
        }
    }
}

/// Extracted text with its location on a 1-indexed page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
    pub bbox: BoundingBox,
    pub page: usize,
}

/// Smallest unit of native text with its own bbox
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub bbox: BoundingBox,
}

impl Span {
    pub fn new(text: impl Into<String>, bbox: BoundingBox) -> Self {
        Self {
            text: text.into(),
            bbox,
        }
    }
}

/// A line of spans as grouped by the document's text layer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }
}

/// A block of the structured text representation
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Block exposing a lines grouping
    Text { bbox: BoundingBox, lines: Vec<Line> },
    /// Image-only block, ignored for text extraction
    Image { bbox: BoundingBox },
}

impl Block {
    pub fn bbox(&self) -> BoundingBox {
        match self {
            Block::Text { bbox, .. } | Block::Image { bbox } => *bbox,
        }
    }

    /// Lines of a text block; `None` for image blocks.
    pub fn lines(&self) -> Option<&[Line]> {
        match self {
            Block::Text { lines, .. } => Some(lines),
            Block::Image { .. } => None,
        }
    }
}

/// Structured text of a single page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredPage {
    pub width: f32,
    pub height: f32,
    pub blocks: Vec<Block>,
}
