//! In-memory documents for tests

use std::cell::Cell;
use std::path::Path;

use image::RgbImage;

use super::error::{ExtractError, Result};
use super::page::PageSource;
use super::processor::{DocumentBackend, OpenDocument};
use super::types::{Block, BoundingBox, Line, Span, StructuredPage};

/// In-memory page counting how often it was rasterized
pub struct FakePage {
    pub structured: StructuredPage,
    pub rasterized: Cell<usize>,
}

impl FakePage {
    pub fn with_lines(lines: Vec<Vec<(&str, [f32; 4])>>) -> Self {
        let lines = lines
            .into_iter()
            .map(|spans| {
                Line::new(
                    spans
                        .into_iter()
                        .map(|(t, b)| Span::new(t, BoundingBox::from(b)))
                        .collect(),
                )
            })
            .collect();
        Self {
            structured: StructuredPage {
                width: 612.0,
                height: 792.0,
                blocks: vec![Block::Text {
                    bbox: BoundingBox::new(0.0, 0.0, 612.0, 792.0),
                    lines,
                }],
            },
            rasterized: Cell::new(0),
        }
    }

    pub fn scanned() -> Self {
        Self {
            structured: StructuredPage {
                width: 612.0,
                height: 792.0,
                blocks: Vec::new(),
            },
            rasterized: Cell::new(0),
        }
    }
}

impl PageSource for FakePage {
    fn structured_text(&self) -> Result<StructuredPage> {
        Ok(self.structured.clone())
    }

    fn rasterize(&self) -> Result<RgbImage> {
        self.rasterized.set(self.rasterized.get() + 1);
        Ok(RgbImage::new(
            self.structured.width as u32,
            self.structured.height as u32,
        ))
    }
}

/// Backend whose documents have one text line per page (`None` = scanned page)
pub struct StaticBackend {
    pub pages: Vec<Option<&'static str>>,
}

struct StaticDocument<'a> {
    pages: &'a [Option<&'static str>],
}

impl DocumentBackend for StaticBackend {
    fn name(&self) -> &str {
        "static"
    }

    fn open(&self, path: &Path) -> Result<Box<dyn OpenDocument + '_>> {
        if !path.exists() {
            return Err(ExtractError::DocumentOpenFailed(format!(
                "{} does not exist",
                path.display()
            )));
        }
        Ok(Box::new(StaticDocument { pages: &self.pages }))
    }
}

impl OpenDocument for StaticDocument<'_> {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn load_page(&self, index: usize) -> Result<Box<dyn PageSource + '_>> {
        Ok(Box::new(match self.pages[index] {
            Some(text) => FakePage::with_lines(vec![vec![(text, [10.0, 10.0, 90.0, 20.0])]]),
            None => FakePage::scanned(),
        }))
    }
}
