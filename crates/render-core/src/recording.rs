//! A headless drawing surface that records every primitive it receives.
//!
//! Used for dry-run layout (page counting) and as the test double for the
//! layout crate: assertions can be made on pages, text and tag nesting
//! without producing a PDF.

use crate::error::RenderError;
use crate::traits::DrawingSurface;
use crate::types::{StructRole, TextStyle};
use transcript_types::{Color, Point, Rect, Size};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    BeginPage,
    FillRect {
        rect: Rect,
        color: Color,
    },
    Text {
        text: String,
        origin: Point,
        style: TextStyle,
        link: Option<String>,
    },
    BeginTag {
        role: StructRole,
        title: Option<String>,
    },
    EndTag,
}

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    page_size: Size,
    ops: Vec<DrawOp>,
    page_count: usize,
    open_tags: Vec<StructRole>,
}

impl RecordingSurface {
    pub fn new(page_size: Size) -> Self {
        Self {
            page_size,
            ops: Vec::new(),
            page_count: 0,
            open_tags: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Operations grouped by page. Anything recorded before the first page is dropped.
    pub fn pages(&self) -> Vec<&[DrawOp]> {
        let starts: Vec<usize> = self
            .ops
            .iter()
            .enumerate()
            .filter(|(_, op)| matches!(op, DrawOp::BeginPage))
            .map(|(i, _)| i)
            .collect();
        starts
            .iter()
            .enumerate()
            .map(|(n, &start)| {
                let end = starts.get(n + 1).copied().unwrap_or(self.ops.len());
                &self.ops[start..end]
            })
            .collect()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn page_texts(&self, page_index: usize) -> Vec<&str> {
        self.pages()
            .get(page_index)
            .map(|ops| {
                ops.iter()
                    .filter_map(|op| match op {
                        DrawOp::Text { text, .. } => Some(text.as_str()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of text primitives whose content contains `needle`.
    pub fn count_text(&self, needle: &str) -> usize {
        self.texts().filter(|t| t.contains(needle)).count()
    }

    pub fn count_tags(&self, role: StructRole) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::BeginTag { role: r, .. } if *r == role))
            .count()
    }

    /// Tags opened but not yet closed.
    pub fn open_tags(&self) -> &[StructRole] {
        &self.open_tags
    }

    fn require_page(&self) -> Result<(), RenderError> {
        if self.page_count == 0 {
            Err(RenderError::NoPage)
        } else {
            Ok(())
        }
    }
}

impl DrawingSurface for RecordingSurface {
    fn page_size(&self) -> Size {
        self.page_size
    }

    fn begin_page(&mut self) -> Result<(), RenderError> {
        self.page_count += 1;
        self.ops.push(DrawOp::BeginPage);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError> {
        self.require_page()?;
        self.ops.push(DrawOp::FillRect { rect, color });
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        origin: Point,
        style: &TextStyle,
        link: Option<&str>,
    ) -> Result<(), RenderError> {
        self.require_page()?;
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            origin,
            style: *style,
            link: link.map(str::to_string),
        });
        Ok(())
    }

    fn begin_tag(&mut self, role: StructRole, title: Option<&str>) -> Result<(), RenderError> {
        self.open_tags.push(role);
        self.ops.push(DrawOp::BeginTag {
            role,
            title: title.map(str::to_string),
        });
        Ok(())
    }

    fn end_tag(&mut self) -> Result<(), RenderError> {
        if self.open_tags.pop().is_none() {
            return Err(RenderError::UnbalancedTag(
                "end_tag called with no open tag".to_string(),
            ));
        }
        self.ops.push(DrawOp::EndTag);
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.page_count
    }
}
