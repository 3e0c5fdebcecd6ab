use crate::LayoutError;
use crate::algorithms::pagination;
use crate::config::LayoutConfig;
use transcript_render_core::utils::truncate_to_width;
use transcript_render_core::{ArtifactKind, DrawingSurface, StructRole, TextStyle};
use transcript_types::{Color, Point, Rect};

/// Where the next element will be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageCursor {
    /// 1-based number of the current page; 0 before the first page is started.
    pub page: usize,
    /// Vertical write position from the top of the page.
    pub y: f32,
}

/// The single owned layout state of one export.
///
/// All drawing goes through the context so that the cursor is updated in one
/// place. Page transitions go through `start_page`, which also redraws the
/// running header and footer.
pub struct LayoutContext<'a, S: DrawingSurface + ?Sized> {
    surface: &'a mut S,
    config: &'a LayoutConfig,
    cursor: PageCursor,
    decoration: Option<String>,
}

impl<'a, S: DrawingSurface + ?Sized> LayoutContext<'a, S> {
    pub fn new(surface: &'a mut S, config: &'a LayoutConfig) -> Self {
        Self {
            surface,
            config,
            cursor: PageCursor {
                page: 0,
                y: config.content_top,
            },
            decoration: None,
        }
    }

    /// Text repeated as header and footer of every page. Blank text disables it.
    pub fn with_page_decoration(mut self, text: Option<String>) -> Self {
        self.decoration = text.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn config(&self) -> &'a LayoutConfig {
        self.config
    }

    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    pub fn cursor_y(&self) -> f32 {
        self.cursor.y
    }

    pub fn page_count(&self) -> usize {
        self.surface.page_count()
    }

    /// Begins a fresh page, resets the cursor to the content top and draws the page decoration.
    pub fn start_page(&mut self) -> Result<(), LayoutError> {
        self.surface.begin_page()?;
        self.cursor = PageCursor {
            page: self.cursor.page + 1,
            y: self.config.content_top,
        };

        if let Some(text) = self.decoration.clone() {
            let style = TextStyle::new(self.config.decoration_font_size, self.config.palette.text);
            let x = self.config.margin_x;
            let text = truncate_to_width(&text, &style, self.config.content_width());
            for y in [self.config.header_y, self.config.footer_y] {
                self.surface
                    .begin_tag(StructRole::Artifact(ArtifactKind::Pagination), None)?;
                self.surface.draw_text(&text, Point::new(x, y), &style, None)?;
                self.surface.end_tag()?;
            }
        }
        Ok(())
    }

    pub fn advance_cursor(&mut self, dy: f32) {
        self.cursor.y += dy;
    }

    pub fn available_height(&self) -> f32 {
        (self.config.content_bottom - self.cursor.y).max(0.0)
    }

    /// Data rows that fit below the cursor after a header row.
    pub fn row_capacity(&self) -> usize {
        let row_height = self.config.row_height();
        pagination::row_capacity(self.available_height(), row_height, row_height)
    }

    /// Runs `f` inside a tagged region.
    pub fn tagged<T, F>(&mut self, role: StructRole, title: Option<&str>, f: F) -> Result<T, LayoutError>
    where
        F: FnOnce(&mut Self) -> Result<T, LayoutError>,
    {
        self.surface.begin_tag(role, title)?;
        let value = f(self)?;
        self.surface.end_tag()?;
        Ok(value)
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), LayoutError> {
        self.surface.fill_rect(rect, color)?;
        Ok(())
    }

    /// Draws text at `x` on the current line without moving the cursor.
    pub fn text_at(
        &mut self,
        text: &str,
        x: f32,
        style: &TextStyle,
        link: Option<&str>,
    ) -> Result<(), LayoutError> {
        let origin = Point::new(x, self.cursor.y);
        self.surface.draw_text(text, origin, style, link)?;
        Ok(())
    }

    /// Draws text at `x` on the current line, then moves the cursor down by `advance`.
    /// Text running past the right margin is truncated.
    pub fn text_line(
        &mut self,
        text: &str,
        x: f32,
        style: &TextStyle,
        advance: f32,
    ) -> Result<(), LayoutError> {
        let right_margin = self.config.margin_x + self.config.content_width();
        let text = truncate_to_width(text, style, right_margin - x);
        self.text_at(&text, x, style, None)?;
        self.advance_cursor(advance);
        Ok(())
    }
}
