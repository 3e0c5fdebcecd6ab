use crate::error::RenderError;
use crate::types::{StructRole, TextStyle};
use transcript_types::{Color, Point, Rect, Size};

/// A trait for page-drawing backends, abstracting the primitives the layout pass needs.
///
/// Coordinates are in points with the origin at the top-left corner of the page.
/// The surface holds no write cursor of its own: the caller positions every
/// primitive explicitly.
pub trait DrawingSurface {
    fn page_size(&self) -> Size;

    /// Starts a fresh page. All subsequent primitives land on it.
    fn begin_page(&mut self) -> Result<(), RenderError>;

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError>;

    /// Draws a single line of text whose top edge sits at `origin.y`.
    /// When `link` is given, a clickable region covering the text is attached.
    fn draw_text(
        &mut self,
        text: &str,
        origin: Point,
        style: &TextStyle,
        link: Option<&str>,
    ) -> Result<(), RenderError>;

    /// Opens a tagged region. Regions nest; every `begin_tag` needs a matching `end_tag`.
    fn begin_tag(&mut self, role: StructRole, title: Option<&str>) -> Result<(), RenderError>;

    fn end_tag(&mut self) -> Result<(), RenderError>;

    fn page_count(&self) -> usize;
}
