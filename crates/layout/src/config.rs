use serde::{Deserialize, Serialize};
use transcript_types::{Color, Size};

/// Colours used by tables and running text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Palette {
    /// Header row band.
    pub accent: Color,
    /// Band behind even data rows.
    pub band: Color,
    /// Body text, including text drawn on a band.
    pub text: Color,
    /// Text drawn on the accent band.
    pub header_text: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            accent: Color::rgb(0x29, 0x5b, 0xac),
            band: Color::rgb(0xf5, 0xf9, 0xff),
            text: Color::rgb(0x26, 0x46, 0x53),
            header_text: Color::WHITE,
        }
    }
}

/// Declared page metrics, in points. Origin is the top-left corner of the page.
///
/// Defaults describe a US Letter page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    /// Left and right margin. Tables span the width between them.
    pub margin_x: f32,
    /// Where the cursor is placed on a fresh page.
    pub content_top: f32,
    /// Nothing but the footer is drawn below this line.
    pub content_bottom: f32,
    pub header_y: f32,
    pub footer_y: f32,
    pub font_size: f32,
    pub title_font_size: f32,
    pub heading_font_size: f32,
    pub decoration_font_size: f32,
    pub line_height: f32,
    /// Extra space between two table rows.
    pub line_gap: f32,
    /// Vertical advance after a section heading line.
    pub heading_height: f32,
    /// Space between a heading block and the table below it.
    pub section_spacing: f32,
    /// Horizontal inset of cell text inside its column.
    pub cell_padding: f32,
    pub palette: Palette,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: 612.0,
            page_height: 792.0,
            margin_x: 50.0,
            content_top: 72.0,
            content_bottom: 720.0,
            header_y: 30.0,
            footer_y: 750.0,
            font_size: 12.0,
            title_font_size: 24.0,
            heading_font_size: 16.0,
            decoration_font_size: 9.0,
            line_height: 14.0,
            line_gap: 5.0,
            heading_height: 28.0,
            section_spacing: 8.0,
            cell_padding: 3.0,
            palette: Palette::default(),
        }
    }
}

impl LayoutConfig {
    pub fn page_size(&self) -> Size {
        Size::new(self.page_width, self.page_height)
    }

    pub fn content_width(&self) -> f32 {
        (self.page_width - 2.0 * self.margin_x).max(0.0)
    }

    pub fn content_height(&self) -> f32 {
        (self.content_bottom - self.content_top).max(0.0)
    }

    /// Height of one table row, header rows included.
    pub fn row_height(&self) -> f32 {
        self.line_height + self.line_gap
    }

    /// Height of a section heading block: the heading line, one stats line and the spacing below.
    pub fn heading_block_height(&self) -> f32 {
        self.heading_height + self.row_height() + self.section_spacing
    }

    /// Data rows that fit below a heading block and a header row on a fresh page.
    pub fn section_capacity(&self) -> usize {
        crate::algorithms::pagination::row_capacity(
            self.content_height() - self.heading_block_height(),
            self.row_height(),
            self.row_height(),
        )
    }
}
