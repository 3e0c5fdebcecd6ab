//! The table builder: draws one tagged, row-banded table starting at the cursor.
//!
//! The builder never starts a page. Callers slice rows into page-sized chunks
//! first and hand each chunk over as its own `TableSpec`.

use crate::LayoutError;
use crate::config::LayoutConfig;
use crate::interface::LayoutContext;
use crate::util::format_count;
use transcript_render_core::utils::truncate_to_width;
use transcript_render_core::{ArtifactKind, DrawingSurface, StructRole, TextStyle};
use transcript_types::{Color, Rect};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Plain(String),
    /// Text drawn with a clickable region pointing at `link`.
    Link { value: String, link: String },
}

impl CellValue {
    pub fn linked(value: impl Into<String>, link: impl Into<String>) -> Self {
        CellValue::Link {
            value: value.into(),
            link: link.into(),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            CellValue::Plain(value) | CellValue::Link { value, .. } => value,
        }
    }

    pub fn href(&self) -> Option<&str> {
        match self {
            CellValue::Plain(_) => None,
            CellValue::Link { link, .. } => Some(link),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Plain(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Plain(value)
    }
}

impl From<u64> for CellValue {
    fn from(value: u64) -> Self {
        CellValue::Plain(format_count(value))
    }
}

/// One table to draw: a title for the structure tree, the column headers and the data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl TableSpec {
    pub fn new(title: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            title: title.into(),
            headers,
            rows: Vec::new(),
        }
    }

    pub fn with_rows(mut self, rows: Vec<Vec<CellValue>>) -> Self {
        self.rows = rows;
        self
    }

    /// Every row must have exactly one cell per header.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.headers.is_empty() {
            return Err(LayoutError::InvalidTable(format!(
                "table '{}' has no columns",
                self.title
            )));
        }
        if let Some((i, row)) = self
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != self.headers.len())
        {
            return Err(LayoutError::InvalidTable(format!(
                "row {} of table '{}' has {} cells, expected {}",
                i,
                self.title,
                row.len(),
                self.headers.len()
            )));
        }
        Ok(())
    }
}

/// Column geometry for a table, fixed for the lifetime of the table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableBuilder {
    columns: Vec<f32>,
    column_width: f32,
}

impl TableBuilder {
    /// Divides the width between the margins evenly among `column_count` columns.
    pub fn new(config: &LayoutConfig, column_count: usize) -> Result<Self, LayoutError> {
        if column_count == 0 {
            return Err(LayoutError::InvalidTable("table has no columns".to_string()));
        }
        let column_width = config.content_width() / column_count as f32;
        let columns = (0..column_count)
            .map(|i| config.margin_x + i as f32 * column_width)
            .collect();
        Ok(Self {
            columns,
            column_width,
        })
    }

    pub fn column_offsets(&self) -> &[f32] {
        &self.columns
    }

    pub fn column_width(&self) -> f32 {
        self.column_width
    }

    /// Height taken by the header row plus `rows` data rows.
    pub fn table_height(config: &LayoutConfig, rows: usize) -> f32 {
        (rows + 1) as f32 * config.row_height()
    }

    /// Draws the header row and every data row of `spec`, advancing the cursor once per row.
    pub fn draw<S: DrawingSurface + ?Sized>(
        &self,
        ctx: &mut LayoutContext<'_, S>,
        spec: &TableSpec,
    ) -> Result<(), LayoutError> {
        spec.validate()?;
        if spec.headers.len() != self.columns.len() {
            return Err(LayoutError::InvalidTable(format!(
                "table '{}' has {} headers but the builder has {} columns",
                spec.title,
                spec.headers.len(),
                self.columns.len()
            )));
        }

        let config = ctx.config();
        let row_height = config.row_height();
        let header_style = TextStyle::new(config.font_size, config.palette.header_text).bold();
        let body_style = TextStyle::new(config.font_size, config.palette.text);
        let max_text_width = (self.column_width - config.cell_padding).max(0.0);

        ctx.tagged(StructRole::Table, Some(&spec.title), |ctx| {
            ctx.tagged(StructRole::TableRow, Some("Header Row"), |ctx| {
                self.draw_band(ctx, config.palette.accent)?;
                for (header, &x) in spec.headers.iter().zip(&self.columns) {
                    let title = format!("{} Column Header", header);
                    let text = truncate_to_width(header, &header_style, max_text_width);
                    ctx.tagged(StructRole::TableHeaderCell, Some(&title), |ctx| {
                        ctx.text_at(&text, x, &header_style, None)
                    })?;
                }
                ctx.advance_cursor(row_height);
                Ok(())
            })?;

            for (i, row) in spec.rows.iter().enumerate() {
                let row_title = format!("Row {}", i + 1);
                ctx.tagged(StructRole::TableRow, Some(&row_title), |ctx| {
                    if i % 2 == 0 {
                        self.draw_band(ctx, config.palette.band)?;
                    }
                    for ((cell, header), &x) in row.iter().zip(&spec.headers).zip(&self.columns) {
                        let title = format!("{} {} Column", row_title, header);
                        let text = truncate_to_width(cell.text(), &body_style, max_text_width);
                        ctx.tagged(StructRole::TableDataCell, Some(&title), |ctx| {
                            ctx.text_at(&text, x, &body_style, cell.href())
                        })?;
                    }
                    ctx.advance_cursor(row_height);
                    Ok(())
                })?;
            }
            Ok(())
        })
    }

    fn draw_band<S: DrawingSurface + ?Sized>(
        &self,
        ctx: &mut LayoutContext<'_, S>,
        color: Color,
    ) -> Result<(), LayoutError> {
        let config = ctx.config();
        let rect = Rect::new(
            config.margin_x - config.cell_padding,
            ctx.cursor_y() - config.line_gap / 2.0,
            config.content_width() + 2.0 * config.cell_padding,
            config.row_height(),
        );
        ctx.tagged(StructRole::Artifact(ArtifactKind::Layout), None, |ctx| {
            ctx.fill_rect(rect, color)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use transcript_render_core::utils::styled_width;
    use transcript_render_core::{DrawOp, RecordingSurface};

    fn spec(rows: usize) -> TableSpec {
        let headers = vec!["Skill".to_string(), "Points Earned".to_string(), "Total Points".to_string()];
        let rows = (0..rows)
            .map(|i| {
                vec![
                    CellValue::linked(format!("Skill {}", i + 1), format!("https://example.com/skills/{}", i)),
                    CellValue::from(10 * i as u64),
                    CellValue::from(1500u64),
                ]
            })
            .collect();
        TableSpec::new("Subject 1", headers).with_rows(rows)
    }

    fn draw(spec: &TableSpec) -> (RecordingSurface, f32) {
        let config = LayoutConfig::default();
        let mut surface = RecordingSurface::new(config.page_size());
        let end_y = {
            let mut ctx = LayoutContext::new(&mut surface, &config);
            ctx.start_page().unwrap();
            let builder = TableBuilder::new(&config, spec.headers.len()).unwrap();
            builder.draw(&mut ctx, spec).unwrap();
            ctx.cursor_y()
        };
        (surface, end_y)
    }

    #[test]
    fn columns_divide_content_width_evenly() {
        let config = LayoutConfig::default();
        let builder = TableBuilder::new(&config, 4).unwrap();
        assert_eq!(builder.column_width(), 128.0);
        assert_eq!(builder.column_offsets(), &[50.0, 178.0, 306.0, 434.0]);
        assert!(TableBuilder::new(&config, 0).is_err());
    }

    #[test]
    fn emits_tagged_rows_and_cells() {
        let (surface, _) = draw(&spec(3));
        assert_eq!(surface.count_tags(StructRole::Table), 1);
        assert_eq!(surface.count_tags(StructRole::TableRow), 4);
        assert_eq!(surface.count_tags(StructRole::TableHeaderCell), 3);
        assert_eq!(surface.count_tags(StructRole::TableDataCell), 9);
        assert!(surface.open_tags().is_empty());

        let titles: Vec<&str> = surface
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::BeginTag { title: Some(t), .. } => Some(t.as_str()),
                _ => None,
            })
            .collect();
        assert!(titles.contains(&"Header Row"));
        assert!(titles.contains(&"Skill Column Header"));
        assert!(titles.contains(&"Row 2 Points Earned Column"));
    }

    #[test]
    fn bands_header_and_even_rows_only() {
        let config = LayoutConfig::default();
        let (surface, _) = draw(&spec(4));
        let fills: Vec<Color> = surface
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        // header, row 0, row 2
        assert_eq!(
            fills,
            vec![config.palette.accent, config.palette.band, config.palette.band]
        );
        assert_eq!(
            surface.count_tags(StructRole::Artifact(ArtifactKind::Layout)),
            3
        );
    }

    #[test]
    fn cursor_advances_once_per_row() {
        let config = LayoutConfig::default();
        let (surface, end_y) = draw(&spec(5));
        assert_eq!(end_y, config.content_top + TableBuilder::table_height(&config, 5));

        // All cells of a row share the row's y.
        let row_ys: Vec<f32> = surface
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, origin, .. } if text.starts_with("Skill 2") || text == "10" => {
                    Some(origin.y)
                }
                _ => None,
            })
            .collect();
        assert_eq!(row_ys.len(), 2);
        assert_eq!(row_ys[0], row_ys[1]);
    }

    #[test]
    fn link_cells_carry_their_target() {
        let (surface, _) = draw(&spec(1));
        let link = surface.ops().iter().find_map(|op| match op {
            DrawOp::Text { text, link: Some(link), .. } if text == "Skill 1" => Some(link.clone()),
            _ => None,
        });
        assert_eq!(link.as_deref(), Some("https://example.com/skills/0"));
    }

    #[test]
    fn long_cells_are_truncated() {
        let headers = vec!["Badge".to_string(), "Date Achieved".to_string()];
        let long = "An extraordinarily long badge name that cannot possibly fit in half a page";
        let spec = TableSpec::new("Badges", headers).with_rows(vec![vec![long.into(), "".into()]]);
        let (surface, _) = draw(&spec);
        assert_eq!(surface.count_text(long), 0);
        assert_eq!(surface.count_text("An extraordinarily"), 1);
        assert!(surface.texts().any(|t| t.ends_with("...")));
    }

    #[test]
    fn wide_glyphs_stay_inside_their_column() {
        let config = LayoutConfig::default();
        let headers = vec!["WWWWWWWWWWWWWWWWWWWW".to_string(), "Points Earned".to_string(), "Total Points".to_string()];
        let wide = "M".repeat(25);
        let spec = TableSpec::new("Wide", headers)
            .with_rows(vec![vec![wide.as_str().into(), 5u64.into(), 10u64.into()]]);
        let (surface, _) = draw(&spec);
        let builder = TableBuilder::new(&config, 3).unwrap();
        let columns = builder.column_offsets();

        let mut checked = 0;
        for op in surface.ops() {
            let DrawOp::Text { text, origin, style, .. } = op else {
                continue;
            };
            let column = columns.iter().rposition(|&x| x <= origin.x).unwrap();
            let right_edge = origin.x + styled_width(text, style);
            let limit = columns
                .get(column + 1)
                .copied()
                .unwrap_or(config.margin_x + config.content_width());
            assert!(right_edge < limit, "{:?} ends at {} past {}", text, right_edge, limit);
            checked += 1;
        }
        assert_eq!(checked, 6);
        assert_eq!(surface.count_text(&wide), 0);
        assert!(surface.texts().any(|t| t.starts_with("MMM") && t.ends_with("...")));
    }

    #[test]
    fn mismatched_rows_are_rejected() {
        let spec = TableSpec::new("Broken", vec!["A".to_string(), "B".to_string()])
            .with_rows(vec![vec!["only one".into()]]);
        assert!(matches!(spec.validate(), Err(LayoutError::InvalidTable(_))));
    }
}
