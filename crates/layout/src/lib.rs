//! Layout for transcript documents.
//!
//! Everything here is synchronous and single-threaded: a `LayoutContext` owns
//! the page cursor for one export and is threaded by reference through the
//! `TranscriptPaginator` and the `TableBuilder`. Capacity math only uses the
//! declared metrics in `LayoutConfig`, never a live surface.

use thiserror::Error;
use transcript_render_core::RenderError;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Row block has a height of {0:.2} which exceeds the available page content height of {1:.2}.")]
    ElementTooLarge(f32, f32),
    #[error("Invalid table: {0}")]
    InvalidTable(String),
    #[error(transparent)]
    Render(#[from] RenderError),
}

pub mod algorithms;
pub mod config;
pub mod interface;
pub mod paginator;
pub mod table;
pub mod util;

pub use self::config::{LayoutConfig, Palette};
pub use self::interface::{LayoutContext, PageCursor};
pub use self::paginator::{DocumentOptions, TranscriptPaginator};
pub use self::table::{CellValue, TableBuilder, TableSpec};
