//! Tagged PDF drawing surface using lopdf.
//!
//! `LopdfSurface` implements `DrawingSurface` by building the document object
//! graph in memory: one content stream per page, URI link annotations, and a
//! structure tree (StructTreeRoot, ParentTree, marked content) so the output is
//! navigable by assistive technology. Background bands and page furniture are
//! marked as artifacts.

mod helpers;
mod renderer;
mod structure;

pub use helpers::{pdf_date, text_string, to_win_ansi};
pub use renderer::{DocumentInfo, LopdfSurface};
