use thiserror::Error;
use transcript_layout::LayoutError;
use transcript_render_core::RenderError;
use transcript_source::{AggregateError, SourceError};

/// Any failure of a transcript export.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error("Failed to load progress data: {0}")]
    Source(#[from] SourceError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Invalid export configuration: {0}")]
    Config(String),

    #[error("Header/footer template failed: {0}")]
    Template(#[from] handlebars::RenderError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
