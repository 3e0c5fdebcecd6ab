//! Transcript export for SkillTree projects.
//!
//! The export runs in three stages:
//! 1. `TranscriptAggregator` fetches the project, subject and badge summaries
//!    concurrently and normalizes them into a `TranscriptModel`.
//! 2. `TranscriptPaginator` lays the model out page by page through a
//!    `LayoutContext`, using the `TableBuilder` for every table chunk.
//! 3. `LopdfSurface` turns the drawing primitives into a tagged PDF.
//!
//! `TranscriptExporter` drives all three from an `ExportConfig`.

pub mod config;
pub mod error;
pub mod export;

pub use config::ExportConfig;
pub use error::ExportError;
pub use export::{TranscriptExporter, TranscriptPdf, transcript_file_name};

pub use transcript_layout::{
    CellValue, DocumentOptions, LayoutConfig, LayoutContext, LayoutError, TableBuilder, TableSpec,
    TranscriptPaginator,
};
pub use transcript_render_core::{DrawingSurface, RecordingSurface, RenderError, StructRole};
pub use transcript_render_lopdf::{DocumentInfo, LopdfSurface};
pub use transcript_source::{
    AggregateError, FixtureSource, ProgressSource, SourceError, TranscriptAggregator,
    TranscriptRequest, UserIdentity,
};
pub use transcript_types::{
    BadgeAchievement, LabelConfiguration, ProgressTotals, SkillProgress, SubjectProgress,
    TranscriptModel,
};
