#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_assertions;

use lopdf::Document as LopdfDocument;
use serde_json::Value;
use skilltree_transcript::{
    DrawingSurface, ExportConfig, ExportError, FixtureSource, RecordingSurface, TranscriptExporter,
    TranscriptModel, TranscriptPdf,
};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated transcript with helper methods
pub struct GeneratedPdf {
    pub pdf: TranscriptPdf,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_pdf(pdf: TranscriptPdf) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&pdf.bytes)?;
        Ok(Self { pdf, doc })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text of a 1-based page.
    pub fn page_text(&self, page: u32) -> String {
        self.doc.extract_text(&[page]).unwrap_or_default()
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Aggregate a progress fixture into a model on a fresh runtime.
pub fn load_model(progress: Value, config: &ExportConfig) -> Result<TranscriptModel, ExportError> {
    let source = FixtureSource::from_value(progress)?;
    let exporter = TranscriptExporter::new(config.clone());
    tokio::runtime::Runtime::new()?
        .block_on(async { exporter.load(&source, &fixtures::request()).await })
}

/// Lay a progress fixture out onto a recording surface.
pub fn layout_recording(
    progress: Value,
    config: &ExportConfig,
) -> Result<RecordingSurface, ExportError> {
    let model = load_model(progress, config)?;
    let mut surface = RecordingSurface::new(config.layout.page_size());
    TranscriptExporter::new(config.clone()).layout(&model, &mut surface)?;
    assert!(surface.open_tags().is_empty(), "layout left tags open");
    assert_eq!(surface.pages().len(), surface.page_count());
    Ok(surface)
}

/// Run the whole export of a progress fixture into a PDF.
pub fn generate_pdf(
    progress: Value,
    config: ExportConfig,
) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let source = FixtureSource::from_value(progress)?;
    let exporter = TranscriptExporter::new(config);
    let pdf = tokio::runtime::Runtime::new()?
        .block_on(async { exporter.export(&source, &fixtures::request()).await })?;
    GeneratedPdf::from_pdf(pdf)
}
