use crate::config::ExportConfig;
use crate::error::ExportError;
use log::info;
use std::path::{Path, PathBuf};
use std::time::Instant;
use transcript_layout::{LayoutContext, TranscriptPaginator};
use transcript_render_core::DrawingSurface;
use transcript_render_lopdf::{DocumentInfo, LopdfSurface};
use transcript_source::{ProgressSource, TranscriptAggregator, TranscriptRequest};
use transcript_types::TranscriptModel;

/// `"{project} - {user} - Transcript.pdf"`, with path separators replaced.
pub fn transcript_file_name(project_name: &str, user_name: &str) -> String {
    let name = format!("{} - {} - Transcript.pdf", project_name, user_name);
    name.replace(['/', '\\'], "-")
}

/// A finished transcript document.
#[derive(Debug, Clone)]
pub struct TranscriptPdf {
    pub file_name: String,
    pub page_count: usize,
    pub bytes: Vec<u8>,
}

impl TranscriptPdf {
    /// Writes the PDF to `path`, or into `path` under `file_name` when it is a directory.
    pub async fn write_to(&self, path: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let path = path.as_ref();
        let target = if tokio::fs::metadata(path).await.is_ok_and(|m| m.is_dir()) {
            path.join(&self.file_name)
        } else {
            path.to_path_buf()
        };
        tokio::fs::write(&target, &self.bytes).await?;
        Ok(target)
    }
}

/// Runs the whole export: aggregate, lay out, render.
pub struct TranscriptExporter {
    config: ExportConfig,
}

impl TranscriptExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Fetches and normalizes the transcript model. Any failed fetch fails the export.
    pub async fn load<P: ProgressSource + ?Sized>(
        &self,
        source: &P,
        request: &TranscriptRequest,
    ) -> Result<TranscriptModel, ExportError> {
        let model = TranscriptAggregator::new(source)
            .with_labels(self.config.labels.clone())
            .load(request)
            .await?;
        Ok(model)
    }

    /// Lays `model` out onto `surface`.
    pub fn layout<S: DrawingSurface + ?Sized>(
        &self,
        model: &TranscriptModel,
        surface: &mut S,
    ) -> Result<(), ExportError> {
        let decoration = self.config.page_decoration()?;
        let mut ctx =
            LayoutContext::new(surface, &self.config.layout).with_page_decoration(decoration);
        TranscriptPaginator::new(model, self.config.document_options()).paginate(&mut ctx)?;
        Ok(())
    }

    /// Renders `model` into a tagged PDF.
    pub fn render(&self, model: &TranscriptModel) -> Result<TranscriptPdf, ExportError> {
        let start = Instant::now();
        let info = DocumentInfo {
            title: format!("{} - {}", self.config.title, model.project_name()),
            author: Some(model.user_name().to_string()),
            ..Default::default()
        };
        let mut surface = LopdfSurface::new(self.config.layout.page_size(), info);
        self.layout(model, &mut surface)?;
        let page_count = surface.page_count();
        let bytes = surface.finish_to_vec()?;

        info!(
            "[EXPORT] Rendered {} pages ({} bytes) in {:.2?}.",
            page_count,
            bytes.len(),
            start.elapsed()
        );
        Ok(TranscriptPdf {
            file_name: transcript_file_name(model.project_name(), model.user_name()),
            page_count,
            bytes,
        })
    }

    /// Loads the model from `source` and renders it.
    pub async fn export<P: ProgressSource + ?Sized>(
        &self,
        source: &P,
        request: &TranscriptRequest,
    ) -> Result<TranscriptPdf, ExportError> {
        let model = self.load(source, request).await?;
        self.render(&model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_combines_project_and_user() {
        assert_eq!(
            transcript_file_name("Has Subject and Skills", "Joe Doe (joe)"),
            "Has Subject and Skills - Joe Doe (joe) - Transcript.pdf"
        );
        assert_eq!(
            transcript_file_name("A/B", "c\\d"),
            "A-B - c-d - Transcript.pdf"
        );
    }
}
