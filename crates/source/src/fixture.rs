use crate::error::SourceError;
use crate::records::{BadgeSummary, ProjectSummary, SubjectSummary};
use crate::{ProgressSource, TranscriptRequest};
use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FixtureDocument {
    project_summary: ProjectSummary,
    #[serde(default)]
    subject_summaries: HashMap<String, SubjectSummary>,
    #[serde(default)]
    badge_summaries: Vec<BadgeSummary>,
}

/// A `ProgressSource` serving records from a single JSON document:
///
/// ```json
/// {
///   "projectSummary": { "projectName": "...", "subjects": [...] },
///   "subjectSummaries": { "<subjectId>": { ... } },
///   "badgeSummaries": [ ... ]
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    document: FixtureDocument,
}

impl FixtureSource {
    pub fn from_json_str(json: &str) -> Result<Self, SourceError> {
        let document: FixtureDocument = serde_json::from_str(json)?;
        Ok(Self { document })
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, SourceError> {
        let document: FixtureDocument = serde_json::from_value(value)?;
        Ok(Self { document })
    }

    /// Reads and decodes the JSON document at `path`.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        debug!("[FIXTURE] Reading progress records from {}", path.display());
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json_str(&json)
    }
}

#[async_trait]
impl ProgressSource for FixtureSource {
    async fn project_summary(
        &self,
        _request: &TranscriptRequest,
    ) -> Result<ProjectSummary, SourceError> {
        Ok(self.document.project_summary.clone())
    }

    async fn subject_summary(
        &self,
        _request: &TranscriptRequest,
        subject_id: &str,
        include_skills: bool,
    ) -> Result<SubjectSummary, SourceError> {
        let mut summary = self
            .document
            .subject_summaries
            .get(subject_id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                endpoint: format!("subjects/{}/summary", subject_id),
            })?;
        if !include_skills {
            summary.skills = None;
        }
        Ok(summary)
    }

    async fn badge_summaries(
        &self,
        _request: &TranscriptRequest,
    ) -> Result<Vec<BadgeSummary>, SourceError> {
        Ok(self.document.badge_summaries.clone())
    }
}
