//! Progress data sources for transcript export.
//!
//! This crate provides the `ProgressSource` trait, the wire records it yields,
//! and the `TranscriptAggregator` that fans out the per-export fetches and
//! normalizes their results into a `TranscriptModel`.
//!
//! ## Available Sources
//!
//! - `FixtureSource`: In-memory records loaded from a JSON document
//!
//! ## Example
//!
//! ```ignore
//! use transcript_source::{FixtureSource, TranscriptAggregator, TranscriptRequest, UserIdentity};
//!
//! let source = FixtureSource::load("progress.json").await?;
//! let request = TranscriptRequest::new("proj1", UserIdentity::new("joe").with_nickname("Joe Doe"));
//! let model = TranscriptAggregator::new(&source).load(&request).await?;
//! ```

mod aggregator;
mod error;
mod fixture;
pub mod records;

pub use aggregator::{FetchedProgress, TranscriptAggregator, achieved_badges, normalize};
pub use error::{AggregateError, SourceError};
pub use fixture::FixtureSource;
pub use records::{BadgeSummary, ProjectSubject, ProjectSummary, SkillSummary, SubjectSummary};

use async_trait::async_trait;

/// The user a transcript is exported for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub user_id: String,
    pub nickname: Option<String>,
    pub user_id_for_display: Option<String>,
}

impl UserIdentity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            nickname: None,
            user_id_for_display: None,
        }
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn with_display_id(mut self, user_id_for_display: impl Into<String>) -> Self {
        self.user_id_for_display = Some(user_id_for_display.into());
        self
    }

    /// `"{nickname} ({display id})"`, or just the display id when no nickname is known.
    pub fn display_name(&self) -> String {
        let display_id = self
            .user_id_for_display
            .as_deref()
            .unwrap_or(&self.user_id);
        match self.nickname.as_deref().filter(|n| !n.trim().is_empty()) {
            Some(nickname) => format!("{} ({})", nickname, display_id),
            None => display_id.to_string(),
        }
    }
}

/// Identifies one export: a user within a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptRequest {
    pub project_id: String,
    pub user: UserIdentity,
}

impl TranscriptRequest {
    pub fn new(project_id: impl Into<String>, user: UserIdentity) -> Self {
        Self {
            project_id: project_id.into(),
            user,
        }
    }
}

/// A provider of already-computed progress records.
///
/// Implementations wrap whatever transport the host application uses; timeouts
/// and retries belong to that transport, not to the aggregator.
#[async_trait]
pub trait ProgressSource: Send + Sync {
    async fn project_summary(&self, request: &TranscriptRequest)
    -> Result<ProjectSummary, SourceError>;

    async fn subject_summary(
        &self,
        request: &TranscriptRequest,
        subject_id: &str,
        include_skills: bool,
    ) -> Result<SubjectSummary, SourceError>;

    async fn badge_summaries(
        &self,
        request: &TranscriptRequest,
    ) -> Result<Vec<BadgeSummary>, SourceError>;
}
