use crate::error::AggregateError;
use crate::records::{BadgeSummary, ProjectSummary, SkillSummary, SubjectSummary};
use crate::{ProgressSource, TranscriptRequest};
use futures::future::try_join_all;
use log::{debug, info, warn};
use std::time::Instant;
use transcript_types::{
    BadgeAchievement, LabelConfiguration, ProgressTotals, SkillProgress, SubjectProgress,
    TranscriptModel,
};

/// The joined results of one export's fetches, one named slot per endpoint.
#[derive(Debug, Clone, Default)]
pub struct FetchedProgress {
    pub project_summary: ProjectSummary,
    pub subject_summaries: Vec<SubjectSummary>,
    pub badge_summaries: Vec<BadgeSummary>,
}

/// Issues the progress fetches for one user and project and builds the transcript model.
///
/// The project summary is fetched first because it lists the subjects. The
/// subject summaries and the badge summaries are then fetched concurrently and
/// joined: the first failure aborts the aggregation and drops every fetch still
/// in flight, so no partial model is ever produced.
pub struct TranscriptAggregator<'a, S: ProgressSource + ?Sized> {
    source: &'a S,
    labels: LabelConfiguration,
}

impl<'a, S: ProgressSource + ?Sized> TranscriptAggregator<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            labels: LabelConfiguration::default(),
        }
    }

    pub fn with_labels(mut self, labels: LabelConfiguration) -> Self {
        self.labels = labels;
        self
    }

    /// Runs every fetch and waits for all of them.
    pub async fn fetch(&self, request: &TranscriptRequest) -> Result<FetchedProgress, AggregateError> {
        let project_summary = self.source.project_summary(request).await?;

        let subject_ids: Vec<String> = project_summary
            .subjects
            .iter()
            .filter_map(|s| match s.subject_id.as_deref() {
                Some(id) if !id.is_empty() => Some(id.to_string()),
                _ => {
                    warn!(
                        "[AGGREGATOR] Subject '{}' has no identifier, skipping its summary fetch.",
                        s.subject
                    );
                    None
                }
            })
            .collect();

        debug!(
            "[AGGREGATOR] Fetching {} subject summaries and the badge summaries for project '{}'.",
            subject_ids.len(),
            request.project_id
        );

        let subject_fetches = try_join_all(
            subject_ids
                .iter()
                .map(|id| self.source.subject_summary(request, id, true)),
        );
        let badge_fetch = self.source.badge_summaries(request);
        let (subject_summaries, badge_summaries) = tokio::try_join!(subject_fetches, badge_fetch)?;

        Ok(FetchedProgress {
            project_summary,
            subject_summaries,
            badge_summaries,
        })
    }

    /// Fetches and normalizes the transcript model for `request`.
    pub async fn load(&self, request: &TranscriptRequest) -> Result<TranscriptModel, AggregateError> {
        let start = Instant::now();
        info!(
            "[AGGREGATOR] Loading transcript data for user '{}' in project '{}'.",
            request.user.user_id, request.project_id
        );

        let fetched = self.fetch(request).await?;
        let model = normalize(fetched, request.user.display_name(), self.labels.clone());

        info!(
            "[AGGREGATOR] Built transcript model with {} subjects, {} skills and {} badges in {:.2?}.",
            model.subjects().len(),
            model.total_skills(),
            model.achieved_badges().len(),
            start.elapsed()
        );
        Ok(model)
    }
}

/// Pure transform of the joined fetch results into the transcript model.
///
/// Subject responses without an identifier are dropped rather than failing the
/// export. Subject order follows the response order.
pub fn normalize(
    fetched: FetchedProgress,
    user_name: String,
    labels: LabelConfiguration,
) -> TranscriptModel {
    let FetchedProgress {
        project_summary,
        subject_summaries,
        badge_summaries,
    } = fetched;

    let requested = subject_summaries.len();
    let subjects: Vec<SubjectProgress> = subject_summaries
        .into_iter()
        .filter(SubjectSummary::is_well_formed)
        .map(subject_progress)
        .collect();
    if subjects.len() < requested {
        warn!(
            "[AGGREGATOR] Dropped {} malformed subject responses.",
            requested - subjects.len()
        );
    }

    let totals = ProgressTotals {
        user_level: project_summary.skills_level,
        total_levels: project_summary.total_levels,
        user_points: project_summary.points,
        total_points: project_summary.total_points,
    };

    TranscriptModel::new(
        user_name,
        project_summary.project_name,
        totals,
        labels,
        subjects,
        achieved_badges(badge_summaries),
    )
}

/// Keeps only the badges the user has earned, in source order.
pub fn achieved_badges(badges: impl IntoIterator<Item = BadgeSummary>) -> Vec<BadgeAchievement> {
    badges
        .into_iter()
        .filter(|b| b.badge_achieved)
        .map(|b| BadgeAchievement::new(b.badge, b.date_achieved))
        .collect()
}

fn subject_progress(summary: SubjectSummary) -> SubjectProgress {
    let totals = ProgressTotals {
        user_level: summary.skills_level,
        total_levels: summary.total_levels,
        user_points: summary.points,
        total_points: summary.total_points,
    };
    let skills = summary
        .skills
        .unwrap_or_default()
        .into_iter()
        .map(skill_progress)
        .collect();
    let subject = SubjectProgress::new(summary.subject, totals, skills);
    match summary.subject_id {
        Some(id) => subject.with_subject_id(id),
        None => subject,
    }
}

fn skill_progress(summary: SkillSummary) -> SkillProgress {
    if summary.points > summary.total_points {
        warn!(
            "[AGGREGATOR] Skill '{}' reports {} of {} points, clamping to the total.",
            summary.skill, summary.points, summary.total_points
        );
    }
    let skill = SkillProgress::new(summary.skill, summary.points, summary.total_points);
    match summary.skill_id {
        Some(id) => skill.with_skill_id(id),
        None => skill,
    }
}
