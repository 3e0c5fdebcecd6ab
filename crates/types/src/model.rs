//! The transcript model: one user's progress in one project, normalized from
//! the upstream summary records and immutable once built.
//!
//! Derived counters (completed/total skills) are computed by the constructors,
//! never supplied by callers, so they always agree with the skill lists.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display-name overrides for the four domain words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelConfiguration {
    pub subject: String,
    pub skill: String,
    pub level: String,
    pub badge: String,
}

impl Default for LabelConfiguration {
    fn default() -> Self {
        Self {
            subject: "Subject".to_string(),
            skill: "Skill".to_string(),
            level: "Level".to_string(),
            badge: "Badge".to_string(),
        }
    }
}

impl LabelConfiguration {
    /// Naive English plural used for counters such as "Skills: 1 / 3".
    pub fn plural(label: &str) -> String {
        format!("{}s", label)
    }
}

/// Level and point totals reported upstream for a project or a subject.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressTotals {
    pub user_level: u32,
    pub total_levels: u32,
    pub user_points: u64,
    pub total_points: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillProgress {
    name: String,
    skill_id: Option<String>,
    user_points: u64,
    total_points: u64,
}

impl SkillProgress {
    /// Creates a skill entry. Earned points above the total are clamped so that
    /// `user_points <= total_points` always holds.
    pub fn new(name: impl Into<String>, user_points: u64, total_points: u64) -> Self {
        Self {
            name: name.into(),
            skill_id: None,
            user_points: user_points.min(total_points),
            total_points,
        }
    }

    pub fn with_skill_id(mut self, skill_id: impl Into<String>) -> Self {
        self.skill_id = Some(skill_id.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn skill_id(&self) -> Option<&str> {
        self.skill_id.as_deref()
    }

    pub fn user_points(&self) -> u64 {
        self.user_points
    }

    pub fn total_points(&self) -> u64 {
        self.total_points
    }

    pub fn is_completed(&self) -> bool {
        self.user_points == self.total_points
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectProgress {
    name: String,
    subject_id: Option<String>,
    totals: ProgressTotals,
    user_skills_completed: usize,
    skills: Vec<SkillProgress>,
}

impl SubjectProgress {
    pub fn new(name: impl Into<String>, totals: ProgressTotals, skills: Vec<SkillProgress>) -> Self {
        let user_skills_completed = skills.iter().filter(|s| s.is_completed()).count();
        Self {
            name: name.into(),
            subject_id: None,
            totals,
            user_skills_completed,
            skills,
        }
    }

    pub fn with_subject_id(mut self, subject_id: impl Into<String>) -> Self {
        self.subject_id = Some(subject_id.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subject_id(&self) -> Option<&str> {
        self.subject_id.as_deref()
    }

    pub fn totals(&self) -> ProgressTotals {
        self.totals
    }

    pub fn user_level(&self) -> u32 {
        self.totals.user_level
    }

    pub fn total_levels(&self) -> u32 {
        self.totals.total_levels
    }

    pub fn user_points(&self) -> u64 {
        self.totals.user_points
    }

    pub fn total_points(&self) -> u64 {
        self.totals.total_points
    }

    pub fn user_skills_completed(&self) -> usize {
        self.user_skills_completed
    }

    pub fn total_skills(&self) -> usize {
        self.skills.len()
    }

    pub fn skills(&self) -> &[SkillProgress] {
        &self.skills
    }
}

/// A badge the user has earned. Unearned badges never enter the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeAchievement {
    pub name: String,
    pub date_achieved: Option<NaiveDate>,
}

impl BadgeAchievement {
    pub fn new(name: impl Into<String>, date_achieved: Option<NaiveDate>) -> Self {
        Self {
            name: name.into(),
            date_achieved,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptModel {
    user_name: String,
    project_name: String,
    totals: ProgressTotals,
    user_skills_completed: usize,
    total_skills: usize,
    labels_conf: LabelConfiguration,
    subjects: Vec<SubjectProgress>,
    achieved_badges: Vec<BadgeAchievement>,
}

impl TranscriptModel {
    pub fn new(
        user_name: impl Into<String>,
        project_name: impl Into<String>,
        totals: ProgressTotals,
        labels_conf: LabelConfiguration,
        subjects: Vec<SubjectProgress>,
        achieved_badges: Vec<BadgeAchievement>,
    ) -> Self {
        let user_skills_completed = subjects.iter().map(|s| s.user_skills_completed()).sum();
        let total_skills = subjects.iter().map(|s| s.total_skills()).sum();
        Self {
            user_name: user_name.into(),
            project_name: project_name.into(),
            totals,
            user_skills_completed,
            total_skills,
            labels_conf,
            subjects,
            achieved_badges,
        }
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn user_level(&self) -> u32 {
        self.totals.user_level
    }

    pub fn total_levels(&self) -> u32 {
        self.totals.total_levels
    }

    pub fn user_points(&self) -> u64 {
        self.totals.user_points
    }

    pub fn total_points(&self) -> u64 {
        self.totals.total_points
    }

    pub fn user_skills_completed(&self) -> usize {
        self.user_skills_completed
    }

    pub fn total_skills(&self) -> usize {
        self.total_skills
    }

    pub fn labels_conf(&self) -> &LabelConfiguration {
        &self.labels_conf
    }

    pub fn subjects(&self) -> &[SubjectProgress] {
        &self.subjects
    }

    pub fn achieved_badges(&self) -> &[BadgeAchievement] {
        &self.achieved_badges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(name: &str, points: &[(u64, u64)]) -> SubjectProgress {
        let skills = points
            .iter()
            .enumerate()
            .map(|(i, (earned, total))| SkillProgress::new(format!("Skill {}", i + 1), *earned, *total))
            .collect();
        SubjectProgress::new(name, ProgressTotals::default(), skills)
    }

    #[test]
    fn subject_counts_completed_skills() {
        let s = subject("Subject 1", &[(100, 100), (0, 100), (50, 100)]);
        assert_eq!(s.user_skills_completed(), 1);
        assert_eq!(s.total_skills(), 3);
    }

    #[test]
    fn skill_points_are_clamped_to_total() {
        let skill = SkillProgress::new("Overachiever", 150, 100);
        assert_eq!(skill.user_points(), 100);
        assert!(skill.is_completed());
    }

    #[test]
    fn model_totals_are_sums_over_subjects() {
        let model = TranscriptModel::new(
            "Joe Doe (joe)",
            "Project",
            ProgressTotals::default(),
            LabelConfiguration::default(),
            vec![
                subject("A", &[(10, 10), (0, 10)]),
                subject("B", &[]),
                subject("C", &[(5, 5), (5, 5), (1, 5)]),
            ],
            Vec::new(),
        );
        assert_eq!(model.total_skills(), 5);
        assert_eq!(model.user_skills_completed(), 3);
        assert_eq!(
            model.total_skills(),
            model.subjects().iter().map(|s| s.total_skills()).sum::<usize>()
        );
    }

    #[test]
    fn labels_deserialize_with_partial_overrides() {
        let labels: LabelConfiguration =
            serde_json::from_str(r#"{"subject": "Module", "skill": "Lesson"}"#).unwrap();
        assert_eq!(labels.subject, "Module");
        assert_eq!(labels.skill, "Lesson");
        assert_eq!(labels.level, "Level");
        assert_eq!(LabelConfiguration::plural(&labels.skill), "Lessons");
    }
}
