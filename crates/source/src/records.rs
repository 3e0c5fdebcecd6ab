//! Wire records returned by the progress endpoints, already deserialized.
//!
//! Field names follow the upstream JSON (camelCase). Optional identifiers are
//! kept optional here: well-formedness is decided by the aggregator, not by
//! deserialization.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::warn;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    #[serde(default)]
    pub subjects: Vec<ProjectSubject>,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub skills_level: u32,
    #[serde(default)]
    pub total_levels: u32,
    #[serde(default)]
    pub points: u64,
    #[serde(default)]
    pub total_points: u64,
}

/// A subject entry inside the project summary; only used to drive the per-subject fetches.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSubject {
    #[serde(default)]
    pub subject_id: Option<String>,
    #[serde(default)]
    pub subject: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectSummary {
    #[serde(default)]
    pub subject_id: Option<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub skills_level: u32,
    #[serde(default)]
    pub total_levels: u32,
    #[serde(default)]
    pub points: u64,
    #[serde(default)]
    pub total_points: u64,
    #[serde(default)]
    pub skills: Option<Vec<SkillSummary>>,
}

impl SubjectSummary {
    /// A subject response is usable only when it carries a non-empty identifier.
    pub fn is_well_formed(&self) -> bool {
        self.subject_id.as_deref().is_some_and(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillSummary {
    #[serde(default)]
    pub skill_id: Option<String>,
    #[serde(default)]
    pub skill: String,
    #[serde(default)]
    pub points: u64,
    #[serde(default)]
    pub total_points: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeSummary {
    #[serde(default)]
    pub badge_id: Option<String>,
    #[serde(default)]
    pub badge: String,
    #[serde(default)]
    pub badge_achieved: bool,
    #[serde(default, deserialize_with = "deserialize_achieved_date")]
    pub date_achieved: Option<NaiveDate>,
}

/// Unreadable dates are logged and read as `None`.
fn deserialize_achieved_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDate {
        Millis(i64),
        Text(String),
    }

    match Option::<RawDate>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawDate::Millis(ms)) => match DateTime::from_timestamp_millis(ms) {
            Some(dt) => Ok(Some(dt.date_naive())),
            None => {
                warn!("Ignoring badge date, timestamp out of range: {}", ms);
                Ok(None)
            }
        },
        Some(RawDate::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(RawDate::Text(text)) => match parse_date_text(&text) {
            Ok(date) => Ok(Some(date)),
            Err(e) => {
                warn!("Ignoring badge date: {}", e);
                Ok(None)
            }
        },
    }
}

/// Accepts RFC 3339 timestamps, offset-less ISO timestamps and plain `YYYY-MM-DD` dates.
pub fn parse_date_text(text: &str) -> Result<NaiveDate, String> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.date());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|e| format!("Unrecognized date '{}': {}", text, e))
}
