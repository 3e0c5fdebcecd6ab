use crate::error::ExportError;
use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::Path;
use transcript_layout::{DocumentOptions, LayoutConfig, paginator::DEFAULT_TITLE};
use transcript_types::LabelConfiguration;

pub const DEFAULT_COMMUNITY_DESCRIPTOR: &str = "All Users";

/// Everything an export needs besides the progress data itself.
///
/// Deserialized from JSON with camelCase keys; every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportConfig {
    pub title: String,
    /// Header and footer text template. `{{community.project.descriptor}}` is
    /// replaced by `community_descriptor`.
    pub export_header_and_footer: Option<String>,
    pub community_descriptor: String,
    pub labels: LabelConfiguration,
    pub skill_link_base_url: Option<String>,
    pub layout: LayoutConfig,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            export_header_and_footer: None,
            community_descriptor: DEFAULT_COMMUNITY_DESCRIPTOR.to_string(),
            labels: LabelConfiguration::default(),
            skill_link_base_url: None,
            layout: LayoutConfig::default(),
        }
    }
}

impl ExportConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ExportError> {
        let config: ExportConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ExportError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ExportError> {
        let layout = &self.layout;
        if layout.page_width <= 2.0 * layout.margin_x {
            return Err(ExportError::Config(format!(
                "page width {} leaves no room between margins of {}",
                layout.page_width, layout.margin_x
            )));
        }
        if layout.content_bottom <= layout.content_top || layout.content_bottom > layout.page_height {
            return Err(ExportError::Config(format!(
                "content area {}..{} does not fit a page of height {}",
                layout.content_top, layout.content_bottom, layout.page_height
            )));
        }
        if layout.row_height() <= 0.0 {
            return Err(ExportError::Config("row height must be positive".to_string()));
        }
        Ok(())
    }

    /// Renders the header/footer text, or `None` when no template is configured.
    pub fn page_decoration(&self) -> Result<Option<String>, ExportError> {
        let Some(template) = self
            .export_header_and_footer
            .as_deref()
            .filter(|t| !t.trim().is_empty())
        else {
            return Ok(None);
        };

        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        let data = json!({
            "community": { "project": { "descriptor": self.community_descriptor } }
        });
        let text = handlebars.render_template(template, &data)?;
        Ok(Some(text))
    }

    pub fn document_options(&self) -> DocumentOptions {
        DocumentOptions {
            title: self.title.clone(),
            skill_link_base_url: self.skill_link_base_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_keys() {
        let config = ExportConfig::from_json_str(r#"{"labels": {"skill": "Lesson"}}"#).unwrap();
        assert_eq!(config.title, "SkillTree TRANSCRIPT");
        assert_eq!(config.community_descriptor, "All Users");
        assert_eq!(config.labels.skill, "Lesson");
        assert_eq!(config.labels.subject, "Subject");
        assert_eq!(config.layout.row_height(), 19.0);
        assert_eq!(config.page_decoration().unwrap(), None);
    }

    #[test]
    fn header_template_substitutes_descriptor_without_escaping() {
        let config = ExportConfig::from_json_str(
            r#"{
                "exportHeaderAndFooter": "For {{community.project.descriptor}} Only",
                "communityDescriptor": "Divine Dragons & Friends"
            }"#,
        )
        .unwrap();
        assert_eq!(
            config.page_decoration().unwrap().as_deref(),
            Some("For Divine Dragons & Friends Only")
        );
    }

    #[test]
    fn blank_template_means_no_decoration() {
        let config = ExportConfig {
            export_header_and_footer: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.page_decoration().unwrap(), None);
    }

    #[test]
    fn impossible_layout_is_rejected() {
        let err = ExportConfig::from_json_str(r#"{"layout": {"contentTop": 800}}"#);
        assert!(matches!(err, Err(ExportError::Config(_))));
    }
}
