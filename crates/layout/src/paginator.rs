//! Walks a `TranscriptModel` once and lays it out page by page: the cover page,
//! one section per subject with skills, then the earned badges.

use crate::LayoutError;
use crate::algorithms::pagination::plan_chunks;
use crate::config::LayoutConfig;
use crate::interface::LayoutContext;
use crate::table::{CellValue, TableBuilder, TableSpec};
use crate::util::{format_count, format_date, progress_line};
use log::{debug, info};
use std::num::NonZeroUsize;
use transcript_render_core::{DrawingSurface, RecordingSurface, StructRole, TextStyle};
use transcript_types::{LabelConfiguration, SubjectProgress, TranscriptModel};

pub const DEFAULT_TITLE: &str = "SkillTree TRANSCRIPT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOptions {
    /// Drawn at the top of the cover page.
    pub title: String,
    /// When set, skill names link to `{base}/subjects/{subjectId}/skills/{skillId}`.
    pub skill_link_base_url: Option<String>,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            skill_link_base_url: None,
        }
    }
}

/// A section heading block, redrawn on every page the section spans.
struct SectionHeading {
    title: String,
    summary: String,
}

pub struct TranscriptPaginator<'m> {
    model: &'m TranscriptModel,
    options: DocumentOptions,
}

impl<'m> TranscriptPaginator<'m> {
    pub fn new(model: &'m TranscriptModel, options: DocumentOptions) -> Self {
        Self { model, options }
    }

    /// Emits the whole document onto the context's surface.
    pub fn paginate<S: DrawingSurface + ?Sized>(
        &self,
        ctx: &mut LayoutContext<'_, S>,
    ) -> Result<(), LayoutError> {
        let title = self.options.title.clone();
        ctx.tagged(StructRole::Document, Some(&title), |ctx| {
            self.cover_page(ctx)?;
            for subject in self.model.subjects() {
                self.subject_section(ctx, subject)?;
            }
            self.badge_section(ctx)
        })?;

        info!(
            "[PAGINATOR] Laid out transcript for '{}' on {} pages.",
            self.model.user_name(),
            ctx.page_count()
        );
        Ok(())
    }

    /// Dry run on a recording surface, returning the number of pages the document needs.
    pub fn page_count(&self, config: &LayoutConfig) -> Result<usize, LayoutError> {
        let mut surface = RecordingSurface::new(config.page_size());
        let mut ctx = LayoutContext::new(&mut surface, config);
        self.paginate(&mut ctx)?;
        Ok(ctx.page_count())
    }

    fn cover_page<S: DrawingSurface + ?Sized>(
        &self,
        ctx: &mut LayoutContext<'_, S>,
    ) -> Result<(), LayoutError> {
        let model = self.model;
        let labels = model.labels_conf();
        let config = ctx.config();
        let x = config.margin_x;
        let line = config.row_height();
        let body = TextStyle::new(config.font_size, config.palette.text);
        let name_style = TextStyle::new(config.heading_font_size, config.palette.text).bold();
        let title_style = TextStyle::new(config.title_font_size, config.palette.accent).bold();

        ctx.start_page()?;
        ctx.tagged(StructRole::Section, Some(model.project_name()), |ctx| {
            ctx.tagged(StructRole::Heading(1), None, |ctx| {
                ctx.text_line(&self.options.title, x, &title_style, config.title_font_size * 2.0)
            })?;
            for text in [model.user_name(), model.project_name()] {
                ctx.tagged(StructRole::Paragraph, None, |ctx| {
                    ctx.text_line(text, x, &name_style, config.heading_height)
                })?;
            }
            ctx.advance_cursor(config.section_spacing);

            let mut counters = vec![
                progress_line(
                    &labels.level,
                    model.user_level() as u64,
                    model.total_levels() as u64,
                ),
                progress_line("Points", model.user_points(), model.total_points()),
                progress_line(
                    &LabelConfiguration::plural(&labels.skill),
                    model.user_skills_completed() as u64,
                    model.total_skills() as u64,
                ),
            ];
            if !model.achieved_badges().is_empty() {
                counters.push(format!(
                    "{}: {}",
                    LabelConfiguration::plural(&labels.badge),
                    format_count(model.achieved_badges().len() as u64)
                ));
            }
            for counter in &counters {
                ctx.tagged(StructRole::Paragraph, None, |ctx| {
                    ctx.text_line(counter, x, &body, line)
                })?;
            }
            Ok(())
        })
    }

    fn subject_section<S: DrawingSurface + ?Sized>(
        &self,
        ctx: &mut LayoutContext<'_, S>,
        subject: &SubjectProgress,
    ) -> Result<(), LayoutError> {
        let labels = self.model.labels_conf();
        if subject.skills().is_empty() {
            debug!(
                "[PAGINATOR] {} '{}' has no {}, skipping.",
                labels.subject,
                subject.name(),
                LabelConfiguration::plural(&labels.skill)
            );
            return Ok(());
        }

        let heading = SectionHeading {
            title: format!("{}: {}", labels.subject, subject.name()).to_uppercase(),
            summary: [
                progress_line(
                    &labels.level,
                    subject.user_level() as u64,
                    subject.total_levels() as u64,
                ),
                progress_line("Points", subject.user_points(), subject.total_points()),
                progress_line(
                    &LabelConfiguration::plural(&labels.skill),
                    subject.user_skills_completed() as u64,
                    subject.total_skills() as u64,
                ),
            ]
            .join("   "),
        };
        let headers = vec![
            labels.skill.clone(),
            "Points Earned".to_string(),
            "Total Points".to_string(),
        ];
        let rows = subject
            .skills()
            .iter()
            .map(|skill| {
                let name = match self.skill_link(subject.subject_id(), skill.skill_id()) {
                    Some(link) => CellValue::linked(skill.name(), link),
                    None => CellValue::from(skill.name()),
                };
                vec![
                    name,
                    CellValue::from(skill.user_points()),
                    CellValue::from(skill.total_points()),
                ]
            })
            .collect();

        self.section(ctx, &heading, subject.name(), headers, rows)
    }

    fn badge_section<S: DrawingSurface + ?Sized>(
        &self,
        ctx: &mut LayoutContext<'_, S>,
    ) -> Result<(), LayoutError> {
        let badges = self.model.achieved_badges();
        if badges.is_empty() {
            return Ok(());
        }
        let labels = self.model.labels_conf();
        let plural = LabelConfiguration::plural(&labels.badge);
        let heading = SectionHeading {
            title: format!("Earned {}", plural).to_uppercase(),
            summary: format!("{}: {}", plural, format_count(badges.len() as u64)),
        };
        let headers = vec![labels.badge.clone(), "Date Achieved".to_string()];
        let rows = badges
            .iter()
            .map(|badge| {
                vec![
                    CellValue::from(badge.name.as_str()),
                    CellValue::from(format_date(badge.date_achieved)),
                ]
            })
            .collect();

        self.section(ctx, &heading, &format!("Earned {}", plural), headers, rows)
    }

    /// Lays out one section starting on a fresh page, continuing onto as many
    /// pages as its rows need and repeating the heading block on each of them.
    fn section<S: DrawingSurface + ?Sized>(
        &self,
        ctx: &mut LayoutContext<'_, S>,
        heading: &SectionHeading,
        table_title: &str,
        headers: Vec<String>,
        rows: Vec<Vec<CellValue>>,
    ) -> Result<(), LayoutError> {
        let config = ctx.config();
        let builder = TableBuilder::new(config, headers.len())?;
        let needed = config.heading_block_height() + TableBuilder::table_height(config, 1);
        let too_large = || LayoutError::ElementTooLarge(needed, config.content_height());
        let rest = NonZeroUsize::new(config.section_capacity()).ok_or_else(too_large)?;

        ctx.tagged(StructRole::Section, Some(&heading.title), |ctx| {
            ctx.start_page()?;
            self.heading_block(ctx, heading)?;
            let first = NonZeroUsize::new(ctx.row_capacity()).ok_or_else(too_large)?;
            let chunks = plan_chunks(rows.len(), first, rest);
            debug!(
                "[PAGINATOR] Section '{}': {} rows, capacity {} per page, {} pages.",
                heading.title,
                rows.len(),
                rest,
                chunks.len()
            );

            for (n, range) in chunks.into_iter().enumerate() {
                if n > 0 {
                    ctx.start_page()?;
                    self.heading_block(ctx, heading)?;
                }
                let spec = TableSpec::new(table_title, headers.clone()).with_rows(rows[range].to_vec());
                builder.draw(ctx, &spec)?;
            }
            Ok(())
        })
    }

    fn heading_block<S: DrawingSurface + ?Sized>(
        &self,
        ctx: &mut LayoutContext<'_, S>,
        heading: &SectionHeading,
    ) -> Result<(), LayoutError> {
        let config = ctx.config();
        let x = config.margin_x;
        let heading_style = TextStyle::new(config.heading_font_size, config.palette.accent).bold();
        let body = TextStyle::new(config.font_size, config.palette.text);

        ctx.tagged(StructRole::Heading(2), None, |ctx| {
            ctx.text_line(&heading.title, x, &heading_style, config.heading_height)
        })?;
        ctx.tagged(StructRole::Paragraph, None, |ctx| {
            ctx.text_line(&heading.summary, x, &body, config.row_height())
        })?;
        ctx.advance_cursor(config.section_spacing);
        Ok(())
    }

    fn skill_link(&self, subject_id: Option<&str>, skill_id: Option<&str>) -> Option<String> {
        let base = self.options.skill_link_base_url.as_deref()?;
        Some(format!(
            "{}/subjects/{}/skills/{}",
            base.trim_end_matches('/'),
            subject_id?,
            skill_id?
        ))
    }
}
