pub mod color;
pub mod geometry;
pub mod model;

pub use color::Color;
pub use geometry::{Point, Rect, Size};
pub use model::{
    BadgeAchievement, LabelConfiguration, ProgressTotals, SkillProgress, SubjectProgress,
    TranscriptModel,
};
