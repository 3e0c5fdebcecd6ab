//! Core rendering abstractions for transcript documents.
//!
//! This crate provides the fundamental traits and types used by drawing backends:
//! - `DrawingSurface` trait for abstracting the page-drawing primitives
//! - `StructRole` accessibility roles attached to tagged regions
//! - `RecordingSurface`, a headless surface that captures every primitive
//! - Helvetica glyph metrics, text measurement and truncation

mod error;
pub mod metrics;
pub mod recording;
mod traits;
mod types;
pub mod utils;

pub use error::RenderError;
pub use recording::{DrawOp, RecordingSurface};
pub use traits::DrawingSurface;
pub use types::{ArtifactKind, FontWeight, StructRole, TextStyle};
