//! Core domain models for scrub
//!
//! This crate contains:
//! - Annotation data model (tagged shape variants)
//! - Versioned annotation history with bounded undo/redo
//! - Geometry utilities (rectangle normalization)
//! - Identifier/timestamp provider for annotation creation

pub mod annotation;
pub mod error;
pub mod geometry;
pub mod history;
pub mod mint;

pub use annotation::{Annotation, AnnotationPatch, RedactReason, RedactStyle, Shape};
pub use error::{Error, Result};
pub use geometry::{NormalizedRect, Point, normalize_rect_bounds};
pub use history::AnnotationHistory;
pub use mint::{Mint, SequenceMint, SystemMint};
