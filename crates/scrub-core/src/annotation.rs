//! Annotation data model
//!
//! An annotation is one of five shape variants plus shared metadata (id,
//! color, stroke thickness, creation time). The variant tag is fixed at
//! creation: updates merge fields within the same variant only.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::geometry::Point;
use crate::mint::Mint;

/// Visual treatment applied to a redacted region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedactStyle {
    Blur,
    Pixelate,
    Blackbox,
}

/// Why a region was redacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedactReason {
    Email,
    Phone,
    Ip,
    CreditCard,
    Manual,
}

/// Geometry payload of an annotation, tagged by shape kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Arrow {
        start: Point,
        end: Point,
    },
    /// Origin is top-left; width/height are ≥ 0 after normalization.
    Rectangle {
        origin: Point,
        width: f64,
        height: f64,
    },
    Text {
        position: Point,
        text: String,
        font_size: f64,
    },
    /// At least one point while drafting; fewer than 2 is not renderable.
    Freehand {
        points: Vec<Point>,
    },
    Redact {
        origin: Point,
        width: f64,
        height: f64,
        style: RedactStyle,
        reason: RedactReason,
    },
}

impl Shape {
    /// Stable name of the shape variant (the serde tag).
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Arrow { .. } => "arrow",
            Shape::Rectangle { .. } => "rectangle",
            Shape::Text { .. } => "text",
            Shape::Freehand { .. } => "freehand",
            Shape::Redact { .. } => "redact",
        }
    }

    /// Whether two shapes carry the same variant tag.
    pub fn same_kind(&self, other: &Shape) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// A single finalized annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: String,
    /// Hex color, e.g. `#FF0000`.
    pub color: String,
    /// Stroke width in pixels (1-8); 0 for filled redactions.
    pub thickness: u8,
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
    #[serde(flatten)]
    pub shape: Shape,
}

impl Annotation {
    /// Create an annotation, drawing id and timestamp from the mint.
    pub fn new(mint: &mut dyn Mint, color: impl Into<String>, thickness: u8, shape: Shape) -> Self {
        Self {
            id: mint.next_id(),
            color: color.into(),
            thickness,
            created_at: mint.now(),
            shape,
        }
    }
}

/// Partial update for an annotation.
///
/// A `shape` patch must carry the same variant as the stored annotation;
/// the history rejects variant changes.
#[derive(Debug, Clone, Default)]
pub struct AnnotationPatch {
    pub color: Option<String>,
    pub thickness: Option<u8>,
    pub shape: Option<Shape>,
}

impl AnnotationPatch {
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn thickness(mut self, thickness: u8) -> Self {
        self.thickness = Some(thickness);
        self
    }

    pub fn shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }
}
