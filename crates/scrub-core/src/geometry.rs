//! Geometry utilities
//!
//! Rectangles arrive from drag gestures, which produce negative width or
//! height when the pointer moves up/left of the anchor point.

use serde::{Deserialize, Serialize};

/// A 2D point in image-pixel space, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A rectangle with non-negative width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRect {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl NormalizedRect {
    /// Check whether a point lies inside the rectangle (edges inclusive).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x <= self.origin.x + self.width
            && point.y >= self.origin.y
            && point.y <= self.origin.y + self.height
    }
}

/// Normalize a signed rectangle into origin-at-top-left form.
///
/// Negative width shifts the origin left by its magnitude, symmetric for
/// height. The occupied area is unchanged. Idempotent.
pub fn normalize_rect_bounds(origin: Point, width: f64, height: f64) -> NormalizedRect {
    NormalizedRect {
        origin: Point {
            x: if width < 0.0 { origin.x + width } else { origin.x },
            y: if height < 0.0 { origin.y + height } else { origin.y },
        },
        width: width.abs(),
        height: height.abs(),
    }
}
