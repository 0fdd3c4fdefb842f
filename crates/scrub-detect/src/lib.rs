//! PII detection over recognized text
//!
//! This crate contains:
//! - Pattern matchers for email, phone, IP and credit-card numbers
//! - The region mapper that projects text matches back onto the word
//!   bounding boxes the OCR collaborator produced
//!
//! Matches and regions are ephemeral: recomputed per detection pass and
//! never persisted.

pub mod patterns;
pub mod regions;

use serde::{Deserialize, Serialize};

use scrub_core::RedactReason;

pub use patterns::PiiDetector;
pub use regions::{joined_text, map_to_regions};

/// Category of personally identifiable information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PiiType {
    Email,
    Phone,
    Ip,
    CreditCard,
}

impl From<PiiType> for RedactReason {
    fn from(pii_type: PiiType) -> Self {
        match pii_type {
            PiiType::Email => RedactReason::Email,
            PiiType::Phone => RedactReason::Phone,
            PiiType::Ip => RedactReason::Ip,
            PiiType::CreditCard => RedactReason::CreditCard,
        }
    }
}

/// One pattern match inside the concatenated word string.
///
/// `start`/`end` are half-open byte offsets into the string formed by
/// joining word texts with single spaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiiMatch {
    pub pii_type: PiiType,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Axis-aligned bounding box of a recognized word, in image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WordBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

/// A word recognized by the external OCR engine. Read-only to this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrWord {
    pub text: String,
    pub bbox: WordBox,
    /// Recognition confidence on the OCR engine's 0-100 scale.
    pub confidence: f64,
}

/// A detected PII occurrence projected onto the image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiiRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub pii_type: PiiType,
    pub matched_text: String,
    /// Mean word confidence rescaled to 0.0-1.0.
    pub confidence: f64,
}
