//! OCR collaborator boundary
//!
//! The engine consumes recognition results as a black box: words with
//! bounding boxes and a 0-100 confidence score. Implementations may be
//! slow; the scanner bounds them with a timeout.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use scrub_detect::OcrWord;

/// Opaque handle to the image under detection.
#[derive(Debug, Clone)]
pub enum ImageSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// What the OCR engine recognized in an image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecognizedText {
    pub words: Vec<OcrWord>,
}

/// External OCR engine contract. Must be invocable repeatedly; a failure
/// surfaces as "detection failed", never as zero PII.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, image: &ImageSource) -> anyhow::Result<RecognizedText>;
}

/// OCR engine backed by a pre-recorded recognition result. Used by the
/// CLI to run the pipeline over word dumps, and by tests.
#[derive(Debug, Clone)]
pub struct StaticOcr {
    recognized: RecognizedText,
}

impl StaticOcr {
    pub fn new(recognized: RecognizedText) -> Self {
        Self { recognized }
    }
}

#[async_trait]
impl OcrEngine for StaticOcr {
    async fn recognize(&self, _image: &ImageSource) -> anyhow::Result<RecognizedText> {
        Ok(self.recognized.clone())
    }
}

/// Load a recognition result from a JSON word dump
/// (`{"words": [{"text", "bbox": {"x0".."y1"}, "confidence"}, ..]}`).
pub fn load_word_dump(path: &Path) -> anyhow::Result<RecognizedText> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
