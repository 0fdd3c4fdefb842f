//! Detection orchestration for scrub
//!
//! Wires the OCR collaborator, the pattern library and the region mapper
//! into [`PiiScanner::detect`], and hands accepted redactions to the
//! annotation history. Every detection pass is independent and reentrant;
//! the history is single-writer.

pub mod ocr;

use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use scrub_annotate::synthesize_redactions;
use scrub_core::{Annotation, AnnotationHistory, Mint, RedactStyle};
use scrub_detect::{PiiDetector, PiiRegion, joined_text, map_to_regions};

pub use ocr::{ImageSource, OcrEngine, RecognizedText, StaticOcr, load_word_dump};

/// How long the scanner waits for the OCR collaborator before proceeding
/// without it.
pub const DEFAULT_OCR_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Error, Debug)]
pub enum ScanError {
    /// The OCR engine errored or was unavailable. Distinct from zero PII
    /// found; callers are expected to fall back to manual redaction.
    #[error("ocr engine failed: {0}")]
    Ocr(#[source] anyhow::Error),
}

/// Outcome of a detection pass. A timeout is not an error: the region
/// list is empty and `timed_out` is set, and manual redaction remains
/// available to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    pub regions: Vec<PiiRegion>,
    pub timed_out: bool,
}

/// Runs OCR-backed PII detection over images.
pub struct PiiScanner<O> {
    ocr: O,
    detector: PiiDetector,
    timeout: Duration,
}

impl<O: OcrEngine> PiiScanner<O> {
    pub fn new(ocr: O) -> Self {
        Self::with_timeout(ocr, DEFAULT_OCR_TIMEOUT)
    }

    pub fn with_timeout(ocr: O, timeout: Duration) -> Self {
        Self {
            ocr,
            detector: PiiDetector::new(),
            timeout,
        }
    }

    /// Detect PII regions in an image.
    ///
    /// The OCR call is bounded by the configured timeout; on expiry the
    /// scan completes with no regions and the `timed_out` flag instead of
    /// blocking.
    pub async fn detect(&self, image: &ImageSource) -> Result<Detection, ScanError> {
        let recognized = match tokio::time::timeout(self.timeout, self.ocr.recognize(image)).await
        {
            Err(_) => {
                warn!(timeout_ms = self.timeout.as_millis() as u64, "ocr timed out");
                return Ok(Detection {
                    regions: Vec::new(),
                    timed_out: true,
                });
            }
            Ok(Err(err)) => return Err(ScanError::Ocr(err)),
            Ok(Ok(recognized)) => recognized,
        };

        let text = joined_text(&recognized.words);
        let matches = self.detector.find_all(&text);
        debug!(
            words = recognized.words.len(),
            matches = matches.len(),
            "pattern pass complete"
        );

        let regions = map_to_regions(&matches, &recognized.words);
        info!(regions = regions.len(), "detection complete");

        Ok(Detection {
            regions,
            timed_out: false,
        })
    }
}

/// Commit accepted redactions to the history.
///
/// Synthesizes one `Redact` per selected region plus the manual list, then
/// records each as its own history entry (one undo step per annotation).
/// Returns the number of annotations added.
pub fn commit_redactions(
    history: &mut AnnotationHistory,
    regions: &[PiiRegion],
    selected: &HashSet<usize>,
    style: RedactStyle,
    manual: Vec<Annotation>,
    mint: &mut dyn Mint,
) -> usize {
    let redactions = synthesize_redactions(regions, selected, style, manual, mint);
    let count = redactions.len();

    for redaction in redactions {
        history.add(redaction);
    }
    info!(count, "committed redactions");
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrub_core::SequenceMint;
    use scrub_detect::{OcrWord, PiiType, WordBox};
    use time::macros::datetime;

    fn word(text: &str, x0: f64, confidence: f64) -> OcrWord {
        OcrWord {
            text: text.to_string(),
            bbox: WordBox {
                x0,
                y0: 0.0,
                x1: x0 + 50.0,
                y1: 12.0,
            },
            confidence,
        }
    }

    #[tokio::test]
    async fn test_detect_over_static_words() {
        let ocr = StaticOcr::new(RecognizedText {
            words: vec![
                word("Contact", 0.0, 95.0),
                word("john@example.com", 60.0, 88.0),
                word("or", 130.0, 95.0),
                word("192.168.1.1", 150.0, 91.0),
            ],
        });
        let scanner = PiiScanner::new(ocr);

        let detection = scanner
            .detect(&ImageSource::Bytes(Vec::new()))
            .await
            .unwrap();
        assert!(!detection.timed_out);
        assert_eq!(detection.regions.len(), 2);
        assert_eq!(detection.regions[0].pii_type, PiiType::Email);
        assert_eq!(detection.regions[1].pii_type, PiiType::Ip);
    }

    #[tokio::test]
    async fn test_detect_no_pii_is_empty_not_error() {
        let ocr = StaticOcr::new(RecognizedText {
            words: vec![word("nothing", 0.0, 95.0), word("here", 60.0, 95.0)],
        });
        let scanner = PiiScanner::new(ocr);

        let detection = scanner
            .detect(&ImageSource::Bytes(Vec::new()))
            .await
            .unwrap();
        assert!(!detection.timed_out);
        assert!(detection.regions.is_empty());
    }

    #[test]
    fn test_commit_redactions_individual_steps() {
        let mut mint = SequenceMint::new("red", datetime!(2026-01-01 00:00 UTC));
        let mut history = AnnotationHistory::new();
        let regions = vec![
            PiiRegion {
                x: 0.0,
                y: 0.0,
                width: 10.0,
                height: 10.0,
                pii_type: PiiType::Email,
                matched_text: "a@b.com".into(),
                confidence: 0.9,
            },
            PiiRegion {
                x: 20.0,
                y: 0.0,
                width: 10.0,
                height: 10.0,
                pii_type: PiiType::Phone,
                matched_text: "555-1234".into(),
                confidence: 0.8,
            },
        ];
        let selected: HashSet<usize> = [0, 1].into_iter().collect();

        let added = commit_redactions(
            &mut history,
            &regions,
            &selected,
            RedactStyle::Blur,
            vec![],
            &mut mint,
        );
        assert_eq!(added, 2);
        assert_eq!(history.len(), 2);

        // Each add is its own undo step.
        assert!(history.undo());
        assert_eq!(history.len(), 1);
        assert!(history.undo());
        assert!(history.is_empty());
    }
}
