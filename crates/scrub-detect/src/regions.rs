//! Region mapper
//!
//! Pattern matches carry offsets into a virtual string: the OCR words
//! joined with single spaces. This module aligns each match back to the
//! words it spans and computes the enclosing image-space box.

use tracing::debug;

use crate::{OcrWord, PiiMatch, PiiRegion};

/// The virtual string the matchers run over: word texts joined with single
/// spaces, in word order.
pub fn joined_text(words: &[OcrWord]) -> String {
    words
        .iter()
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Project matches onto image-space regions.
///
/// A word covers a match when their half-open ranges overlap strictly on
/// both ends. Matches covered by zero words are dropped silently: that is
/// expected noise from OCR tokenization drift, not a defect signal.
/// Output order follows input order.
pub fn map_to_regions(matches: &[PiiMatch], words: &[OcrWord]) -> Vec<PiiRegion> {
    let mut regions = Vec::new();

    for m in matches {
        let covering = covering_words(m.start, m.end, words);

        if covering.is_empty() {
            debug!(
                text = %m.text,
                start = m.start,
                "match has no covering words, dropping"
            );
            continue;
        }

        let x0 = covering.iter().map(|w| w.bbox.x0).fold(f64::INFINITY, f64::min);
        let y0 = covering.iter().map(|w| w.bbox.y0).fold(f64::INFINITY, f64::min);
        let x1 = covering.iter().map(|w| w.bbox.x1).fold(f64::NEG_INFINITY, f64::max);
        let y1 = covering.iter().map(|w| w.bbox.y1).fold(f64::NEG_INFINITY, f64::max);

        let mean_confidence =
            covering.iter().map(|w| w.confidence).sum::<f64>() / covering.len() as f64;

        regions.push(PiiRegion {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
            pii_type: m.pii_type,
            matched_text: m.text.clone(),
            // OCR confidence is 0-100, regions carry 0.0-1.0.
            confidence: mean_confidence / 100.0,
        });
    }

    regions
}

/// Words whose range in the joined string overlaps `[start, end)`.
///
/// The cursor advances by `len + 1` per word, modeling the single-space
/// join; scanning stops once the cursor has passed the match end.
fn covering_words(start: usize, end: usize, words: &[OcrWord]) -> Vec<&OcrWord> {
    let mut covering = Vec::new();
    let mut cursor = 0usize;

    for word in words {
        let word_start = cursor;
        let word_end = cursor + word.text.len();

        if word_end > start && word_start < end {
            covering.push(word);
        }

        cursor = word_end + 1;
        if cursor > end {
            break;
        }
    }

    covering
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PiiDetector, PiiType, WordBox};

    fn word(text: &str, x0: f64, y0: f64, x1: f64, y1: f64, confidence: f64) -> OcrWord {
        OcrWord {
            text: text.to_string(),
            bbox: WordBox { x0, y0, x1, y1 },
            confidence,
        }
    }

    #[test]
    fn test_joined_text() {
        let words = vec![
            word("Contact", 0.0, 0.0, 60.0, 10.0, 90.0),
            word("a@b.com", 65.0, 0.0, 120.0, 10.0, 85.0),
        ];
        assert_eq!(joined_text(&words), "Contact a@b.com");
    }

    #[test]
    fn test_single_word_exact_match() {
        let words = vec![word("a@b.com", 0.0, 0.0, 10.0, 10.0, 90.0)];
        let matches = vec![PiiMatch {
            pii_type: PiiType::Email,
            text: "a@b.com".into(),
            start: 0,
            end: 7,
        }];

        let regions = map_to_regions(&matches, &words);
        assert_eq!(regions.len(), 1);
        let r = &regions[0];
        assert_eq!((r.x, r.y, r.width, r.height), (0.0, 0.0, 10.0, 10.0));
        assert_eq!(r.confidence, 0.9);
        assert_eq!(r.matched_text, "a@b.com");
    }

    #[test]
    fn test_match_selects_only_covering_words() {
        let words = vec![
            word("Contact", 0.0, 0.0, 60.0, 10.0, 99.0),
            word("a@b.com", 65.0, 0.0, 120.0, 10.0, 80.0),
            word("today", 125.0, 0.0, 160.0, 10.0, 99.0),
        ];
        let text = joined_text(&words);
        let matches = PiiDetector::new().find_emails(&text);
        assert_eq!(matches.len(), 1);

        let regions = map_to_regions(&matches, &words);
        assert_eq!(regions.len(), 1);
        let r = &regions[0];
        // Only the middle word covers the match.
        assert_eq!((r.x, r.y), (65.0, 0.0));
        assert_eq!((r.width, r.height), (55.0, 10.0));
        assert_eq!(r.confidence, 0.8);
    }

    #[test]
    fn test_match_spanning_words_unions_boxes() {
        // A card number split into four words by the OCR tokenizer.
        let words = vec![
            word("4532", 10.0, 5.0, 40.0, 20.0, 80.0),
            word("0151", 45.0, 4.0, 75.0, 21.0, 90.0),
            word("1283", 80.0, 5.0, 110.0, 20.0, 70.0),
            word("0366", 115.0, 6.0, 145.0, 19.0, 100.0),
        ];
        let text = joined_text(&words);
        let matches = PiiDetector::new().find_credit_cards(&text);
        assert_eq!(matches.len(), 1);

        let regions = map_to_regions(&matches, &words);
        assert_eq!(regions.len(), 1);
        let r = &regions[0];
        assert_eq!((r.x, r.y), (10.0, 4.0));
        assert_eq!((r.width, r.height), (135.0, 17.0));
        assert_eq!(r.pii_type, PiiType::CreditCard);
        assert!((r.confidence - 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_misaligned_match_is_dropped() {
        let words = vec![word("short", 0.0, 0.0, 10.0, 10.0, 90.0)];
        let matches = vec![PiiMatch {
            pii_type: PiiType::Email,
            text: "ghost@example.com".into(),
            // Offsets beyond the joined text: tokenization drift.
            start: 40,
            end: 57,
        }];

        assert!(map_to_regions(&matches, &words).is_empty());
    }

    #[test]
    fn test_output_order_follows_input_order() {
        let words = vec![
            word("a@b.com", 0.0, 0.0, 10.0, 10.0, 90.0),
            word("10.0.0.1", 20.0, 0.0, 30.0, 10.0, 90.0),
        ];
        let text = joined_text(&words);
        let matches = PiiDetector::new().find_all(&text);
        assert_eq!(matches.len(), 2);

        let regions = map_to_regions(&matches, &words);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].pii_type, PiiType::Email);
        assert_eq!(regions[1].pii_type, PiiType::Ip);
    }
}
