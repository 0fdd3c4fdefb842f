//! PII pattern matchers
//!
//! Stateless, reentrant matchers over plain text. Each returns matches in
//! left-to-right scan order; [`PiiDetector::find_all`] unions the four
//! categories sorted by start offset without cross-category dedup (an
//! overlapping phone/credit-card pair can both appear).

use regex::Regex;
use tracing::debug;

use crate::{PiiMatch, PiiType};

const EMAIL_PATTERN: &str = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}";

// US/Canada: (555) 123-4567, 555-123-4567, +1-555-123-4567
const PHONE_NANP_PATTERN: &str = r"(\+?1[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}";
// Short form: 555-1234
const PHONE_SHORT_PATTERN: &str = r"\d{3}[-.\s]\d{4}";

// Coarse dotted-quad shape; admits octets up to 999, so every candidate is
// re-validated against the 0-255 range below.
const IPV4_PATTERN: &str = r"\b(?:\d{1,3}\.){3}\d{1,3}\b";

// Full 8-group form, a form ending in a bare `::`, and the `::`-compressed
// form. No further semantic validation.
const IPV6_PATTERN: &str = r"\b(?:[0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}\b|\b(?:[0-9a-fA-F]{1,4}:){1,7}:\b|\b::(?:[0-9a-fA-F]{1,4}:){0,6}[0-9a-fA-F]{1,4}\b";

// 4-4-4-4 digit groups with optional space/dash separators and an optional
// trailing 3-digit group; checksum-validated afterwards.
const CREDIT_CARD_PATTERN: &str = r"\b\d{4}[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{4}(?:[-\s]?\d{3})?\b";

// Digit runs that look like phone numbers but never are.
const SEQUENTIAL_RUNS: [&str; 3] = ["0123456789", "1234567890", "9876543210"];

/// Compiled pattern set. Construction compiles the regexes once; every
/// matcher takes `&self` and holds no per-call state.
pub struct PiiDetector {
    email: Regex,
    phone_nanp: Regex,
    phone_short: Regex,
    ipv4: Regex,
    ipv6: Regex,
    credit_card: Regex,
}

impl PiiDetector {
    pub fn new() -> Self {
        Self {
            email: Regex::new(EMAIL_PATTERN).unwrap(),
            phone_nanp: Regex::new(PHONE_NANP_PATTERN).unwrap(),
            phone_short: Regex::new(PHONE_SHORT_PATTERN).unwrap(),
            ipv4: Regex::new(IPV4_PATTERN).unwrap(),
            ipv6: Regex::new(IPV6_PATTERN).unwrap(),
            credit_card: Regex::new(CREDIT_CARD_PATTERN).unwrap(),
        }
    }

    /// Find all email addresses in text.
    pub fn find_emails(&self, text: &str) -> Vec<PiiMatch> {
        self.email
            .find_iter(text)
            .map(|m| pii_match(PiiType::Email, m))
            .collect()
    }

    /// Find all phone numbers in text.
    ///
    /// Candidates whose digit string is a sequential run are rejected as
    /// false positives; overlap between the two sub-patterns is resolved
    /// by the greedy leftmost-interval rule.
    pub fn find_phones(&self, text: &str) -> Vec<PiiMatch> {
        let mut matches = Vec::new();

        for pattern in [&self.phone_nanp, &self.phone_short] {
            for m in pattern.find_iter(text) {
                let digits: String = m.as_str().chars().filter(|c| c.is_ascii_digit()).collect();
                if SEQUENTIAL_RUNS.contains(&digits.as_str()) {
                    debug!(candidate = m.as_str(), "rejected sequential phone candidate");
                    continue;
                }
                matches.push(pii_match(PiiType::Phone, m));
            }
        }

        dedup_overlapping(matches)
    }

    /// Find all IP addresses in text (IPv4 and IPv6).
    pub fn find_ip_addresses(&self, text: &str) -> Vec<PiiMatch> {
        let mut matches = Vec::new();

        for m in self.ipv4.find_iter(text) {
            // The coarse regex admits 256-999 octets; the range check is
            // mandatory, not defensive.
            let valid = m
                .as_str()
                .split('.')
                .all(|octet| octet.parse::<u16>().is_ok_and(|n| n <= 255));
            if valid {
                matches.push(pii_match(PiiType::Ip, m));
            } else {
                debug!(candidate = m.as_str(), "rejected out-of-range ipv4 candidate");
            }
        }

        for m in self.ipv6.find_iter(text) {
            matches.push(pii_match(PiiType::Ip, m));
        }

        matches
    }

    /// Find all credit-card numbers in text that pass the Luhn checksum.
    pub fn find_credit_cards(&self, text: &str) -> Vec<PiiMatch> {
        self.credit_card
            .find_iter(text)
            .filter(|m| luhn_valid(m.as_str()))
            .map(|m| pii_match(PiiType::CreditCard, m))
            .collect()
    }

    /// Union of all four detectors, sorted ascending by start offset.
    pub fn find_all(&self, text: &str) -> Vec<PiiMatch> {
        let mut matches = self.find_emails(text);
        matches.extend(self.find_phones(text));
        matches.extend(self.find_ip_addresses(text));
        matches.extend(self.find_credit_cards(text));
        matches.sort_by_key(|m| m.start);
        matches
    }
}

impl Default for PiiDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn pii_match(pii_type: PiiType, m: regex::Match<'_>) -> PiiMatch {
    PiiMatch {
        pii_type,
        text: m.as_str().to_string(),
        start: m.start(),
        end: m.end(),
    }
}

/// Greedy leftmost-interval selection: sort by start offset, keep a match
/// only if it starts at or after the end of the most recently kept one.
pub fn dedup_overlapping(mut matches: Vec<PiiMatch>) -> Vec<PiiMatch> {
    matches.sort_by_key(|m| m.start);

    let mut kept: Vec<PiiMatch> = Vec::new();
    for m in matches {
        match kept.last() {
            Some(last) if m.start < last.end => {}
            _ => kept.push(m),
        }
    }
    kept
}

/// Luhn checksum over the digits of `text`.
///
/// From the rightmost digit moving left, every second digit is doubled
/// (minus 9 when the double exceeds 9); the digit sum must be divisible by
/// 10. Digit strings shorter than 13 or longer than 19 fail outright.
pub fn luhn_valid(text: &str) -> bool {
    let digits: Vec<u32> = text.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() < 13 || digits.len() > 19 {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}
