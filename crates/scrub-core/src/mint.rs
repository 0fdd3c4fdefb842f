//! Identifier and timestamp provider
//!
//! Annotation creation needs a fresh id and a creation time. Both are
//! injected through the [`Mint`] trait instead of read from process-wide
//! state, so template application and redaction synthesis stay pure and
//! tests can pin exact values.

use time::OffsetDateTime;

/// Supplies identifiers and timestamps for newly created annotations.
pub trait Mint {
    fn next_id(&mut self) -> String;
    fn now(&self) -> OffsetDateTime;
}

/// Production mint: UUID v4 identifiers and the wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemMint;

impl Mint for SystemMint {
    fn next_id(&mut self) -> String {
        uuid::Uuid::new_v4().to_string()
    }

    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Deterministic mint: sequential ids and a fixed timestamp.
#[derive(Debug, Clone)]
pub struct SequenceMint {
    prefix: String,
    next: u64,
    at: OffsetDateTime,
}

impl SequenceMint {
    pub fn new(prefix: impl Into<String>, at: OffsetDateTime) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
            at,
        }
    }
}

impl Mint for SequenceMint {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }

    fn now(&self) -> OffsetDateTime {
        self.at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_sequence_mint_ids_are_distinct() {
        let mut mint = SequenceMint::new("ann", datetime!(2026-01-01 00:00 UTC));
        assert_eq!(mint.next_id(), "ann-1");
        assert_eq!(mint.next_id(), "ann-2");
        assert_eq!(mint.now(), datetime!(2026-01-01 00:00 UTC));
    }

    #[test]
    fn test_system_mint_ids_are_distinct() {
        let mut mint = SystemMint;
        assert_ne!(mint.next_id(), mint.next_id());
    }
}
