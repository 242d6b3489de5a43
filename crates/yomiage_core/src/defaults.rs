//! Synthetic default greeting provider.
//!
//! # Responsibility
//! - Produce the fixed set of built-in greeting records appended to
//!   every library read.
//!
//! # Invariants
//! - Pure and deterministic in content and order; no I/O, no state.
//! - Returned records carry `is_default == true` and are never persisted,
//!   never deleted, and never counted toward the quota.
//! - The set is the same regardless of the active language. This matches
//!   the shipped behavior; per-locale default sets would land here if the
//!   product ever localizes them.

use crate::model::text::{Language, TextRecord};
use uuid::Uuid;

/// Built-in greeting texts, in the order they appear at the tail of
/// every library listing.
const DEFAULT_GREETINGS: [&str; 10] = [
    "おはようございます",
    "こんにちは",
    "こんばんは",
    "おやすみなさい",
    "ありがとうございます",
    "はじめまして",
    "いらっしゃいませ",
    "お疲れ様でした",
    "いただきます",
    "ごちそうさまでした",
];

/// Number of synthetic greeting records.
pub const DEFAULT_TEXT_COUNT: usize = DEFAULT_GREETINGS.len();

/// Returns the fixed greeting set as fresh in-memory records.
///
/// Ids are regenerated per call and timestamps are cosmetic: defaults are
/// always appended after persisted records and never ordered against
/// them, so neither field participates in any contract beyond display.
pub fn default_texts() -> Vec<TextRecord> {
    DEFAULT_GREETINGS
        .iter()
        .map(|greeting| {
            let mut record = TextRecord::with_id(Uuid::new_v4(), *greeting, Language::Ja);
            record.is_default = true;
            record
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{default_texts, DEFAULT_GREETINGS, DEFAULT_TEXT_COUNT};

    #[test]
    fn default_set_is_fixed_and_ordered() {
        let records = default_texts();
        assert_eq!(records.len(), DEFAULT_TEXT_COUNT);
        for (record, greeting) in records.iter().zip(DEFAULT_GREETINGS) {
            assert_eq!(record.text, greeting);
            assert!(record.is_default);
        }
    }

    #[test]
    fn every_call_returns_the_same_texts_with_fresh_ids() {
        let first = default_texts();
        let second = default_texts();

        let first_texts: Vec<&str> = first.iter().map(|record| record.text.as_str()).collect();
        let second_texts: Vec<&str> = second.iter().map(|record| record.text.as_str()).collect();
        assert_eq!(first_texts, second_texts);

        for (a, b) in first.iter().zip(&second) {
            assert_ne!(a.id, b.id);
        }
    }
}
