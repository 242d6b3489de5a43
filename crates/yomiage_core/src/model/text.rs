//! Text record domain model.
//!
//! # Responsibility
//! - Define the canonical record for user-authored speech texts.
//! - Define the supported language partitions.
//! - Provide validation used by every write path.
//!
//! # Invariants
//! - `id` is stable and never reused for another record.
//! - `created_at` is immutable after creation; `updated_at` moves on
//!   every content mutation.
//! - `is_default == true` only for synthetic records built in memory;
//!   persisted rows always read back as `is_default == false`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for every persisted or synthetic text record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type RecordId = Uuid;

/// Language partition key for stored texts.
///
/// The set is closed on purpose: the synthesis engine only ships voices
/// for these locales, so an open-ended string column would let rows in
/// that no consumer can speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    En,
    Ja,
    Zh,
    Ko,
    Es,
    Fr,
    De,
}

impl Language {
    /// Returns the stable lowercase code persisted in storage.
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ja => "ja",
            Self::Zh => "zh",
            Self::Ko => "ko",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::De => "de",
        }
    }

    /// Parses a persisted language code back into the enum.
    ///
    /// Returns `None` for unknown codes so read paths can reject corrupt
    /// rows instead of masking them.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "en" => Some(Self::En),
            "ja" => Some(Self::Ja),
            "zh" => Some(Self::Zh),
            "ko" => Some(Self::Ko),
            "es" => Some(Self::Es),
            "fr" => Some(Self::Fr),
            "de" => Some(Self::De),
            _ => None,
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Validation error for text record content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextValidationError {
    /// Content is empty or whitespace-only.
    EmptyText,
}

impl Display for TextValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "text content must not be empty"),
        }
    }
}

impl Error for TextValidationError {}

/// Canonical record for one unit of speech text.
///
/// Persisted rows and synthetic default entries share this shape; the
/// `is_default` flag is attached at merge time and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRecord {
    /// Stable global ID used for deletion, editing and auditing.
    pub id: RecordId,
    /// Raw text handed to the synthesis engine.
    pub text: String,
    /// Partition key for language-scoped queries.
    pub language: Language,
    /// Unix epoch milliseconds, immutable after creation.
    pub created_at: i64,
    /// Unix epoch milliseconds, refreshed on content mutation.
    pub updated_at: i64,
    /// True only for in-memory synthetic greeting entries.
    pub is_default: bool,
}

impl TextRecord {
    /// Creates a new user-authored record with a generated stable ID and
    /// both timestamps set to now.
    pub fn new(text: impl Into<String>, language: Language) -> Self {
        Self::with_id(Uuid::new_v4(), text, language)
    }

    /// Creates a record with a caller-provided stable ID.
    ///
    /// Used by the default content provider and by tests that need
    /// deterministic identities.
    pub fn with_id(id: RecordId, text: impl Into<String>, language: Language) -> Self {
        let now = now_epoch_ms();
        Self {
            id,
            text: text.into(),
            language,
            created_at: now,
            updated_at: now,
            is_default: false,
        }
    }

    /// Checks content invariants before persistence.
    pub fn validate(&self) -> Result<(), TextValidationError> {
        validate_text(&self.text)
    }
}

/// Checks one content value against the non-empty invariant.
pub fn validate_text(text: &str) -> Result<(), TextValidationError> {
    if text.trim().is_empty() {
        return Err(TextValidationError::EmptyText);
    }
    Ok(())
}

/// Returns current wall-clock time as Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis() as i64)
        .unwrap_or(0)
}
