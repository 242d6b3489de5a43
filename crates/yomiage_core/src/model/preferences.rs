//! Installation-wide preference record.
//!
//! # Responsibility
//! - Define the singleton settings shape persisted alongside texts.
//!
//! # Invariants
//! - Exactly one preference row exists per installation; the store
//!   enforces the singleton key.
//! - `language_setting == None` means "derive from the system locale at
//!   the application boundary", not "no language".

use crate::model::text::Language;
use serde::{Deserialize, Serialize};

/// Persisted settings for one installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Explicit language override; `None` defers to the system locale.
    pub language_setting: Option<Language>,
    /// Premium entitlement flag; disables the freemium quota entirely.
    /// Written only by the purchase subsystem.
    pub is_premium: bool,
    /// First-launch timestamp in epoch milliseconds, set once.
    pub install_date_ms: Option<i64>,
    /// How many times the review prompt has been requested.
    pub review_request_count: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language_setting: None,
            is_premium: false,
            install_date_ms: None,
            review_request_count: 0,
        }
    }
}
