//! Core domain logic for Yomiage's text library.
//! This crate is the single source of truth for library and quota invariants.

pub mod db;
pub mod defaults;
pub mod logging;
pub mod model;
pub mod quota;
pub mod repo;
pub mod service;

pub use defaults::{default_texts, DEFAULT_TEXT_COUNT};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::preferences::Preferences;
pub use model::text::{Language, RecordId, TextRecord, TextValidationError};
pub use quota::engine::{QuotaEngine, QuotaSnapshot, MAX_FREE_ITEM_COUNT, UNLIMITED_CAPACITY};
pub use quota::file_probe::count_files;
pub use repo::preference_repo::{PreferenceStore, SqlitePreferenceStore};
pub use repo::text_repo::{RepoError, RepoResult, SqliteTextRepository, TextRepository};
pub use service::library_service::LibraryService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
