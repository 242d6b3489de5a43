//! Freemium quota decision engine.
//!
//! # Responsibility
//! - Combine the imported-file count, the persisted text count and the
//!   premium flag into admission advice for content creation.
//!
//! # Invariants
//! - Premium installations never reach the limit; their remaining
//!   capacity is the unlimited sentinel.
//! - The text count spans all languages: the free limit is a global cap
//!   on content items, not a per-language one.
//! - No lock spans the file probe and the store count; a concurrent
//!   insert or import between the two reads can skew one check by one
//!   item. That window is an accepted eventual-consistency property,
//!   not an error.
//! - Store read failures fail closed (no admission); probe failures fail
//!   open (count as zero) and never surface here.

use crate::quota::file_probe::count_files;
use crate::repo::preference_repo::PreferenceStore;
use crate::repo::text_repo::{RepoResult, TextRepository};
use log::{error, info};
use std::path::{Path, PathBuf};

/// Maximum combined item count (imported documents + stored texts) for
/// non-premium installations.
pub const MAX_FREE_ITEM_COUNT: u32 = 5;

/// Sentinel returned as remaining capacity for premium installations.
pub const UNLIMITED_CAPACITY: u32 = u32::MAX;

/// Extension of imported document files counted toward the quota.
const IMPORTED_DOCUMENT_EXTENSION: &str = "pdf";

/// One consistent read of everything a quota decision needs.
///
/// All three queries (`total_count`, `has_reached_limit`,
/// `remaining_capacity`) answer from the same snapshot, so a single
/// admission decision never mixes state from two points in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaSnapshot {
    /// Premium entitlement at read time.
    pub is_premium: bool,
    /// Persisted text records across all languages.
    pub persisted_text_count: u32,
    /// Imported document files found on disk.
    pub imported_file_count: u32,
}

impl QuotaSnapshot {
    /// Combined item count across both substrates.
    pub fn total_count(&self) -> u32 {
        self.persisted_text_count
            .saturating_add(self.imported_file_count)
    }

    /// Whether the free limit is exhausted. Always `false` for premium.
    pub fn has_reached_limit(&self) -> bool {
        !self.is_premium && self.total_count() >= MAX_FREE_ITEM_COUNT
    }

    /// How many more items may be created. [`UNLIMITED_CAPACITY`] for
    /// premium; clamped at zero for free installations over the limit.
    pub fn remaining_capacity(&self) -> u32 {
        if self.is_premium {
            UNLIMITED_CAPACITY
        } else {
            MAX_FREE_ITEM_COUNT.saturating_sub(self.total_count())
        }
    }
}

/// Advisory quota engine over the text store, the preference store and
/// the imported-document directory.
///
/// The engine never blocks an insert itself; callers pre-check with
/// [`QuotaEngine::admits_new_item`] (or a snapshot) before creating
/// content.
pub struct QuotaEngine<R: TextRepository, P: PreferenceStore> {
    repo: R,
    prefs: P,
    documents_dir: PathBuf,
}

impl<R: TextRepository, P: PreferenceStore> QuotaEngine<R, P> {
    /// Creates an engine reading from the given stores and counting
    /// imported documents under `documents_dir`.
    pub fn new(repo: R, prefs: P, documents_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo,
            prefs,
            documents_dir: documents_dir.into(),
        }
    }

    /// Directory scanned for imported document files.
    pub fn documents_dir(&self) -> &Path {
        &self.documents_dir
    }

    /// Reads current state from both substrates and the premium flag.
    ///
    /// Errors from either store surface unchanged; the file probe cannot
    /// fail and contributes zero when the directory is unreadable.
    pub fn snapshot(&self) -> RepoResult<QuotaSnapshot> {
        let is_premium = self.prefs.is_premium()?;
        let persisted_text_count = self.repo.count_all()?;
        let file_count = count_files(&self.documents_dir, IMPORTED_DOCUMENT_EXTENSION);
        let imported_file_count = u32::try_from(file_count).unwrap_or(u32::MAX);

        Ok(QuotaSnapshot {
            is_premium,
            persisted_text_count,
            imported_file_count,
        })
    }

    /// Whether the free limit is exhausted right now.
    ///
    /// Propagates store errors unchanged; callers that cannot handle the
    /// error must treat it as "limit reached", never as free space.
    pub fn has_reached_limit(&self) -> RepoResult<bool> {
        Ok(self.snapshot()?.has_reached_limit())
    }

    /// How many more items may be created right now.
    pub fn remaining_capacity(&self) -> RepoResult<u32> {
        Ok(self.snapshot()?.remaining_capacity())
    }

    /// Fail-closed admission pre-check for content creation.
    ///
    /// Returns `false` both when the limit is reached and when the store
    /// cannot be read: a corrupt store must not silently admit unlimited
    /// content.
    pub fn admits_new_item(&self) -> bool {
        match self.snapshot() {
            Ok(snapshot) => {
                info!(
                    "event=quota_check module=quota status=ok premium={} texts={} files={} remaining={}",
                    snapshot.is_premium,
                    snapshot.persisted_text_count,
                    snapshot.imported_file_count,
                    snapshot.remaining_capacity()
                );
                !snapshot.has_reached_limit()
            }
            Err(err) => {
                error!(
                    "event=quota_check module=quota status=error error_code=fail_closed error={err}"
                );
                false
            }
        }
    }
}
