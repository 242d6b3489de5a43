//! Text library use-case service.
//!
//! # Responsibility
//! - Provide the application-facing list/insert/edit/delete API.
//! - Merge persisted records with the synthetic default greetings.
//!
//! # Invariants
//! - `list_texts` always returns persisted records first (most recent
//!   first), then the full default set in declared order; consumers rely
//!   on defaults sorting last regardless of timestamps.
//! - Reads never mutate; calling `list_texts` repeatedly is idempotent.
//! - Insert does not consult the quota; the quota engine only advises
//!   and enforcement is the caller's pre-check.

use crate::defaults::default_texts;
use crate::model::text::{Language, RecordId, TextRecord};
use crate::repo::text_repo::{RepoResult, TextRepository};
use log::{error, info};

/// Use-case facade over the text record repository.
pub struct LibraryService<R: TextRepository> {
    repo: R,
}

impl<R: TextRepository> LibraryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all speech texts for one language.
    ///
    /// # Contract
    /// - Persisted records of `language`, ordered `created_at` descending.
    /// - The fixed default greeting set appended at the tail.
    pub fn list_texts(&self, language: Language) -> RepoResult<Vec<TextRecord>> {
        let mut records = self.repo.fetch_all(language)?;
        records.extend(default_texts());
        Ok(records)
    }

    /// Persists one user-authored text and returns its stable id.
    ///
    /// # Contract
    /// - Fresh id, `created_at == updated_at == now`.
    /// - Durably committed before returning, so an immediately following
    ///   quota check observes the new record.
    pub fn insert_text(
        &self,
        text: impl Into<String>,
        language: Language,
    ) -> RepoResult<RecordId> {
        let record = TextRecord::new(text, language);
        match self.repo.insert_text(&record) {
            Ok(id) => {
                info!(
                    "event=text_insert module=library status=ok id={id} language={language}"
                );
                Ok(id)
            }
            Err(err) => {
                error!(
                    "event=text_insert module=library status=error language={language} error={err}"
                );
                Err(err)
            }
        }
    }

    /// Replaces the content of one persisted text.
    ///
    /// Refreshes `updated_at`; `created_at` and ordering position are
    /// unchanged. Returns `NotFound` for unknown ids.
    pub fn update_text(&self, id: RecordId, text: &str) -> RepoResult<()> {
        self.repo.update_text(id, text)
    }

    /// Deletes one persisted text by id.
    ///
    /// Returns `NotFound` for unknown ids, including a second delete of
    /// the same id. Default greetings have no persisted identity and can
    /// therefore never be deleted through this path.
    pub fn delete_text(&self, id: RecordId) -> RepoResult<()> {
        match self.repo.delete_text(id) {
            Ok(()) => {
                info!("event=text_delete module=library status=ok id={id}");
                Ok(())
            }
            Err(err) => {
                error!("event=text_delete module=library status=error id={id} error={err}");
                Err(err)
            }
        }
    }

    /// Gets one persisted text by id.
    pub fn get_text(&self, id: RecordId) -> RepoResult<Option<TextRecord>> {
        self.repo.get_text(id)
    }

    /// Counts persisted records across all languages.
    ///
    /// Exposed for the quota engine, which applies the free limit as a
    /// global cap rather than per language.
    pub fn count_persisted(&self) -> RepoResult<u32> {
        self.repo.count_all()
    }
}
