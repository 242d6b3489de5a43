//! Preference store contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist the singleton installation preference row.
//! - Expose the narrow reads (language setting, premium flag) consumed
//!   by the library and quota layers.
//!
//! # Invariants
//! - Exactly one row with `id = 1` exists; the init migration seeds it.
//! - `install_date` is written at most once.
//! - Premium flag writes are owned by the purchase subsystem; this store
//!   is only its persistence.

use crate::model::preferences::Preferences;
use crate::model::text::Language;
use crate::repo::text_repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Store interface for installation preferences.
pub trait PreferenceStore {
    /// Loads the full singleton preference record.
    fn load(&self) -> RepoResult<Preferences>;
    /// Reads the explicit language override, if any.
    fn language_setting(&self) -> RepoResult<Option<Language>>;
    /// Reads the premium entitlement flag.
    fn is_premium(&self) -> RepoResult<bool>;
    /// Sets or clears the explicit language override.
    fn set_language_setting(&self, language: Option<Language>) -> RepoResult<()>;
    /// Sets the premium entitlement flag.
    fn set_premium(&self, premium: bool) -> RepoResult<()>;
    /// Records the install timestamp once; later calls are no-ops.
    fn mark_installed(&self, epoch_ms: i64) -> RepoResult<()>;
    /// Increments the review prompt counter and returns the new value.
    fn increment_review_request_count(&self) -> RepoResult<u32>;
}

/// SQLite-backed preference store over the singleton `preferences` row.
pub struct SqlitePreferenceStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePreferenceStore<'conn> {
    /// Constructs a store from a migrated/ready connection.
    ///
    /// Rejects connections where the singleton row is absent, which only
    /// happens when migrations have not run.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        if !preferences_table_exists(conn)? {
            return Err(RepoError::MissingRequiredTable("preferences"));
        }

        let seeded: Option<i64> = conn
            .query_row("SELECT id FROM preferences WHERE id = 1;", [], |row| {
                row.get(0)
            })
            .optional()?;
        if seeded.is_none() {
            return Err(RepoError::InvalidData(
                "preferences singleton row is missing".to_string(),
            ));
        }

        Ok(Self { conn })
    }
}

impl PreferenceStore for SqlitePreferenceStore<'_> {
    fn load(&self) -> RepoResult<Preferences> {
        self.conn.query_row(
            "SELECT language_setting, is_premium, install_date, review_request_count
             FROM preferences
             WHERE id = 1;",
            [],
            |row| {
                Ok((
                    row.get::<_, Option<String>>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, Option<i64>>(2)?,
                    row.get::<_, i64>(3)?,
                ))
            },
        )
        .map_err(RepoError::from)
        .and_then(|(language_text, premium, install_date_ms, review_count)| {
            let language_setting = match language_text {
                Some(code) => Some(Language::parse(&code).ok_or_else(|| {
                    RepoError::InvalidData(format!(
                        "invalid language code `{code}` in preferences.language_setting"
                    ))
                })?),
                None => None,
            };
            let review_request_count = u32::try_from(review_count).map_err(|_| {
                RepoError::InvalidData(format!(
                    "invalid review_request_count `{review_count}` in preferences"
                ))
            })?;

            Ok(Preferences {
                language_setting,
                is_premium: premium != 0,
                install_date_ms,
                review_request_count,
            })
        })
    }

    fn language_setting(&self) -> RepoResult<Option<Language>> {
        Ok(self.load()?.language_setting)
    }

    fn is_premium(&self) -> RepoResult<bool> {
        let premium: i64 = self.conn.query_row(
            "SELECT is_premium FROM preferences WHERE id = 1;",
            [],
            |row| row.get(0),
        )?;
        Ok(premium != 0)
    }

    fn set_language_setting(&self, language: Option<Language>) -> RepoResult<()> {
        self.conn.execute(
            "UPDATE preferences SET language_setting = ?1 WHERE id = 1;",
            params![language.map(Language::code)],
        )?;
        Ok(())
    }

    fn set_premium(&self, premium: bool) -> RepoResult<()> {
        self.conn.execute(
            "UPDATE preferences SET is_premium = ?1 WHERE id = 1;",
            params![i64::from(premium)],
        )?;
        Ok(())
    }

    fn mark_installed(&self, epoch_ms: i64) -> RepoResult<()> {
        self.conn.execute(
            "UPDATE preferences
             SET install_date = ?1
             WHERE id = 1 AND install_date IS NULL;",
            params![epoch_ms],
        )?;
        Ok(())
    }

    fn increment_review_request_count(&self) -> RepoResult<u32> {
        self.conn.execute(
            "UPDATE preferences
             SET review_request_count = review_request_count + 1
             WHERE id = 1;",
            [],
        )?;
        Ok(self.load()?.review_request_count)
    }
}

fn preferences_table_exists(conn: &Connection) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'preferences'
        );",
        [],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
