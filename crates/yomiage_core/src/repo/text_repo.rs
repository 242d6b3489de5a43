//! Text record repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the canonical `texts` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `TextRecord::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - Every mutation commits durably before returning; quota checks that
//!   follow a mutation always observe it.
//! - Rows always materialize with `is_default == false`; synthetic
//!   records never reach this table.

use crate::db::DbError;
use crate::model::text::{
    validate_text, Language, RecordId, TextRecord, TextValidationError,
};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const TEXT_SELECT_SQL: &str = "SELECT
    uuid,
    language,
    content,
    created_at,
    updated_at
FROM texts";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for text persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TextValidationError),
    Db(DbError),
    NotFound(RecordId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "text record not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted text data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TextValidationError> for RepoError {
    fn from(value: TextValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for text record CRUD operations.
pub trait TextRepository {
    /// Persists one user-authored record and returns its stable id.
    fn insert_text(&self, record: &TextRecord) -> RepoResult<RecordId>;
    /// Gets one record by id.
    fn get_text(&self, id: RecordId) -> RepoResult<Option<TextRecord>>;
    /// Lists all records of one language, most recent first.
    fn fetch_all(&self, language: Language) -> RepoResult<Vec<TextRecord>>;
    /// Counts persisted records across all languages.
    fn count_all(&self) -> RepoResult<u32>;
    /// Replaces record content and refreshes `updated_at`.
    fn update_text(&self, id: RecordId, text: &str) -> RepoResult<()>;
    /// Hard-deletes one record by id.
    fn delete_text(&self, id: RecordId) -> RepoResult<()>;
}

/// SQLite-backed text record repository.
pub struct SqliteTextRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTextRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    ///
    /// Rejects connections whose schema version or shape does not match
    /// what this binary expects, so callers cannot accidentally operate
    /// on an unmigrated database.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl TextRepository for SqliteTextRepository<'_> {
    fn insert_text(&self, record: &TextRecord) -> RepoResult<RecordId> {
        record.validate()?;
        if record.is_default {
            return Err(RepoError::InvalidData(
                "synthetic default records are never persisted".to_string(),
            ));
        }

        self.conn.execute(
            "INSERT INTO texts (uuid, language, content, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                record.id.to_string(),
                record.language.code(),
                record.text.as_str(),
                record.created_at,
                record.updated_at,
            ],
        )?;

        Ok(record.id)
    }

    fn get_text(&self, id: RecordId) -> RepoResult<Option<TextRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TEXT_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_text_row(row)?));
        }

        Ok(None)
    }

    fn fetch_all(&self, language: Language) -> RepoResult<Vec<TextRecord>> {
        // `seq DESC` breaks created_at ties in favor of the later insert,
        // so a fresh insert is always the first row of the next fetch.
        let mut stmt = self.conn.prepare(&format!(
            "{TEXT_SELECT_SQL}
             WHERE language = ?1
             ORDER BY created_at DESC, seq DESC;"
        ))?;

        let mut rows = stmt.query([language.code()])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_text_row(row)?);
        }

        Ok(records)
    }

    fn count_all(&self) -> RepoResult<u32> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM texts;", [], |row| row.get(0))?;
        u32::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}` in texts")))
    }

    fn update_text(&self, id: RecordId, text: &str) -> RepoResult<()> {
        validate_text(text)?;

        let changed = self.conn.execute(
            "UPDATE texts
             SET
                content = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            params![id.to_string(), text],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_text(&self, id: RecordId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM texts WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_text_row(row: &Row<'_>) -> RepoResult<TextRecord> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in texts.uuid"))
    })?;

    let language_text: String = row.get("language")?;
    let language = Language::parse(&language_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid language code `{language_text}` in texts.language"
        ))
    })?;

    let record = TextRecord {
        id,
        text: row.get("content")?,
        language,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
        is_default: false,
    };
    record.validate()?;
    Ok(record)
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected = crate::db::migrations::latest_version();
    let actual: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual != expected {
        return Err(RepoError::UninitializedConnection {
            expected_version: expected,
            actual_version: actual,
        });
    }

    if !table_exists(conn, "texts")? {
        return Err(RepoError::MissingRequiredTable("texts"));
    }

    const TEXT_COLUMNS: [&str; 6] = [
        "seq",
        "uuid",
        "language",
        "content",
        "created_at",
        "updated_at",
    ];
    for column in TEXT_COLUMNS {
        if !table_has_column(conn, "texts", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "texts",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
