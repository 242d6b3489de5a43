use rusqlite::Connection;
use uuid::Uuid;
use yomiage_core::db::open_db_in_memory;
use yomiage_core::{
    Language, RepoError, SqliteTextRepository, TextRecord, TextRepository, TextValidationError,
};

#[test]
fn insert_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTextRepository::try_new(&conn).unwrap();

    let record = TextRecord::new("今日はいい天気ですね", Language::Ja);
    let id = repo.insert_text(&record).unwrap();
    assert_eq!(id, record.id);

    let loaded = repo.get_text(id).unwrap().unwrap();
    assert_eq!(loaded.id, record.id);
    assert_eq!(loaded.text, "今日はいい天気ですね");
    assert_eq!(loaded.language, Language::Ja);
    assert_eq!(loaded.created_at, record.created_at);
    assert_eq!(loaded.updated_at, record.updated_at);
    assert!(!loaded.is_default);
}

#[test]
fn get_unknown_id_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTextRepository::try_new(&conn).unwrap();

    assert!(repo.get_text(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn fetch_all_is_scoped_to_one_language() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTextRepository::try_new(&conn).unwrap();

    repo.insert_text(&TextRecord::new("hello", Language::En))
        .unwrap();
    repo.insert_text(&TextRecord::new("こんにちは", Language::Ja))
        .unwrap();
    repo.insert_text(&TextRecord::new("안녕하세요", Language::Ko))
        .unwrap();

    let japanese = repo.fetch_all(Language::Ja).unwrap();
    assert_eq!(japanese.len(), 1);
    assert_eq!(japanese[0].text, "こんにちは");

    let german = repo.fetch_all(Language::De).unwrap();
    assert!(german.is_empty());
}

#[test]
fn fetch_all_orders_by_created_at_descending() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTextRepository::try_new(&conn).unwrap();

    let mut oldest = TextRecord::new("oldest", Language::En);
    oldest.created_at = 1_000;
    oldest.updated_at = 1_000;
    let mut middle = TextRecord::new("middle", Language::En);
    middle.created_at = 2_000;
    middle.updated_at = 2_000;
    let mut newest = TextRecord::new("newest", Language::En);
    newest.created_at = 3_000;
    newest.updated_at = 3_000;

    // Insert out of order to prove the ordering comes from created_at.
    repo.insert_text(&middle).unwrap();
    repo.insert_text(&newest).unwrap();
    repo.insert_text(&oldest).unwrap();

    let listed = repo.fetch_all(Language::En).unwrap();
    let texts: Vec<&str> = listed.iter().map(|record| record.text.as_str()).collect();
    assert_eq!(texts, ["newest", "middle", "oldest"]);
}

#[test]
fn created_at_ties_break_toward_latest_insert() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTextRepository::try_new(&conn).unwrap();

    let mut first = TextRecord::new("first insert", Language::En);
    first.created_at = 5_000;
    first.updated_at = 5_000;
    let mut second = TextRecord::new("second insert", Language::En);
    second.created_at = 5_000;
    second.updated_at = 5_000;

    repo.insert_text(&first).unwrap();
    repo.insert_text(&second).unwrap();

    let listed = repo.fetch_all(Language::En).unwrap();
    assert_eq!(listed[0].text, "second insert");
    assert_eq!(listed[1].text, "first insert");
}

#[test]
fn count_all_spans_every_language() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTextRepository::try_new(&conn).unwrap();

    assert_eq!(repo.count_all().unwrap(), 0);

    repo.insert_text(&TextRecord::new("one", Language::En))
        .unwrap();
    repo.insert_text(&TextRecord::new("二", Language::Ja))
        .unwrap();
    repo.insert_text(&TextRecord::new("drei", Language::De))
        .unwrap();

    assert_eq!(repo.count_all().unwrap(), 3);
}

#[test]
fn update_text_replaces_content_and_refreshes_updated_at() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTextRepository::try_new(&conn).unwrap();

    let mut record = TextRecord::new("draft", Language::En);
    record.created_at = 1_000;
    record.updated_at = 1_000;
    repo.insert_text(&record).unwrap();

    repo.update_text(record.id, "final text").unwrap();

    let loaded = repo.get_text(record.id).unwrap().unwrap();
    assert_eq!(loaded.text, "final text");
    assert_eq!(loaded.created_at, 1_000);
    assert!(loaded.updated_at > 1_000);
}

#[test]
fn update_unknown_id_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTextRepository::try_new(&conn).unwrap();

    let id = Uuid::new_v4();
    let err = repo.update_text(id, "anything").unwrap_err();
    assert!(matches!(err, RepoError::NotFound(missing) if missing == id));
}

#[test]
fn delete_twice_fails_the_second_time() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTextRepository::try_new(&conn).unwrap();

    let record = TextRecord::new("to delete", Language::En);
    repo.insert_text(&record).unwrap();

    repo.delete_text(record.id).unwrap();
    let err = repo.delete_text(record.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == record.id));

    assert!(repo.get_text(record.id).unwrap().is_none());
}

#[test]
fn blank_content_is_rejected_on_insert_and_update() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTextRepository::try_new(&conn).unwrap();

    let blank = TextRecord::new("   \n", Language::En);
    let err = repo.insert_text(&blank).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(TextValidationError::EmptyText)
    ));

    let record = TextRecord::new("valid", Language::En);
    repo.insert_text(&record).unwrap();
    let err = repo.update_text(record.id, " \t ").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(TextValidationError::EmptyText)
    ));
}

#[test]
fn synthetic_default_records_are_rejected_by_insert() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTextRepository::try_new(&conn).unwrap();

    let mut record = TextRecord::new("おはようございます", Language::Ja);
    record.is_default = true;

    let err = repo.insert_text(&record).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
    assert_eq!(repo.count_all().unwrap(), 0);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteTextRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_texts_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!(
        "PRAGMA user_version = {};",
        yomiage_core::db::migrations::latest_version()
    ))
    .unwrap();

    let result = SqliteTextRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("texts"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE texts (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            uuid TEXT NOT NULL UNIQUE,
            language TEXT NOT NULL,
            content TEXT NOT NULL,
            created_at INTEGER NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!(
        "PRAGMA user_version = {};",
        yomiage_core::db::migrations::latest_version()
    ))
    .unwrap();

    let result = SqliteTextRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "texts",
            column: "updated_at"
        })
    ));
}
