use rusqlite::Connection;
use yomiage_core::db::open_db_in_memory;
use yomiage_core::{Language, PreferenceStore, RepoError, SqlitePreferenceStore};

#[test]
fn fresh_database_yields_default_preferences() {
    let conn = open_db_in_memory().unwrap();
    let prefs = SqlitePreferenceStore::try_new(&conn).unwrap();

    let loaded = prefs.load().unwrap();
    assert_eq!(loaded.language_setting, None);
    assert!(!loaded.is_premium);
    assert_eq!(loaded.install_date_ms, None);
    assert_eq!(loaded.review_request_count, 0);
}

#[test]
fn language_setting_roundtrips_and_clears() {
    let conn = open_db_in_memory().unwrap();
    let prefs = SqlitePreferenceStore::try_new(&conn).unwrap();

    prefs.set_language_setting(Some(Language::Ja)).unwrap();
    assert_eq!(prefs.language_setting().unwrap(), Some(Language::Ja));

    prefs.set_language_setting(None).unwrap();
    assert_eq!(prefs.language_setting().unwrap(), None);
}

#[test]
fn premium_flag_roundtrips() {
    let conn = open_db_in_memory().unwrap();
    let prefs = SqlitePreferenceStore::try_new(&conn).unwrap();

    assert!(!prefs.is_premium().unwrap());
    prefs.set_premium(true).unwrap();
    assert!(prefs.is_premium().unwrap());
    prefs.set_premium(false).unwrap();
    assert!(!prefs.is_premium().unwrap());
}

#[test]
fn install_date_is_written_at_most_once() {
    let conn = open_db_in_memory().unwrap();
    let prefs = SqlitePreferenceStore::try_new(&conn).unwrap();

    prefs.mark_installed(1_700_000_000_000).unwrap();
    prefs.mark_installed(1_800_000_000_000).unwrap();

    let loaded = prefs.load().unwrap();
    assert_eq!(loaded.install_date_ms, Some(1_700_000_000_000));
}

#[test]
fn review_request_count_increments() {
    let conn = open_db_in_memory().unwrap();
    let prefs = SqlitePreferenceStore::try_new(&conn).unwrap();

    assert_eq!(prefs.increment_review_request_count().unwrap(), 1);
    assert_eq!(prefs.increment_review_request_count().unwrap(), 2);
    assert_eq!(prefs.load().unwrap().review_request_count, 2);
}

#[test]
fn store_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqlitePreferenceStore::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("preferences"))
    ));
}

#[test]
fn language_setting_serializes_as_lowercase_code() {
    let json = serde_json::to_string(&Language::Ja).unwrap();
    assert_eq!(json, "\"ja\"");
    let parsed: Language = serde_json::from_str("\"de\"").unwrap();
    assert_eq!(parsed, Language::De);
}
