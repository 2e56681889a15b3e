use storage::repository::{KeyValueStore, Storage};
use storage::sqlite::SqliteRepository;

#[tokio::test]
async fn sqlite_round_trips_records() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.set("module_week1_quiz-0", r#"{"answer":"b","correct":true}"#)
        .await
        .unwrap();
    let value = repo.get("module_week1_quiz-0").await.unwrap();
    assert_eq!(
        value.as_deref(),
        Some(r#"{"answer":"b","correct":true}"#)
    );

    // last write wins
    repo.set("module_week1_quiz-0", r#"{"answer":"c","correct":false}"#)
        .await
        .unwrap();
    let value = repo.get("module_week1_quiz-0").await.unwrap();
    assert_eq!(
        value.as_deref(),
        Some(r#"{"answer":"c","correct":false}"#)
    );

    repo.remove("module_week1_quiz-0").await.unwrap();
    assert_eq!(repo.get("module_week1_quiz-0").await.unwrap(), None);
}

#[tokio::test]
async fn sqlite_prefix_match_is_literal() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_prefix?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.set("module_week1_progress", "{}").await.unwrap();
    repo.set("module_week1_tasks", "{}").await.unwrap();
    repo.set("module_week2_tasks", "{}").await.unwrap();
    // `_` must not behave as a single-character wildcard
    repo.set("moduleXweek1_tasks", "{}").await.unwrap();

    let keys = repo.keys_with_prefix("module_week1").await.unwrap();
    assert_eq!(keys, vec!["module_week1_progress", "module_week1_tasks"]);
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");

    repo.set("k", "v").await.unwrap();
    assert_eq!(repo.get("k").await.unwrap().as_deref(), Some("v"));
}

#[tokio::test]
async fn storage_helper_builds_sqlite_backend() {
    let storage = Storage::sqlite("sqlite:file:memdb_kv_storage?mode=memory&cache=shared")
        .await
        .expect("storage");
    storage.kv.set("module_week1_tasks", "{}").await.unwrap();
    assert_eq!(
        storage.kv.get("module_week1_tasks").await.unwrap().as_deref(),
        Some("{}")
    );
}
