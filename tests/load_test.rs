use std::collections::HashSet;
use std::path::Path;
use tokio::runtime::Runtime;

use spotify_etl::db::{self, SyncDb};
use spotify_etl::load::{load_batch, load_into};
use spotify_etl::{EtlError, LoadOutcome, PlayEvent, PlayEventBatch};

/// Helper to create a temp dir and the database path inside it
/// Keep the TempDir alive for the duration of the test
fn temp_db_path() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("songs.sqlite");
    (dir, path)
}

fn sample_batch(count: usize) -> PlayEventBatch {
    (0..count)
        .map(|i| {
            PlayEvent::new(
                format!("Artist {}", i),
                format!("Album {}", i),
                format!("Song {}", i),
                format!("2024-03-1{}T08:00:00.000Z", i),
            )
        })
        .collect()
}

/// Helper to count rows with an independent connection
fn count_rows(db_path: &Path) -> i64 {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let pool = db::open_database_connection(db_path).await.unwrap();
        let count = db::count_songs(&pool).await.unwrap();
        pool.close().await;
        count
    })
}

/// Helper to read back all rows with an independent connection
fn read_rows(db_path: &Path) -> Vec<PlayEvent> {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let pool = db::open_database_connection(db_path).await.unwrap();
        let rows = db::select_all_songs(&pool).await.unwrap();
        pool.close().await;
        rows
    })
}

#[test]
fn test_load_then_read_back_matches_batch() {
    let (_guard, db_path) = temp_db_path();
    let mut events = sample_batch(4).into_events();
    events.push(PlayEvent::new(
        "Guns N' Roses",
        "Appetite for Destruction",
        "Sweet Child O' Mine",
        "2024-03-14T22:10:00.000Z",
    ));
    let batch = PlayEventBatch::new(events.clone());

    let outcome = load_batch(batch, &db_path).unwrap();
    assert_eq!(outcome, LoadOutcome::Appended(5));

    let stored: HashSet<PlayEvent> = read_rows(&db_path).into_iter().collect();
    let expected: HashSet<PlayEvent> = events.into_iter().collect();
    assert_eq!(stored, expected);
}

#[test]
fn test_loading_same_batch_twice_is_idempotent() {
    let (_guard, db_path) = temp_db_path();

    let first = load_batch(sample_batch(5), &db_path).unwrap();
    assert_eq!(first, LoadOutcome::Appended(5));
    assert_eq!(count_rows(&db_path), 5);

    let second = load_batch(sample_batch(5), &db_path).unwrap();
    assert_eq!(second, LoadOutcome::AlreadyLoaded);
    assert_eq!(count_rows(&db_path), 5);
}

#[test]
fn test_overlapping_batch_is_skipped_entirely() {
    let (_guard, db_path) = temp_db_path();
    load_batch(sample_batch(3), &db_path).unwrap();

    // Rows 0..3 overlap, rows 3..5 are new; the whole batch is skipped
    let outcome = load_batch(sample_batch(5), &db_path).unwrap();
    assert_eq!(outcome, LoadOutcome::AlreadyLoaded);
    assert_eq!(count_rows(&db_path), 3);
}

#[test]
fn test_empty_batch_creates_table_and_inserts_nothing() {
    let (_guard, db_path) = temp_db_path();

    let outcome = load_batch(PlayEventBatch::default(), &db_path).unwrap();
    assert_eq!(outcome, LoadOutcome::Appended(0));
    assert!(db_path.exists());
    assert_eq!(count_rows(&db_path), 0);
}

#[test]
fn test_schema_creation_is_idempotent() {
    let (_guard, db_path) = temp_db_path();
    let db = SyncDb::connect(&db_path).unwrap();

    db::init_database_schema_sync(&db).unwrap();
    db::init_database_schema_sync(&db).unwrap();
    assert_eq!(load_into(&db, sample_batch(2)).unwrap(), LoadOutcome::Appended(2));
    db::init_database_schema_sync(&db).unwrap();

    assert_eq!(db::count_songs_sync(&db).unwrap(), 2);
    assert_eq!(db::select_all_songs_sync(&db).unwrap().len(), 2);
}

#[test]
fn test_direct_duplicate_insert_is_classified_as_conflict() {
    let (_guard, db_path) = temp_db_path();
    let db = SyncDb::connect(&db_path).unwrap();
    db::init_database_schema_sync(&db).unwrap();

    let batch = sample_batch(1);
    db::insert_songs_sync(&db, batch.events()).unwrap();
    let err = db::insert_songs_sync(&db, batch.events()).unwrap_err();
    assert!(err.is_conflict(), "expected conflict, got {:?}", err);
}

#[test]
fn test_storage_fault_is_not_swallowed() {
    let (guard, _) = temp_db_path();
    let db_path = guard.path().join("missing_dir").join("songs.sqlite");

    let err = load_batch(sample_batch(1), &db_path).unwrap_err();
    assert!(
        matches!(err, EtlError::Storage(ref e) if !e.is_conflict()),
        "expected storage fault, got {:?}",
        err
    );
}
