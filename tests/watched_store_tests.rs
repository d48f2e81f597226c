//! Watched list behaviour against the file backend.

use std::path::PathBuf;

use anisearch::domain::AnimeId;
use anisearch::models::{CatalogData, Genre, WatchData, WatchStatus, WatchedUpdate};
use anisearch::store::{
    FileStore, KeyValueStore, SortKey, WATCHED_KEY, WatchedStore, sort_by,
};

struct TempDir(PathBuf);

impl TempDir {
    fn new() -> Self {
        Self(std::env::temp_dir().join(format!("anisearch-store-test-{}", uuid::Uuid::new_v4())))
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

fn frieren() -> CatalogData {
    CatalogData::new(1, "Frieren")
        .with_title_english("Frieren: Beyond Journey's End")
        .with_episodes(28)
        .with_genres(vec![Genre::named("Adventure"), Genre::named("Drama")])
}

#[test]
fn scenario_upsert_defaults() {
    let dir = TempDir::new();
    let mut store = WatchedStore::open(FileStore::new(&dir.0));

    store.upsert(&frieren(), WatchData::default());

    let entry = store.get(AnimeId::new(1)).expect("entry stored");
    assert_eq!(entry.status, WatchStatus::Watching);
    assert_eq!(entry.episodes_watched, 0);
    assert!(entry.rating.abs() < f32::EPSILON);
    assert_eq!(entry.total_episodes, Some(28));
}

#[test]
fn scenario_upsert_same_id_replaces() {
    let dir = TempDir::new();
    let mut store = WatchedStore::open(FileStore::new(&dir.0));

    store.upsert(&frieren(), WatchData::with_status(WatchStatus::Completed));
    store.upsert(&CatalogData::new(1, "Frieren II"), WatchData::default());

    assert_eq!(store.len(), 1);
    let entry = store.get(AnimeId::new(1)).unwrap();
    assert_eq!(entry.title, "Frieren II");
    // Full replace: nothing from the first upsert survives.
    assert_eq!(entry.status, WatchStatus::Watching);
    assert_eq!(entry.title_english, None);
    assert!(entry.genres.is_empty());
}

#[test]
fn scenario_remove_from_empty_list() {
    let dir = TempDir::new();
    let mut store = WatchedStore::open(FileStore::new(&dir.0));

    assert!(store.remove(AnimeId::new(1)).is_none());
    assert!(store.is_empty());
    assert!(store.last_write_error().is_none());
}

#[test]
fn reload_reconstructs_identical_list() {
    let dir = TempDir::new();
    let mut store = WatchedStore::open(FileStore::new(&dir.0));

    store.upsert(&frieren(), WatchData::default());
    store.upsert(
        &CatalogData::new(2, "Mushishi").with_episodes(26),
        WatchData {
            status: Some(WatchStatus::OnHold),
            episodes_watched: Some(7),
            rating: Some(8.5),
            notes: Some("slow and lovely".to_string()),
            ..WatchData::default()
        },
    );
    store.upsert(&CatalogData::new(3, "Akira"), WatchData::default());
    store.update(
        AnimeId::new(1),
        WatchedUpdate {
            episodes_watched: Some(14),
            ..WatchedUpdate::default()
        },
    );
    store.remove(AnimeId::new(3));

    let reloaded = WatchedStore::open(FileStore::new(&dir.0));
    assert_eq!(reloaded.entries(), store.entries());
    assert_eq!(reloaded.get(AnimeId::new(1)).unwrap().episodes_watched, 14);
    assert_eq!(reloaded.get(AnimeId::new(2)).unwrap().notes, "slow and lovely");
    assert!(!reloaded.exists(AnimeId::new(3)));
}

#[test]
fn last_write_wins_per_id() {
    let dir = TempDir::new();
    let mut store = WatchedStore::open(FileStore::new(&dir.0));
    let id = AnimeId::new(1);

    store.upsert(&frieren(), WatchData::default());
    store.update(
        id,
        WatchedUpdate {
            status: Some(WatchStatus::Dropped),
            rating: Some(3.0),
            ..WatchedUpdate::default()
        },
    );
    store.update(
        id,
        WatchedUpdate {
            status: Some(WatchStatus::Completed),
            ..WatchedUpdate::default()
        },
    );

    let entry = store.get(id).unwrap();
    assert_eq!(entry.status, WatchStatus::Completed);
    assert!((entry.rating - 3.0).abs() < f32::EPSILON);

    store.remove(id);
    store.upsert(&frieren(), WatchData::default());
    let entry = store.get(id).unwrap();
    assert_eq!(entry.status, WatchStatus::Watching);
    assert!(entry.rating.abs() < f32::EPSILON);
}

#[test]
fn update_of_missing_id_keeps_file_bytes() {
    let dir = TempDir::new();
    let mut store = WatchedStore::open(FileStore::new(&dir.0));
    store.upsert(&frieren(), WatchData::default());

    let before = FileStore::new(&dir.0).get(WATCHED_KEY).unwrap().unwrap();
    assert!(!store.update(
        AnimeId::new(404),
        WatchedUpdate {
            rating: Some(10.0),
            ..WatchedUpdate::default()
        },
    ));
    let after = FileStore::new(&dir.0).get(WATCHED_KEY).unwrap().unwrap();

    assert_eq!(before, after);
}

#[test]
fn clear_persists_empty_list() {
    let dir = TempDir::new();
    let mut store = WatchedStore::open(FileStore::new(&dir.0));
    store.upsert(&frieren(), WatchData::default());
    store.clear();

    let reloaded = WatchedStore::open(FileStore::new(&dir.0));
    assert!(reloaded.is_empty());
}

#[test]
fn corrupt_file_opens_empty_and_is_overwritten() {
    let dir = TempDir::new();
    let mut backend = FileStore::new(&dir.0);
    backend.set(WATCHED_KEY, "]]] definitely not json").unwrap();

    let mut store = WatchedStore::open(FileStore::new(&dir.0));
    assert!(store.is_empty());

    store.upsert(&frieren(), WatchData::default());
    let reloaded = WatchedStore::open(FileStore::new(&dir.0));
    assert_eq!(reloaded.len(), 1);
}

#[test]
fn sorted_view_does_not_touch_store_order() {
    let dir = TempDir::new();
    let mut store = WatchedStore::open(FileStore::new(&dir.0));
    store.upsert(&CatalogData::new(2, "Mushishi"), WatchData::default());
    store.upsert(&CatalogData::new(1, "Akira"), WatchData::default());

    let sorted = sort_by(store.entries(), SortKey::Alphabetical);
    assert_eq!(sorted[0].title, "Akira");
    assert_eq!(store.entries()[0].title, "Mushishi");
}
