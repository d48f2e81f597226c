//! Command handlers driven by an in-memory catalog.

use std::sync::Mutex;

use anisearch::cli::commands::{
    cmd_add_anime, cmd_anime_info, cmd_clear, cmd_list_watched, cmd_remove_anime,
    cmd_search_anime, cmd_stats, cmd_top_anime, cmd_update_anime,
};
use anisearch::clients::{CatalogAnime, CatalogError, CatalogProvider};
use anisearch::config::Config;
use anisearch::domain::AnimeId;
use anisearch::models::{AnimeImages, ImageUrls, WatchData, WatchStatus, WatchedUpdate};
use anisearch::store::{MemoryStore, WatchedStore};

enum Gallery {
    Pictures(Vec<AnimeImages>),
    Failing,
}

struct FakeCatalog {
    anime: Vec<CatalogAnime>,
    gallery: Gallery,
    calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    fn new() -> Self {
        let json = r#"[
            {"mal_id": 52991, "title": "Sousou no Frieren", "title_english": "Frieren: Beyond Journey's End",
             "episodes": 28, "score": 9.3, "rank": 1, "type": "TV",
             "genres": [{"mal_id": 2, "name": "Adventure"}]},
            {"mal_id": 457, "title": "Mushishi", "episodes": 26, "type": "TV"},
            {"mal_id": 1, "title": "Untitled", "episodes": null}
        ]"#;
        let picture = AnimeImages {
            jpg: Some(ImageUrls {
                large_image_url: Some("https://cdn.myanimelist.net/images/anime/1015/138006l.jpg".to_string()),
                ..ImageUrls::default()
            }),
            webp: None,
        };
        Self {
            anime: serde_json::from_str(json).expect("fixture parses"),
            gallery: Gallery::Pictures(vec![picture]),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn with_failing_gallery() -> Self {
        Self {
            gallery: Gallery::Failing,
            ..Self::new()
        }
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl CatalogProvider for FakeCatalog {
    async fn fetch_top(&self, limit: u32) -> Result<Vec<CatalogAnime>, CatalogError> {
        self.record(format!("top {limit}"));
        Ok(self.anime.iter().take(limit as usize).cloned().collect())
    }

    async fn search_by_title(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<CatalogAnime>, CatalogError> {
        self.record(format!("search {query} {limit}"));
        let query = query.to_lowercase();
        Ok(self
            .anime
            .iter()
            .filter(|a| a.title.to_lowercase().contains(&query))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn fetch_by_id(&self, id: AnimeId) -> Result<Option<CatalogAnime>, CatalogError> {
        self.record(format!("anime {id}"));
        Ok(self.anime.iter().find(|a| a.id() == id).cloned())
    }

    async fn fetch_gallery(&self, id: AnimeId) -> Result<Vec<AnimeImages>, CatalogError> {
        self.record(format!("gallery {id}"));
        match &self.gallery {
            Gallery::Pictures(pictures) => Ok(pictures.clone()),
            Gallery::Failing => Err(CatalogError::Status {
                status: reqwest::StatusCode::TOO_MANY_REQUESTS,
                body: "rate limited".to_string(),
            }),
        }
    }
}

#[tokio::test]
async fn add_tracks_catalog_record() {
    let catalog = FakeCatalog::new();
    let mut store = WatchedStore::open(MemoryStore::new());

    cmd_add_anime(&catalog, &mut store, AnimeId::new(52991), WatchData::default())
        .await
        .unwrap();

    let entry = store.get(AnimeId::new(52991)).unwrap();
    assert_eq!(entry.title, "Sousou no Frieren");
    assert_eq!(entry.total_episodes, Some(28));
    assert_eq!(entry.genres[0].name, "Adventure");
    assert_eq!(entry.status, WatchStatus::Watching);
}

#[tokio::test]
async fn add_unknown_id_changes_nothing() {
    let catalog = FakeCatalog::new();
    let mut store = WatchedStore::open(MemoryStore::new());

    cmd_add_anime(&catalog, &mut store, AnimeId::new(999), WatchData::default())
        .await
        .unwrap();

    assert!(store.is_empty());
    assert_eq!(store.backend().writes(), 0);
}

#[tokio::test]
async fn add_rejects_progress_past_total() {
    let catalog = FakeCatalog::new();
    let mut store = WatchedStore::open(MemoryStore::new());

    let watch = WatchData {
        episodes_watched: Some(30),
        ..WatchData::default()
    };
    cmd_add_anime(&catalog, &mut store, AnimeId::new(52991), watch)
        .await
        .unwrap();

    assert!(store.is_empty());
}

#[tokio::test]
async fn update_validates_before_storing() {
    let catalog = FakeCatalog::new();
    let mut store = WatchedStore::open(MemoryStore::new());
    cmd_add_anime(&catalog, &mut store, AnimeId::new(457), WatchData::default())
        .await
        .unwrap();

    let bad = WatchedUpdate {
        rating: Some(11.0),
        ..WatchedUpdate::default()
    };
    cmd_update_anime(&mut store, AnimeId::new(457), bad).unwrap();
    assert!(store.get(AnimeId::new(457)).unwrap().rating.abs() < f32::EPSILON);

    let good = WatchedUpdate {
        status: Some(WatchStatus::Completed),
        episodes_watched: Some(26),
        rating: Some(9.0),
        ..WatchedUpdate::default()
    };
    cmd_update_anime(&mut store, AnimeId::new(457), good).unwrap();
    let entry = store.get(AnimeId::new(457)).unwrap();
    assert_eq!(entry.status, WatchStatus::Completed);
    assert_eq!(entry.episodes_watched, 26);
}

#[tokio::test]
async fn remove_and_clear_with_confirmation_skipped() {
    let catalog = FakeCatalog::new();
    let mut store = WatchedStore::open(MemoryStore::new());
    for id in [52991, 457, 1] {
        cmd_add_anime(&catalog, &mut store, AnimeId::new(id), WatchData::default())
            .await
            .unwrap();
    }

    cmd_remove_anime(&mut store, AnimeId::new(457), true).unwrap();
    assert_eq!(store.len(), 2);
    assert!(!store.exists(AnimeId::new(457)));

    cmd_list_watched(&store, "alphabetical", "watching", None).unwrap();
    assert!(cmd_list_watched(&store, "rating", "paused", None).is_err());

    cmd_clear(&mut store, true).unwrap();
    assert!(store.is_empty());
}

#[tokio::test]
async fn top_uses_configured_limit_unless_overridden() {
    let catalog = FakeCatalog::new();
    let store = WatchedStore::open(MemoryStore::new());
    let config = Config::default();

    cmd_top_anime(&config, &catalog, &store, None).await.unwrap();
    cmd_top_anime(&config, &catalog, &store, Some(2)).await.unwrap();

    assert_eq!(catalog.calls(), ["top 4", "top 2"]);
}

#[tokio::test]
async fn search_passes_query_and_limit() {
    let catalog = FakeCatalog::new();
    let store = WatchedStore::open(MemoryStore::new());
    let config = Config::default();

    cmd_search_anime(&config, &catalog, &store, "mushi", None)
        .await
        .unwrap();
    cmd_search_anime(&config, &catalog, &store, "no such show", Some(5))
        .await
        .unwrap();

    assert_eq!(catalog.calls(), ["search mushi 20", "search no such show 5"]);
    assert!(store.is_empty());
}

#[tokio::test]
async fn info_fetches_gallery_only_when_asked() {
    let catalog = FakeCatalog::new();
    let mut store = WatchedStore::open(MemoryStore::new());
    let config = Config::default();
    let id = AnimeId::new(52991);
    cmd_add_anime(&catalog, &mut store, id, WatchData::default())
        .await
        .unwrap();

    cmd_anime_info(&config, &catalog, &store, id, false).await.unwrap();
    cmd_anime_info(&config, &catalog, &store, id, true).await.unwrap();

    assert_eq!(
        catalog.calls(),
        ["anime 52991", "anime 52991", "anime 52991", "gallery 52991"]
    );
}

#[tokio::test]
async fn info_survives_failing_gallery_and_unknown_id() {
    let catalog = FakeCatalog::with_failing_gallery();
    let store = WatchedStore::open(MemoryStore::new());
    let config = Config::default();

    cmd_anime_info(&config, &catalog, &store, AnimeId::new(457), true)
        .await
        .unwrap();
    cmd_anime_info(&config, &catalog, &store, AnimeId::new(999), true)
        .await
        .unwrap();

    assert_eq!(catalog.calls(), ["anime 457", "gallery 457", "anime 999"]);
}

#[tokio::test]
async fn stats_reads_without_writing() {
    let catalog = FakeCatalog::new();
    let mut store = WatchedStore::open(MemoryStore::new());
    cmd_stats(&store).unwrap();

    for id in [52991, 457] {
        cmd_add_anime(&catalog, &mut store, AnimeId::new(id), WatchData::default())
            .await
            .unwrap();
    }
    let writes = store.backend().writes();

    cmd_stats(&store).unwrap();
    assert_eq!(store.backend().writes(), writes);
}
