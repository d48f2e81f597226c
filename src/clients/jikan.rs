use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::AnimeId;
use crate::models::{AnimeImages, CatalogData, Genre};

pub const JIKAN_API: &str = "https://api.jikan.moe/v4";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Jikan API error: {status} - {body}")]
    Status { status: StatusCode, body: String },

    #[error("Invalid catalog configuration: {0}")]
    Config(String),
}

/// Remote anime catalog consumed by the CLI.
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Top ranked anime, best first.
    async fn fetch_top(&self, limit: u32) -> Result<Vec<CatalogAnime>, CatalogError>;

    async fn search_by_title(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<CatalogAnime>, CatalogError>;

    /// Full record for `id`, or `None` if the catalog does not know it.
    async fn fetch_by_id(&self, id: AnimeId) -> Result<Option<CatalogAnime>, CatalogError>;

    async fn fetch_gallery(&self, id: AnimeId) -> Result<Vec<AnimeImages>, CatalogError>;
}

#[derive(Debug, Deserialize)]
struct JikanResponse<T> {
    data: T,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogAnime {
    pub mal_id: i32,
    pub title: String,
    pub title_english: Option<String>,
    pub title_japanese: Option<String>,
    #[serde(default)]
    pub images: AnimeImages,
    pub episodes: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub score: Option<f32>,
    pub rank: Option<u32>,
    #[serde(rename = "type")]
    pub anime_type: Option<String>,
    pub status: Option<String>,
    pub synopsis: Option<String>,
    #[serde(default)]
    pub studios: Vec<Studio>,
    pub aired: Option<Aired>,
    pub trailer: Option<Trailer>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Studio {
    pub mal_id: Option<i32>,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Aired {
    pub from: Option<String>,
    pub to: Option<String>,
    /// Preformatted range, e.g. "Sep 29, 2023 to Mar 22, 2024".
    pub string: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Trailer {
    pub youtube_id: Option<String>,
    pub url: Option<String>,
    pub embed_url: Option<String>,
}

impl CatalogAnime {
    #[must_use]
    pub const fn id(&self) -> AnimeId {
        AnimeId::new(self.mal_id)
    }

    /// The fields the watched list keeps.
    #[must_use]
    pub fn to_catalog_data(&self) -> CatalogData {
        CatalogData {
            id: self.id(),
            title: self.title.clone(),
            title_english: self.title_english.clone(),
            images: self.images.clone(),
            episodes: self.episodes,
            genres: self.genres.clone(),
        }
    }

    #[must_use]
    pub fn trailer_url(&self) -> Option<&str> {
        self.trailer.as_ref().and_then(|t| t.url.as_deref())
    }

    #[must_use]
    pub fn aired_range(&self) -> Option<&str> {
        self.aired.as_ref().and_then(|a| a.string.as_deref())
    }

    #[must_use]
    pub fn studio_names(&self) -> Vec<&str> {
        self.studios.iter().map(|s| s.name.as_str()).collect()
    }

    #[must_use]
    pub fn genre_names(&self) -> Vec<&str> {
        self.genres.iter().map(|g| g.name.as_str()).collect()
    }
}

#[derive(Clone)]
pub struct JikanClient {
    client: Client,
    base_url: String,
}

impl JikanClient {
    pub fn with_config(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let base_url = base_url.trim_end_matches('/');
        if base_url.is_empty() {
            return Err(CatalogError::Config("base URL is empty".to_string()));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_data<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>, CatalogError> {
        debug!(url, "Jikan request");
        let response = self.client.get(url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status { status, body });
        }

        let response: JikanResponse<T> = response.json().await?;
        Ok(Some(response.data))
    }
}

#[async_trait::async_trait]
impl CatalogProvider for JikanClient {
    #[instrument(skip(self))]
    async fn fetch_top(&self, limit: u32) -> Result<Vec<CatalogAnime>, CatalogError> {
        let url = format!("{}/top/anime?limit={}", self.base_url, limit);
        Ok(self.get_data(&url).await?.unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn search_by_title(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<CatalogAnime>, CatalogError> {
        let url = format!(
            "{}/anime?q={}&limit={}",
            self.base_url,
            urlencoding::encode(query),
            limit
        );
        Ok(self.get_data(&url).await?.unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn fetch_by_id(&self, id: AnimeId) -> Result<Option<CatalogAnime>, CatalogError> {
        let url = format!("{}/anime/{}/full", self.base_url, id);
        self.get_data(&url).await
    }

    #[instrument(skip(self))]
    async fn fetch_gallery(&self, id: AnimeId) -> Result<Vec<AnimeImages>, CatalogError> {
        let url = format!("{}/anime/{}/pictures", self.base_url, id);
        Ok(self.get_data(&url).await?.unwrap_or_default())
    }
}
