use serde::{Deserialize, Serialize};

use crate::domain::AnimeId;

/// Image URLs for one encoding as returned by the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large_image_url: Option<String>,
}

/// Poster images of an anime, kept exactly as the catalog shaped them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimeImages {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jpg: Option<ImageUrls>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webp: Option<ImageUrls>,
}

impl AnimeImages {
    /// Thumbnail URL, preferring jpg over webp.
    #[must_use]
    pub fn thumbnail(&self) -> Option<&str> {
        [self.jpg.as_ref(), self.webp.as_ref()]
            .into_iter()
            .flatten()
            .find_map(|urls| urls.small_image_url.as_deref().or(urls.image_url.as_deref()))
    }

    /// Largest available URL, preferring jpg over webp.
    #[must_use]
    pub fn large(&self) -> Option<&str> {
        [self.jpg.as_ref(), self.webp.as_ref()]
            .into_iter()
            .flatten()
            .find_map(|urls| urls.large_image_url.as_deref().or(urls.image_url.as_deref()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mal_id: Option<i32>,
    pub name: String,
}

impl Genre {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            mal_id: None,
            name: name.into(),
        }
    }
}

/// The subset of a catalog record needed to start tracking an anime.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogData {
    pub id: AnimeId,
    pub title: String,
    pub title_english: Option<String>,
    pub images: AnimeImages,
    pub episodes: Option<u32>,
    pub genres: Vec<Genre>,
}

impl CatalogData {
    pub fn new(id: impl Into<AnimeId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            title_english: None,
            images: AnimeImages::default(),
            episodes: None,
            genres: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_episodes(mut self, episodes: u32) -> Self {
        self.episodes = Some(episodes);
        self
    }

    #[must_use]
    pub fn with_title_english(mut self, title: impl Into<String>) -> Self {
        self.title_english = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_genres(mut self, genres: Vec<Genre>) -> Self {
        self.genres = genres;
        self
    }
}
