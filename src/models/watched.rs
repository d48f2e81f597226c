use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::AnimeId;
use crate::models::anime::{AnimeImages, CatalogData, Genre};

/// Where the user is with a tracked anime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WatchStatus {
    #[default]
    Watching,
    Completed,
    #[serde(rename = "On Hold", alias = "OnHold")]
    OnHold,
    Dropped,
}

impl WatchStatus {
    pub const ALL: [Self; 4] = [Self::Watching, Self::Completed, Self::OnHold, Self::Dropped];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Watching => "Watching",
            Self::Completed => "Completed",
            Self::OnHold => "On Hold",
            Self::Dropped => "Dropped",
        }
    }

    /// Human readable label used by filter pickers.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Watching => "Currently Watching",
            Self::Completed => "Completed",
            Self::OnHold => "On Hold",
            Self::Dropped => "Dropped",
        }
    }
}

impl fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown watch status: {0} (expected watching, completed, on-hold or dropped)")]
pub struct UnknownStatus(pub String);

impl FromStr for WatchStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "watching" => Ok(Self::Watching),
            "completed" => Ok(Self::Completed),
            "onhold" => Ok(Self::OnHold),
            "dropped" => Ok(Self::Dropped),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// One tracked anime in the watched list.
///
/// Field names on disk are camelCase. The aliases accept the snake_case
/// names written by the unversioned list format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchedEntry {
    #[serde(alias = "mal_id")]
    pub id: AnimeId,
    pub title: String,
    #[serde(default, alias = "title_english")]
    pub title_english: Option<String>,
    #[serde(default)]
    pub images: AnimeImages,
    #[serde(default, alias = "episodes")]
    pub total_episodes: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub status: WatchStatus,
    #[serde(default)]
    pub episodes_watched: u32,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub notes: String,
    pub date_added: DateTime<Utc>,
    pub last_watched_date: DateTime<Utc>,
}

impl WatchedEntry {
    /// Builds an entry from catalog fields, filling unset watch fields with
    /// their defaults and `now`.
    #[must_use]
    pub fn from_catalog(catalog: &CatalogData, watch: WatchData, now: DateTime<Utc>) -> Self {
        Self {
            id: catalog.id,
            title: catalog.title.clone(),
            title_english: catalog.title_english.clone(),
            images: catalog.images.clone(),
            total_episodes: catalog.episodes,
            genres: catalog.genres.clone(),
            status: watch.status.unwrap_or_default(),
            episodes_watched: watch.episodes_watched.unwrap_or(0),
            rating: watch.rating.unwrap_or(0.0),
            notes: watch.notes.unwrap_or_default(),
            date_added: watch.date_added.unwrap_or(now),
            last_watched_date: watch.last_watched_date.unwrap_or(now),
        }
    }

    /// Applies every field set in `update`. Does not touch `last_watched_date`.
    pub fn apply(&mut self, update: WatchedUpdate) {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(episodes) = update.episodes_watched {
            self.episodes_watched = episodes;
        }
        if let Some(rating) = update.rating {
            self.rating = rating;
        }
        if let Some(notes) = update.notes {
            self.notes = notes;
        }
    }

    #[must_use]
    pub fn is_rated(&self) -> bool {
        self.rating > 0.0
    }
}

/// Optional watch fields supplied when an anime is added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WatchData {
    pub status: Option<WatchStatus>,
    pub episodes_watched: Option<u32>,
    pub rating: Option<f32>,
    pub notes: Option<String>,
    pub date_added: Option<DateTime<Utc>>,
    pub last_watched_date: Option<DateTime<Utc>>,
}

impl WatchData {
    #[must_use]
    pub fn with_status(status: WatchStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// Partial edit of a tracked entry. `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WatchedUpdate {
    pub status: Option<WatchStatus>,
    pub episodes_watched: Option<u32>,
    pub rating: Option<f32>,
    pub notes: Option<String>,
}

impl WatchedUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.episodes_watched.is_none()
            && self.rating.is_none()
            && self.notes.is_none()
    }
}
