//! Read-only views over a watched list snapshot.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::models::{UnknownStatus, WatchStatus, WatchedEntry};

/// Orderings offered for the watched list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    RecentlyWatched,
    Alphabetical,
    Rating,
    DateAdded,
}

impl SortKey {
    pub const ALL: [Self; 4] = [
        Self::RecentlyWatched,
        Self::Alphabetical,
        Self::Rating,
        Self::DateAdded,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RecentlyWatched => "recently-watched",
            Self::Alphabetical => "alphabetical",
            Self::Rating => "rating",
            Self::DateAdded => "date-added",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::RecentlyWatched => "Recently Watched",
            Self::Alphabetical => "Alphabetical Order",
            Self::Rating => "Highest Rated",
            Self::DateAdded => "Recently Added",
        }
    }

    fn compare(self, a: &WatchedEntry, b: &WatchedEntry) -> Ordering {
        match self {
            Self::RecentlyWatched => b.last_watched_date.cmp(&a.last_watched_date),
            Self::Alphabetical => locale_cmp(&a.title, &b.title),
            Self::Rating => b.rating.total_cmp(&a.rating),
            Self::DateAdded => b.date_added.cmp(&a.date_added),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown sort key: {0}")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownSortKey(s.to_string()))
    }
}

/// Title order ignoring accents and case first, then accents, then case.
///
/// On a case-only tie lowercase comes first, so `"akira"` precedes `"Akira"`.
fn locale_cmp(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| lowercase(a).cmp(lowercase(b)))
        .then_with(|| b.cmp(a))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn lowercase(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

/// Returns `entries` ordered by `key`. The sort is stable.
#[must_use]
pub fn sort_by(entries: &[WatchedEntry], key: SortKey) -> Vec<WatchedEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| key.compare(a, b));
    sorted
}

/// Like [`sort_by`] but keyed by name. Unknown names keep the input order.
#[must_use]
pub fn sort_by_key_name(entries: &[WatchedEntry], key: &str) -> Vec<WatchedEntry> {
    match key.parse::<SortKey>() {
        Ok(key) => sort_by(entries, key),
        Err(_) => entries.to_vec(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(WatchStatus),
}

impl StatusFilter {
    #[must_use]
    pub fn matches(&self, status: WatchStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() || s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

impl From<Option<WatchStatus>> for StatusFilter {
    fn from(status: Option<WatchStatus>) -> Self {
        status.map_or(Self::All, Self::Only)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchedFilter {
    pub status: StatusFilter,
    pub search_query: Option<String>,
}

impl WatchedFilter {
    #[must_use]
    pub fn matches(&self, entry: &WatchedEntry) -> bool {
        if !self.status.matches(entry.status) {
            return false;
        }

        match self.search_query.as_deref() {
            Some(query) if !query.is_empty() => entry
                .title
                .to_lowercase()
                .contains(&query.to_lowercase()),
            _ => true,
        }
    }
}

/// Entries passing both the status and the title filter.
#[must_use]
pub fn filter_by(entries: &[WatchedEntry], filter: &WatchedFilter) -> Vec<WatchedEntry> {
    entries
        .iter()
        .filter(|entry| filter.matches(entry))
        .cloned()
        .collect()
}

/// Share of episodes watched, rounded to a whole percent.
///
/// Unknown or zero totals give 0. The result is not capped at 100.
///
/// ```
/// # use anisearch::store::progress_percentage;
/// assert_eq!(progress_percentage(5, Some(10)), 50);
/// assert_eq!(progress_percentage(12, Some(10)), 120);
/// assert_eq!(progress_percentage(3, None), 0);
/// ```
#[must_use]
pub fn progress_percentage(episodes_watched: u32, total_episodes: Option<u32>) -> u32 {
    match total_episodes {
        Some(total) if total > 0 => {
            let ratio = f64::from(episodes_watched) / f64::from(total) * 100.0;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let percent = ratio.round() as u32;
            percent
        }
        _ => 0,
    }
}

/// Totals for a watched list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WatchedStats {
    pub total: usize,
    pub watching: usize,
    pub completed: usize,
    pub on_hold: usize,
    pub dropped: usize,
    pub episodes_watched: u64,
    /// Mean over rated entries only; `None` when nothing is rated.
    pub mean_rating: Option<f32>,
}

impl WatchedStats {
    #[must_use]
    pub fn collect(entries: &[WatchedEntry]) -> Self {
        let mut stats = Self {
            total: entries.len(),
            ..Self::default()
        };
        let mut rating_sum = 0.0_f64;
        let mut rated = 0_u32;

        for entry in entries {
            match entry.status {
                WatchStatus::Watching => stats.watching += 1,
                WatchStatus::Completed => stats.completed += 1,
                WatchStatus::OnHold => stats.on_hold += 1,
                WatchStatus::Dropped => stats.dropped += 1,
            }
            stats.episodes_watched += u64::from(entry.episodes_watched);
            if entry.is_rated() {
                rating_sum += f64::from(entry.rating);
                rated += 1;
            }
        }

        if rated > 0 {
            #[allow(clippy::cast_possible_truncation)]
            let mean = (rating_sum / f64::from(rated)) as f32;
            stats.mean_rating = Some(mean);
        }

        stats
    }

    #[must_use]
    pub const fn count(&self, status: WatchStatus) -> usize {
        match status {
            WatchStatus::Watching => self.watching,
            WatchStatus::Completed => self.completed,
            WatchStatus::OnHold => self.on_hold,
            WatchStatus::Dropped => self.dropped,
        }
    }
}

/// Short display date, e.g. `Oct 16, 2026`.
#[must_use]
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}
