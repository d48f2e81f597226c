//! The watched list: the user's tracked anime, mirrored to a key-value store.
//!
//! Every mutation rewrites the whole list under [`WATCHED_KEY`]. Reads are
//! served from memory. When the backend refuses a write the in-memory list
//! stays authoritative for the rest of the session and the failure is logged.

pub mod backend;
pub mod views;

pub use backend::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use views::{
    SortKey, StatusFilter, WatchedFilter, WatchedStats, filter_by, format_date,
    progress_percentage, sort_by, sort_by_key_name,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::domain::AnimeId;
use crate::models::{CatalogData, WatchData, WatchedEntry, WatchedUpdate};

/// Storage key holding the serialized watched list.
pub const WATCHED_KEY: &str = "anisearch_watched_anime";

/// Current on-disk format version.
pub const WATCHED_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct WatchedFileRef<'a> {
    version: u32,
    entries: &'a [WatchedEntry],
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WatchedFile {
    Versioned {
        version: u32,
        entries: Vec<WatchedEntry>,
    },
    /// The unversioned format: a bare array of entries.
    Legacy(Vec<WatchedEntry>),
}

/// Why a stored list could not be read.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Malformed watched list: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Watched list format version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}

/// Serializes `entries` in the current format.
pub fn encode_entries(entries: &[WatchedEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&WatchedFileRef {
        version: WATCHED_FORMAT_VERSION,
        entries,
    })
}

/// Parses a stored list, migrating the unversioned array format.
pub fn decode_entries(raw: &str) -> Result<Vec<WatchedEntry>, DecodeError> {
    match serde_json::from_str::<WatchedFile>(raw)? {
        WatchedFile::Versioned { version, entries } if version <= WATCHED_FORMAT_VERSION => {
            Ok(entries)
        }
        WatchedFile::Versioned { version, .. } => Err(DecodeError::UnsupportedVersion {
            found: version,
            supported: WATCHED_FORMAT_VERSION,
        }),
        WatchedFile::Legacy(entries) => {
            info!(
                count = entries.len(),
                "Migrating unversioned watched list to version {WATCHED_FORMAT_VERSION}"
            );
            Ok(entries)
        }
    }
}

/// Source of "now" for timestamps.
pub type Clock = fn() -> DateTime<Utc>;

/// The user's watched list.
///
/// Construct one with [`WatchedStore::open`] and hand it to whatever needs it.
///
/// ```rust
/// use anisearch::models::{CatalogData, WatchData};
/// use anisearch::store::{MemoryStore, WatchedStore};
///
/// let mut store = WatchedStore::open(MemoryStore::new());
/// store.upsert(&CatalogData::new(52991, "Sousou no Frieren"), WatchData::default());
/// assert!(store.exists(52991.into()));
/// ```
pub struct WatchedStore<S: KeyValueStore> {
    backend: S,
    entries: Vec<WatchedEntry>,
    clock: Clock,
    last_write_error: Option<String>,
}

impl<S: KeyValueStore> WatchedStore<S> {
    /// Loads the list from `backend`. A missing or unreadable value yields an
    /// empty list.
    pub fn open(backend: S) -> Self {
        Self::open_with_clock(backend, Utc::now)
    }

    pub fn open_with_clock(backend: S, clock: Clock) -> Self {
        let entries = match backend.get(WATCHED_KEY) {
            Ok(Some(raw)) if raw.trim().is_empty() => Vec::new(),
            Ok(Some(raw)) => match decode_entries(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(error = %e, "Ignoring unreadable watched list, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read watched list, starting empty");
                Vec::new()
            }
        };

        debug!(count = entries.len(), "Loaded watched list");

        Self {
            backend,
            entries,
            clock,
            last_write_error: None,
        }
    }

    /// Adds `catalog` to the list, replacing any entry with the same id.
    /// The new entry goes to the end of insertion order.
    pub fn upsert(&mut self, catalog: &CatalogData, watch: WatchData) -> &WatchedEntry {
        let entry = WatchedEntry::from_catalog(catalog, watch, (self.clock)());
        self.entries.retain(|e| e.id != entry.id);
        self.entries.push(entry);
        self.persist();

        let last = self.entries.len() - 1;
        &self.entries[last]
    }

    /// Merges `update` into the entry with `id` and stamps `last_watched_date`.
    ///
    /// Values are taken as given: range checks belong to the caller.
    /// Returns `false` when no entry has `id`.
    pub fn update(&mut self, id: AnimeId, update: WatchedUpdate) -> bool {
        let now = (self.clock)();
        let found = match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.apply(update);
                entry.last_watched_date = now;
                true
            }
            None => false,
        };
        self.persist();
        found
    }

    pub fn remove(&mut self, id: AnimeId) -> Option<WatchedEntry> {
        let removed = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .map(|index| self.entries.remove(index));
        self.persist();
        removed
    }

    #[must_use]
    pub fn get(&self, id: AnimeId) -> Option<&WatchedEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn exists(&self, id: AnimeId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    /// The list in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[WatchedEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Message of the most recent failed write, cleared by the next good one.
    #[must_use]
    pub fn last_write_error(&self) -> Option<&str> {
        self.last_write_error.as_deref()
    }

    #[must_use]
    pub const fn backend(&self) -> &S {
        &self.backend
    }

    fn persist(&mut self) {
        let result = encode_entries(&self.entries)
            .map_err(|e| e.to_string())
            .and_then(|raw| {
                self.backend
                    .set(WATCHED_KEY, &raw)
                    .map_err(|e| e.to_string())
            });

        match result {
            Ok(()) => self.last_write_error = None,
            Err(e) => {
                error!(error = %e, count = self.entries.len(), "Failed to save watched list");
                self.last_write_error = Some(e);
            }
        }
    }
}
