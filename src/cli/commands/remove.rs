use crate::domain::AnimeId;
use crate::store::{KeyValueStore, WatchedStore};

use super::{confirm, warn_if_unsaved};

pub fn cmd_remove_anime<S: KeyValueStore>(
    store: &mut WatchedStore<S>,
    id: AnimeId,
    yes: bool,
) -> anyhow::Result<()> {
    let Some(entry) = store.get(id) else {
        println!("Anime with ID {id} is not in your watched list.");
        return Ok(());
    };

    if !yes && !confirm(&format!("Remove '{}' (ID: {}) from your watched list?", entry.title, entry.id))? {
        println!("Cancelled.");
        return Ok(());
    }

    if let Some(removed) = store.remove(id) {
        println!("✓ Removed: {}", removed.title);
    }

    warn_if_unsaved(store);

    Ok(())
}
