use crate::domain::AnimeId;
use crate::models::WatchedUpdate;
use crate::services::watch_form;
use crate::store::{KeyValueStore, WatchedStore, progress_percentage};

use super::warn_if_unsaved;

pub fn cmd_update_anime<S: KeyValueStore>(
    store: &mut WatchedStore<S>,
    id: AnimeId,
    update: WatchedUpdate,
) -> anyhow::Result<()> {
    let Some(entry) = store.get(id) else {
        println!("Anime with ID {id} is not in your watched list.");
        println!("Use 'anisearch list' to see IDs.");
        return Ok(());
    };

    if update.is_empty() {
        println!("Nothing to update. Pass --status, --episodes, --rating or --notes.");
        return Ok(());
    }

    if let Err(e) = watch_form::validate_update(&update, entry.total_episodes) {
        println!("Invalid input: {e}");
        return Ok(());
    }

    store.update(id, update);

    if let Some(entry) = store.get(id) {
        println!("✓ Updated: {}", entry.title);
        println!(
            "  Status: {} | Progress: {}% | Rating: {}",
            entry.status,
            progress_percentage(entry.episodes_watched, entry.total_episodes),
            entry.rating
        );
    }

    warn_if_unsaved(store);

    Ok(())
}
