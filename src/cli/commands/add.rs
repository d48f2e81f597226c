use tracing::info;

use crate::clients::CatalogProvider;
use crate::domain::AnimeId;
use crate::models::WatchData;
use crate::services::watch_form;
use crate::store::{KeyValueStore, WatchedStore};

use super::warn_if_unsaved;

pub async fn cmd_add_anime<S: KeyValueStore>(
    catalog: &dyn CatalogProvider,
    store: &mut WatchedStore<S>,
    id: AnimeId,
    watch: WatchData,
) -> anyhow::Result<()> {
    let Some(anime) = catalog.fetch_by_id(id).await? else {
        println!("Anime with ID {id} not found in the catalog.");
        return Ok(());
    };

    if let Err(e) = watch_form::validate_watch_data(&watch, anime.episodes) {
        println!("Invalid input: {e}");
        return Ok(());
    }

    let replaced = store.exists(id);
    let entry = store.upsert(&anime.to_catalog_data(), watch);
    info!(id = %entry.id, replaced, "Tracked anime");

    println!();
    if replaced {
        println!("✓ Replaced: {} (ID: {})", entry.title, entry.id);
    } else {
        println!("✓ Added: {} (ID: {})", entry.title, entry.id);
    }
    println!(
        "  Episodes: {}/{}",
        entry.episodes_watched,
        entry
            .total_episodes
            .map_or_else(|| "?".to_string(), |e| e.to_string())
    );
    println!("  Status: {}", entry.status);

    warn_if_unsaved(store);

    Ok(())
}
