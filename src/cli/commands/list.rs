//! List watched anime command handler

use tracing::warn;

use crate::store::{
    KeyValueStore, SortKey, StatusFilter, WatchedFilter, WatchedStore, filter_by,
    progress_percentage, sort_by_key_name,
};

pub fn cmd_list_watched<S: KeyValueStore>(
    store: &WatchedStore<S>,
    sort: &str,
    status: &str,
    search: Option<String>,
) -> anyhow::Result<()> {
    if store.is_empty() {
        println!("Your watched list is empty.");
        println!();
        println!("Find something with: anisearch search \"anime name\"");
        return Ok(());
    }

    let status: StatusFilter = status.parse()?;

    let sort_label = match sort.parse::<SortKey>() {
        Ok(key) => key.label(),
        Err(_) => {
            warn!(sort, "Unknown sort key, keeping insertion order");
            "Insertion Order"
        }
    };

    let filter = WatchedFilter {
        status,
        search_query: search,
    };
    let shown = sort_by_key_name(&filter_by(store.entries(), &filter), sort);

    println!("Watched Anime ({} total) - {sort_label}", store.len());
    println!("{:-<70}", "");

    for entry in &shown {
        let total = entry
            .total_episodes
            .map_or_else(|| "?".to_string(), |e| e.to_string());
        let progress = progress_percentage(entry.episodes_watched, entry.total_episodes);

        println!(
            "• {} [{}/{} eps, {}%]",
            entry.title, entry.episodes_watched, total, progress
        );

        let rating = if entry.is_rated() {
            format!("{}/10", entry.rating)
        } else {
            "unrated".to_string()
        };
        println!(
            "  ID: {} | Status: {} | Rating: {}",
            entry.id, entry.status, rating
        );
    }

    if shown.is_empty() {
        println!("No entries match the current filters.");
    }

    println!();
    println!("Showing {} of {} anime", shown.len(), store.len());

    Ok(())
}
