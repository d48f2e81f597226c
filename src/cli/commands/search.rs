use crate::clients::CatalogProvider;
use crate::config::Config;
use crate::store::{KeyValueStore, WatchedStore};

use super::print_catalog_line;

pub async fn cmd_search_anime<S: KeyValueStore>(
    config: &Config,
    catalog: &dyn CatalogProvider,
    store: &WatchedStore<S>,
    query: &str,
    limit: Option<u32>,
) -> anyhow::Result<()> {
    println!("Searching for: {query}");

    let limit = limit.unwrap_or(config.catalog.search_limit);
    let results = catalog.search_by_title(query, limit).await?;

    if results.is_empty() {
        println!("No anime found matching '{query}'");
        return Ok(());
    }

    println!();
    println!("Search Results:");
    println!("{:-<60}", "");

    for anime in &results {
        print_catalog_line(anime, store, "•");
    }

    println!("To track an anime: anisearch add <id>");

    Ok(())
}
