use crate::clients::CatalogProvider;
use crate::config::Config;
use crate::store::{KeyValueStore, WatchedStore};

use super::print_catalog_line;

pub async fn cmd_top_anime<S: KeyValueStore>(
    config: &Config,
    catalog: &dyn CatalogProvider,
    store: &WatchedStore<S>,
    limit: Option<u32>,
) -> anyhow::Result<()> {
    let limit = limit.unwrap_or(config.catalog.top_limit);
    let results = catalog.fetch_top(limit).await?;

    if results.is_empty() {
        println!("The catalog returned no top anime.");
        return Ok(());
    }

    println!("Top Anime");
    println!("{:-<60}", "");

    for (i, anime) in results.iter().enumerate() {
        let rank = anime.rank.map_or(i + 1, |r| r as usize);
        print_catalog_line(anime, store, &format!("#{rank}"));
    }

    println!("Show details with: anisearch info <id>");

    Ok(())
}
