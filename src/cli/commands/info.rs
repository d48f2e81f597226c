use tracing::warn;

use crate::clients::{CatalogAnime, CatalogProvider};
use crate::config::Config;
use crate::domain::AnimeId;
use crate::models::WatchedEntry;
use crate::store::{KeyValueStore, WatchedStore, format_date, progress_percentage};

const SYNOPSIS_CHARS: usize = 400;

pub async fn cmd_anime_info<S: KeyValueStore>(
    config: &Config,
    catalog: &dyn CatalogProvider,
    store: &WatchedStore<S>,
    id: AnimeId,
    gallery: bool,
) -> anyhow::Result<()> {
    let Some(anime) = catalog.fetch_by_id(id).await? else {
        println!("Anime with ID {id} not found in the catalog.");
        return Ok(());
    };

    display_details(&anime);

    println!();
    match store.get(id) {
        Some(entry) => display_watch_entry(entry),
        None => println!("Not in your watched list. Track it with: anisearch add {id}"),
    }

    if gallery {
        display_gallery(catalog, id, config.catalog.gallery_limit).await;
    }

    println!();
    Ok(())
}

fn display_details(anime: &CatalogAnime) {
    println!("Anime Info");
    println!("{:-<60}", "");
    println!("Title:    {}", anime.title);
    if let Some(en) = &anime.title_english {
        println!("English:  {en}");
    }
    if let Some(jp) = &anime.title_japanese {
        println!("Japanese: {jp}");
    }
    println!("ID:       {}", anime.mal_id);
    println!("Type:     {}", anime.anime_type.as_deref().unwrap_or("?"));
    println!(
        "Episodes: {}",
        anime
            .episodes
            .map_or_else(|| "?".to_string(), |e| e.to_string())
    );
    println!("Status:   {}", anime.status.as_deref().unwrap_or("?"));
    if let Some(score) = anime.score {
        println!("Score:    {score}/10");
    }
    if let Some(aired) = anime.aired_range() {
        println!("Aired:    {aired}");
    }

    let studios = anime.studio_names();
    if !studios.is_empty() {
        println!("Studios:  {}", studios.join(", "));
    }

    let genres = anime.genre_names();
    if !genres.is_empty() {
        println!("Genres:   {}", genres.join(", "));
    }

    if let Some(trailer) = anime.trailer_url() {
        println!("Trailer:  {trailer}");
    }

    if let Some(synopsis) = &anime.synopsis {
        let display_synopsis = if synopsis.chars().count() > SYNOPSIS_CHARS {
            let cut: String = synopsis.chars().take(SYNOPSIS_CHARS).collect();
            format!("{cut}...")
        } else {
            synopsis.clone()
        };
        println!();
        println!("{display_synopsis}");
    }
}

fn display_watch_entry(entry: &WatchedEntry) {
    println!("-- Your List --");
    println!("Status:   {}", entry.status);

    let total = entry
        .total_episodes
        .map_or_else(|| "?".to_string(), |e| e.to_string());
    println!(
        "Progress: {}/{} ({}%)",
        entry.episodes_watched,
        total,
        progress_percentage(entry.episodes_watched, entry.total_episodes)
    );

    if entry.is_rated() {
        println!("Rating:   {}/10", entry.rating);
    }
    if !entry.notes.is_empty() {
        println!("Notes:    {}", entry.notes);
    }
    println!("Added:    {}", format_date(&entry.date_added));
    println!("Updated:  {}", format_date(&entry.last_watched_date));
}

async fn display_gallery(catalog: &dyn CatalogProvider, id: AnimeId, limit: usize) {
    println!();
    match catalog.fetch_gallery(id).await {
        Ok(pictures) if !pictures.is_empty() => {
            println!("Gallery:");
            for url in pictures.iter().take(limit).filter_map(|p| p.large()) {
                println!("  {url}");
            }
        }
        Ok(_) => println!("Gallery:  none"),
        Err(e) => {
            warn!(error = %e, "Failed to fetch gallery");
            println!("Gallery:  (lookup failed)");
        }
    }
}
