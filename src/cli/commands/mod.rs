mod add;
mod clear;
mod info;
mod list;
mod remove;
mod search;
mod stats;
mod top;
mod update;

pub use add::cmd_add_anime;
pub use clear::cmd_clear;
pub use info::cmd_anime_info;
pub use list::cmd_list_watched;
pub use remove::cmd_remove_anime;
pub use search::cmd_search_anime;
pub use stats::cmd_stats;
pub use top::cmd_top_anime;
pub use update::cmd_update_anime;

use std::io::Write;

use crate::clients::CatalogAnime;
use crate::store::{KeyValueStore, WatchedStore};

/// Asks a yes/no question on stdin. Anything but `y` is a no.
fn confirm(prompt: &str) -> anyhow::Result<bool> {
    println!("{prompt}");
    println!("Enter 'y' to confirm, anything else to cancel:");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Tells the user their last change only lives in memory.
fn warn_if_unsaved<S: KeyValueStore>(store: &WatchedStore<S>) {
    if let Some(err) = store.last_write_error() {
        println!("⚠ Could not save the watched list: {err}");
        println!("  The change will be lost when anisearch exits.");
    }
}

/// One catalog result in the compact list format shared by `top` and `search`.
fn print_catalog_line<S: KeyValueStore>(anime: &CatalogAnime, store: &WatchedStore<S>, prefix: &str) {
    let eps = anime
        .episodes
        .map_or_else(|| "? eps".to_string(), |e| format!("{e} eps"));
    let tracked = store
        .get(anime.id())
        .map(|entry| format!(" [{}]", entry.status))
        .unwrap_or_default();

    println!("{prefix} {} ({eps}){tracked}", anime.title);
    if let Some(en) = anime.title_english.as_deref()
        && !en.is_empty()
        && en != anime.title
    {
        println!("    EN: {en}");
    }

    let score = anime
        .score
        .map_or_else(|| "-".to_string(), |s| format!("{s:.2}"));
    println!(
        "    Score: {} | Type: {} | ID: {}",
        score,
        anime.anime_type.as_deref().unwrap_or("?"),
        anime.mal_id
    );
    println!();
}
