use crate::models::WatchStatus;
use crate::store::{KeyValueStore, WatchedStats, WatchedStore};

pub fn cmd_stats<S: KeyValueStore>(store: &WatchedStore<S>) -> anyhow::Result<()> {
    let stats = WatchedStats::collect(store.entries());

    println!("Watched List Stats");
    println!("{:-<40}", "");
    println!("Total:            {}", stats.total);
    for status in WatchStatus::ALL {
        println!("{:<18}{}", format!("{}:", status.label()), stats.count(status));
    }
    println!("Episodes watched: {}", stats.episodes_watched);
    match stats.mean_rating {
        Some(mean) => println!("Mean rating:      {mean:.2}/10"),
        None => println!("Mean rating:      -"),
    }

    Ok(())
}
