use crate::store::{KeyValueStore, WatchedStore};

use super::{confirm, warn_if_unsaved};

pub fn cmd_clear<S: KeyValueStore>(store: &mut WatchedStore<S>, yes: bool) -> anyhow::Result<()> {
    if store.is_empty() {
        println!("Your watched list is already empty.");
        return Ok(());
    }

    let count = store.len();
    if !yes && !confirm(&format!("Remove all {count} entries from your watched list?"))? {
        println!("Cancelled.");
        return Ok(());
    }

    store.clear();
    println!("✓ Cleared {count} entries.");

    warn_if_unsaved(store);

    Ok(())
}
