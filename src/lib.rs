pub mod cli;
pub mod clients;
pub mod config;
pub mod domain;
pub mod models;
pub mod services;
pub mod store;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::commands::{
    cmd_add_anime, cmd_anime_info, cmd_clear, cmd_list_watched, cmd_remove_anime,
    cmd_search_anime, cmd_stats, cmd_top_anime, cmd_update_anime,
};
use cli::{Cli, Commands};
use clients::JikanClient;
pub use config::Config;
use store::{FileStore, WatchedStore};

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load()?;
    init_tracing(&config);
    config.validate()?;

    if matches!(cli.command, Commands::Init) {
        if Config::create_default_if_missing()? {
            println!("✓ Created config.toml with default settings");
        } else {
            println!("config.toml already exists, leaving it untouched");
        }
        return Ok(());
    }

    let data_dir = config.data_dir()?;
    debug!(data_dir = %data_dir.display(), "Opening watched list");
    let mut store = WatchedStore::open(FileStore::new(data_dir));

    let catalog = JikanClient::with_config(&config.catalog.base_url, config.catalog.timeout())
        .context("Failed to create catalog client")?;
    info!(base_url = catalog.base_url(), "Catalog client ready");

    match cli.command {
        Commands::Top { limit } => cmd_top_anime(&config, &catalog, &store, limit).await,
        Commands::Search { query, limit } => {
            let query = query.join(" ");
            cmd_search_anime(&config, &catalog, &store, &query, limit).await
        }
        Commands::Info { id, gallery } => {
            cmd_anime_info(&config, &catalog, &store, id, gallery).await
        }
        Commands::Add { id, watch } => cmd_add_anime(&catalog, &mut store, id, watch.into()).await,
        Commands::Update { id, watch } => cmd_update_anime(&mut store, id, watch.into()),
        Commands::Remove { id, yes } => cmd_remove_anime(&mut store, id, yes),
        Commands::List {
            sort,
            status,
            search,
        } => cmd_list_watched(&store, &sort, &status, search),
        Commands::Stats => cmd_stats(&store),
        Commands::Clear { yes } => cmd_clear(&mut store, yes),
        Commands::Init => Ok(()),
    }
}

/// Logs go to stderr so command output stays pipeable.
fn init_tracing(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
