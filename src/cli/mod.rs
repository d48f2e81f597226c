//! CLI module - Command-line interface for anisearch
//!
//! Argument parsing with clap. The handlers live in [`commands`].

pub mod commands;

use clap::{Args, Parser, Subcommand};

use crate::domain::AnimeId;
use crate::models::{WatchData, WatchStatus, WatchedUpdate};

/// anisearch - Anime discovery and watch tracking
/// Browse the Jikan catalog and keep a personal watched list
#[derive(Parser)]
#[command(name = "anisearch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show top ranked anime
    #[command(alias = "t")]
    Top {
        /// Number of entries to show
        #[arg(long, short)]
        limit: Option<u32>,
    },

    /// Search the catalog by title
    #[command(alias = "s")]
    Search {
        /// Search query
        #[arg(required = true)]
        query: Vec<String>,
        /// Maximum number of results
        #[arg(long, short)]
        limit: Option<u32>,
    },

    /// Show catalog details for an anime
    #[command(alias = "i")]
    Info {
        /// Catalog (MyAnimeList) ID
        id: AnimeId,
        /// Also list gallery pictures
        #[arg(long)]
        gallery: bool,
    },

    /// Add an anime to the watched list (replaces an existing entry)
    #[command(alias = "a")]
    Add {
        /// Catalog (MyAnimeList) ID
        id: AnimeId,
        #[command(flatten)]
        watch: WatchArgs,
    },

    /// Edit status, progress, rating or notes of a watched entry
    #[command(alias = "u", alias = "edit")]
    Update {
        /// Catalog (MyAnimeList) ID
        id: AnimeId,
        #[command(flatten)]
        watch: WatchArgs,
    },

    /// Remove an anime from the watched list
    #[command(alias = "rm", alias = "r")]
    Remove {
        /// Catalog (MyAnimeList) ID
        id: AnimeId,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// List the watched list
    #[command(alias = "ls", alias = "l")]
    List {
        /// recently-watched, alphabetical, rating or date-added
        #[arg(long, default_value = "recently-watched")]
        sort: String,
        /// all, watching, completed, on-hold or dropped
        #[arg(long, default_value = "all")]
        status: String,
        /// Only titles containing this text
        #[arg(long)]
        search: Option<String>,
    },

    /// Show totals for the watched list
    Stats,

    /// Remove every entry from the watched list
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Create default config file
    Init,
}

/// Watch fields shared by `add` and `update`.
#[derive(Args, Debug, Clone, Default)]
pub struct WatchArgs {
    /// watching, completed, on-hold or dropped
    #[arg(long)]
    pub status: Option<WatchStatus>,
    /// Episodes watched so far
    #[arg(long, short)]
    pub episodes: Option<u32>,
    /// Rating from 0 to 10 in steps of 0.5
    #[arg(long, short)]
    pub rating: Option<f32>,
    /// Free text notes
    #[arg(long, short)]
    pub notes: Option<String>,
}

impl From<WatchArgs> for WatchData {
    fn from(args: WatchArgs) -> Self {
        Self {
            status: args.status,
            episodes_watched: args.episodes,
            rating: args.rating,
            notes: args.notes,
            ..Self::default()
        }
    }
}

impl From<WatchArgs> for WatchedUpdate {
    fn from(args: WatchArgs) -> Self {
        Self {
            status: args.status,
            episodes_watched: args.episodes,
            rating: args.rating,
            notes: args.notes,
        }
    }
}
