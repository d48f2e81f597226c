pub mod anime;
pub mod watched;

pub use anime::{AnimeImages, CatalogData, Genre, ImageUrls};
pub use watched::{UnknownStatus, WatchData, WatchStatus, WatchedEntry, WatchedUpdate};
