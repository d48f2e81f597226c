pub mod jikan;

pub use jikan::{CatalogAnime, CatalogError, CatalogProvider, JikanClient};
