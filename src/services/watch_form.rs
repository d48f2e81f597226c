//! Validation of user-entered watch progress.
//!
//! The watched list stores whatever it is given. Front ends run these checks
//! before calling [`WatchedStore::update`](crate::store::WatchedStore::update)
//! or [`WatchedStore::upsert`](crate::store::WatchedStore::upsert).

use thiserror::Error;

use crate::models::{WatchData, WatchedUpdate};

pub const MAX_RATING: f32 = 10.0;
pub const RATING_STEP: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Episodes should be between 0 and {}", total_label(.total.as_ref()))]
    EpisodesOutOfRange { watched: u32, total: Option<u32> },

    #[error("Rating should be between 0 and 10")]
    RatingOutOfRange(f32),

    #[error("Rating must be a multiple of 0.5")]
    RatingStep(f32),
}

fn total_label(total: Option<&u32>) -> String {
    total.map_or_else(|| "?".to_string(), ToString::to_string)
}

/// Checks an episode count against the known total.
pub const fn validate_episodes(watched: u32, total: Option<u32>) -> Result<(), ValidationError> {
    match total {
        Some(t) if t > 0 && watched > t => Err(ValidationError::EpisodesOutOfRange { watched, total }),
        _ => Ok(()),
    }
}

pub fn validate_rating(rating: f32) -> Result<(), ValidationError> {
    if !(0.0..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::RatingOutOfRange(rating));
    }

    let steps = rating / RATING_STEP;
    if (steps - steps.round()).abs() > f32::EPSILON {
        return Err(ValidationError::RatingStep(rating));
    }

    Ok(())
}

/// Validates an edit of an entry whose catalog total is `total_episodes`.
pub fn validate_update(
    update: &WatchedUpdate,
    total_episodes: Option<u32>,
) -> Result<(), ValidationError> {
    if let Some(watched) = update.episodes_watched {
        validate_episodes(watched, total_episodes)?;
    }
    if let Some(rating) = update.rating {
        validate_rating(rating)?;
    }
    Ok(())
}

/// Validates the watch fields given when an anime is first added.
pub fn validate_watch_data(
    data: &WatchData,
    total_episodes: Option<u32>,
) -> Result<(), ValidationError> {
    if let Some(watched) = data.episodes_watched {
        validate_episodes(watched, total_episodes)?;
    }
    if let Some(rating) = data.rating {
        validate_rating(rating)?;
    }
    Ok(())
}
