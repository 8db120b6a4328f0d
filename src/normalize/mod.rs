pub mod channel;
pub mod hostaway;
pub mod places;
pub mod timestamp;

use crate::domain::Review;
use crate::upstream::HostawayReview;
use thiserror::Error;

pub use hostaway::normalize_hostaway;
pub use places::{normalize_place_review, normalize_place_reviews};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("record has no id")]
    MissingId,
}

/// Normalize a whole batch; records that cannot be normalized are
/// logged and skipped rather than aborting the batch.
pub fn normalize_hostaway_batch(raws: &[HostawayReview]) -> Vec<Review> {
    raws.iter()
        .enumerate()
        .filter_map(|(index, raw)| match normalize_hostaway(raw) {
            Ok(review) => Some(review),
            Err(e) => {
                tracing::warn!(
                    index,
                    listing = raw.listing_name.as_deref().unwrap_or(""),
                    error = %e,
                    "skipping hostaway record"
                );
                None
            }
        })
        .collect()
}
