use crate::domain::review::MAX_RATING;
use crate::domain::{slugify, Channel, Review, ReviewStatus};
use crate::normalize::timestamp::from_unix_seconds;
use crate::upstream::{PlaceMatch, PlaceReview};
use std::collections::BTreeMap;

/// Converts one places-provider review into the canonical shape.
///
/// `listing_name` is the display name the place was searched with, so
/// these reviews group with the listing's other reviews. The 1-5 star
/// scale already matches the canonical one and passes through.
pub fn normalize_place_review(raw: &PlaceReview, listing_name: &str, place_id: &str) -> Review {
    let guest_name = raw.reviewer_name.clone().unwrap_or_default();
    let time = raw.time.unwrap_or(0);

    Review {
        id: place_review_id(place_id, time, &guest_name),
        listing_id: slugify(listing_name),
        listing_name: listing_name.to_string(),
        review: raw.text.clone().unwrap_or_default(),
        rating: raw.rating.unwrap_or(0.0).clamp(0.0, MAX_RATING),
        categories: BTreeMap::new(),
        channel: Channel::Google,
        submitted_at: from_unix_seconds(time),
        approved: false,
        status: ReviewStatus::Published,
        guest_name,
    }
}

/// Normalizes a whole batch for one resolved (or unresolved) place.
pub fn normalize_place_reviews(
    raws: &[PlaceReview],
    listing_name: &str,
    place: Option<&PlaceMatch>,
) -> Vec<Review> {
    let place_id = place.map(|p| p.place_id.as_str()).unwrap_or("unresolved");
    raws.iter()
        .map(|raw| normalize_place_review(raw, listing_name, place_id))
        .collect()
}

/// Places reviews carry no id of their own: scope one from the place,
/// the submission second and the reviewer.
fn place_review_id(place_id: &str, time: i64, reviewer: &str) -> String {
    let reviewer = slugify(reviewer);
    let reviewer = if reviewer.is_empty() { "anonymous" } else { reviewer.as_str() };
    format!("google:{}:{}:{}", place_id.trim(), time, reviewer)
}
