// src/normalize/hostaway.rs

use crate::domain::review::{mean, round1, MAX_CATEGORY_SCORE, MAX_RATING};
use crate::domain::{slugify, Review, ReviewStatus};
use crate::normalize::channel::resolve_channel;
use crate::normalize::timestamp::{epoch, parse_timestamp};
use crate::normalize::NormalizeError;
use crate::upstream::HostawayReview;
use std::collections::BTreeMap;

/// Converts one property-management record into the canonical shape.
///
/// Pure: no I/O, no ledger lookup, `approved` is always `false` here.
/// Missing or malformed optional fields are defaulted; only a missing id
/// rejects the record.
pub fn normalize_hostaway(raw: &HostawayReview) -> Result<Review, NormalizeError> {
    let id = raw
        .id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(NormalizeError::MissingId)?
        .to_string();

    let listing_name = raw.listing_name.clone().unwrap_or_default();
    let guest_name = raw.guest_name.clone().unwrap_or_default();

    let categories = build_categories(raw);
    let rating = match raw.rating {
        Some(raw10) => scale_ten_to_five(raw10),
        None => mean(categories.values().copied())
            .map(scale_ten_to_five)
            .unwrap_or(0.0),
    };

    let submitted_at = match raw.submitted_at.as_deref().and_then(parse_timestamp) {
        Some(dt) => dt,
        None => {
            tracing::warn!(
                review_id = %id,
                raw = ?raw.submitted_at,
                "unparseable submittedAt, using epoch"
            );
            epoch()
        }
    };

    Ok(Review {
        channel: resolve_channel(raw.channel.as_deref(), &listing_name, &guest_name, &id),
        listing_id: slugify(&listing_name),
        review: raw.public_review.clone().unwrap_or_default(),
        status: ReviewStatus::parse_or_default(raw.status.as_deref()),
        approved: false,
        id,
        listing_name,
        guest_name,
        rating,
        categories,
        submitted_at,
    })
}

/// `round((raw10 / 10) * 5, 1)`, clamped to the canonical scale.
fn scale_ten_to_five(raw10: f64) -> f64 {
    round1((raw10 / 10.0) * MAX_RATING).clamp(0.0, MAX_RATING)
}

/// Nameless or scoreless entries are dropped; repeated names keep the last score.
fn build_categories(raw: &HostawayReview) -> BTreeMap<String, f64> {
    raw.review_category
        .iter()
        .filter_map(|c| {
            let name = c.category.as_deref()?.trim();
            if name.is_empty() {
                return None;
            }
            let score = c.rating?.clamp(0.0, MAX_CATEGORY_SCORE);
            Some((name.to_string(), score))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Channel;
    use crate::upstream::models::HostawayCategory;

    fn category(name: &str, rating: f64) -> HostawayCategory {
        HostawayCategory {
            category: Some(name.to_string()),
            rating: Some(rating),
        }
    }

    fn raw(id: &str, rating: Option<f64>, cats: Vec<HostawayCategory>) -> HostawayReview {
        HostawayReview {
            id: Some(id.to_string()),
            review_type: Some("guest-to-host".to_string()),
            status: Some("published".to_string()),
            rating,
            public_review: Some("Lovely stay".to_string()),
            review_category: cats,
            submitted_at: Some("2020-08-21 22:45:14".to_string()),
            guest_name: Some("Shane Finkelstein".to_string()),
            listing_name: Some("2B N1 A - 29 Shoreditch Heights".to_string()),
            channel: None,
        }
    }

    #[test]
    fn scales_explicit_rating_to_five() {
        let review = normalize_hostaway(&raw("7454", Some(9.0), vec![])).unwrap();
        assert_eq!(review.id, "7454");
        assert_eq!(review.rating, 4.5);
        assert_eq!(review.listing_id, "2b-n1-a-29-shoreditch-heights");
        assert_eq!(review.submitted_at.to_rfc3339(), "2020-08-21T22:45:14+00:00");
        assert!(!review.approved);
    }

    #[test]
    fn derives_rating_from_categories_when_missing() {
        let review = normalize_hostaway(&raw(
            "7453",
            None,
            vec![category("cleanliness", 8.0), category("communication", 6.0)],
        ))
        .unwrap();
        assert_eq!(review.rating, 3.5);
        assert_eq!(review.categories.len(), 2);
        assert_eq!(review.categories["cleanliness"], 8.0);
    }

    #[test]
    fn no_rating_and_no_categories_is_zero() {
        let review = normalize_hostaway(&raw("1", None, vec![])).unwrap();
        assert_eq!(review.rating, 0.0);
        assert!(review.categories.is_empty());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let review = normalize_hostaway(&raw(
            "2",
            Some(14.0),
            vec![category("value", 12.0), category("location", -3.0)],
        ))
        .unwrap();
        assert_eq!(review.rating, 5.0);
        assert_eq!(review.categories["value"], 10.0);
        assert_eq!(review.categories["location"], 0.0);
    }

    #[test]
    fn malformed_fields_get_defaults() {
        let record = HostawayReview {
            id: Some("99".to_string()),
            review_category: vec![
                HostawayCategory {
                    category: None,
                    rating: Some(9.0),
                },
                HostawayCategory {
                    category: Some("cleanliness".to_string()),
                    rating: None,
                },
                category("value", 4.0),
                category("value", 6.0),
            ],
            status: Some("under-review".to_string()),
            submitted_at: Some("not a date".to_string()),
            ..Default::default()
        };

        let review = normalize_hostaway(&record).unwrap();
        assert_eq!(review.listing_name, "");
        assert_eq!(review.listing_id, "");
        assert_eq!(review.guest_name, "");
        assert_eq!(review.review, "");
        assert_eq!(review.status, ReviewStatus::Published);
        assert_eq!(review.submitted_at, epoch());
        assert_eq!(review.categories.len(), 1);
        assert_eq!(review.categories["value"], 6.0);
        assert_eq!(review.rating, 3.0);
    }

    #[test]
    fn missing_id_is_rejected() {
        let mut record = raw("", Some(8.0), vec![]);
        assert!(matches!(normalize_hostaway(&record), Err(NormalizeError::MissingId)));
        record.id = None;
        assert!(matches!(normalize_hostaway(&record), Err(NormalizeError::MissingId)));
    }

    #[test]
    fn explicit_channel_and_status_are_kept() {
        let mut record = raw("5", Some(6.0), vec![]);
        record.channel = Some("booking".to_string());
        record.status = Some("pending".to_string());

        let review = normalize_hostaway(&record).unwrap();
        assert_eq!(review.channel, Channel::Booking);
        assert_eq!(review.status, ReviewStatus::Pending);
    }

    #[test]
    fn normalizing_twice_is_identical() {
        let record = raw("7453", None, vec![category("cleanliness", 10.0)]);
        let a = normalize_hostaway(&record).unwrap();
        let b = normalize_hostaway(&record).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
