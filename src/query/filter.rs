use crate::domain::Review;
use chrono::{DateTime, TimeDelta, Utc};

/// Independent predicates; every active one must hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    pub min_rating: Option<f64>,
    pub channel: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub timeframe_days: Option<u32>,
    pub approved_only: bool,
}

impl FilterOptions {
    pub fn is_empty(&self) -> bool {
        *self == FilterOptions::default()
    }

    fn matches(&self, review: &Review, since: Option<DateTime<Utc>>) -> bool {
        if let Some(min) = self.min_rating {
            if review.rating < min {
                return false;
            }
        }
        if let Some(channel) = &self.channel {
            if review.channel.as_str() != channel {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if !review.categories.contains_key(category) {
                return false;
            }
        }
        if let Some(start) = self.start_date {
            if review.submitted_at < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if review.submitted_at > end {
                return false;
            }
        }
        if let Some(since) = since {
            if review.submitted_at < since {
                return false;
            }
        }
        !self.approved_only || review.approved
    }
}

/// Keeps the reviews matching `options`, in their original order.
/// `now` anchors the `timeframe_days` window.
pub fn filter_reviews(reviews: &[Review], options: &FilterOptions, now: DateTime<Utc>) -> Vec<Review> {
    // a window reaching past the representable range covers everything
    let since = options
        .timeframe_days
        .and_then(|days| TimeDelta::try_days(i64::from(days)))
        .and_then(|window| now.checked_sub_signed(window));

    reviews
        .iter()
        .filter(|review| options.matches(review, since))
        .cloned()
        .collect()
}
