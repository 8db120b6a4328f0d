use crate::domain::review::mean;
use crate::domain::{ListingInsights, Review, Trend};
use std::collections::BTreeMap;

/// Minimum number of reviews before a trend is reported.
pub const TREND_MIN_REVIEWS: usize = 4;
/// Cohort mean difference beyond which the trend is not `Stable`.
pub const TREND_THRESHOLD: f64 = 0.2;

/// Per-listing analytics from its reviews and category averages.
pub fn compute_insights(reviews: &[Review], category_averages: &BTreeMap<String, f64>) -> ListingInsights {
    // stable sort: ties keep key order, so the first tied key is "top"
    // and the last tied key is "lowest"
    let mut ranked: Vec<(&String, f64)> = category_averages.iter().map(|(k, v)| (k, *v)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let approved = reviews.iter().filter(|r| r.approved).count();
    let approval_rate = if reviews.is_empty() {
        0.0
    } else {
        approved as f64 / reviews.len() as f64
    };

    ListingInsights {
        top_category: ranked.first().map(|(k, _)| k.to_string()),
        lowest_category: ranked.last().map(|(k, _)| k.to_string()),
        approval_rate,
        recent_trend: compute_recent_trend(reviews),
    }
}

/// Compares the earliest third of reviews against the latest third.
///
/// Needs at least four reviews. After sorting by submission time the
/// first `max(1, n / 3)` reviews form the older cohort and the last
/// `max(1, n / 3)` the recent one; the middle is ignored.
pub fn compute_recent_trend(reviews: &[Review]) -> Trend {
    if reviews.len() < TREND_MIN_REVIEWS {
        return Trend::Stable;
    }

    let mut sorted: Vec<&Review> = reviews.iter().collect();
    sorted.sort_by_key(|r| r.submitted_at);

    let chunk = (sorted.len() / 3).max(1);
    let older = &sorted[..chunk];
    let recent = &sorted[sorted.len() - chunk..];

    let older_avg = mean(older.iter().map(|r| r.rating)).unwrap_or(0.0);
    let recent_avg = mean(recent.iter().map(|r| r.rating)).unwrap_or(0.0);
    let diff = recent_avg - older_avg;

    if diff > TREND_THRESHOLD {
        Trend::Improving
    } else if diff < -TREND_THRESHOLD {
        Trend::Declining
    } else {
        Trend::Stable
    }
}
