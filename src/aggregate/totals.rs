use crate::aggregate::grouping::category_averages;
use crate::domain::review::{mean, round1};
use crate::domain::{Channel, Review, Totals};
use std::collections::BTreeMap;

/// Fleet-wide sums and means over every review. Empty input gives zeros.
pub fn build_totals(reviews: &[Review]) -> Totals {
    let total_reviews = reviews.len();
    let approved_count = reviews.iter().filter(|r| r.approved).count();

    let mut channel_breakdown: BTreeMap<Channel, usize> = BTreeMap::new();
    for review in reviews {
        *channel_breakdown.entry(review.channel).or_insert(0) += 1;
    }

    Totals {
        total_reviews,
        avg_rating: mean(reviews.iter().map(|r| r.rating))
            .map(round1)
            .unwrap_or(0.0),
        approved_count,
        pending_count: total_reviews - approved_count,
        channel_breakdown,
        category_averages: category_averages(reviews)
            .into_iter()
            .map(|(category, avg)| (category, round1(avg)))
            .collect(),
    }
}
