use crate::domain::review::{Channel, Review};
use serde::Serialize;
use std::collections::BTreeMap;

/// Direction of a listing's ratings, earliest cohort vs latest cohort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingInsights {
    pub top_category: Option<String>,
    pub lowest_category: Option<String>,
    /// Fraction of reviews approved, 0 for an empty listing.
    pub approval_rate: f64,
    pub recent_trend: Trend,
}

/// All reviews sharing one listing slug, plus their derived statistics.
/// Rebuilt on every request; never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingReviews {
    pub listing_id: String,
    /// First-seen raw name for this slug.
    pub listing_name: String,
    pub total_reviews: usize,
    pub avg_rating: f64,
    pub category_averages: BTreeMap<String, f64>,
    pub channels: Vec<Channel>,
    pub reviews: Vec<Review>,
    pub insights: ListingInsights,
}

/// Fleet-wide figures over every review regardless of listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_reviews: usize,
    pub avg_rating: f64,
    pub approved_count: usize,
    pub pending_count: usize,
    pub channel_breakdown: BTreeMap<Channel, usize>,
    pub category_averages: BTreeMap<String, f64>,
}
