// src/domain/review.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Upper bound of the canonical overall rating scale.
pub const MAX_RATING: f64 = 5.0;
/// Upper bound of a category sub-score.
pub const MAX_CATEGORY_SCORE: f64 = 10.0;

/// Platform a review originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Airbnb,
    Booking,
    Direct,
    Google,
}

impl Channel {
    /// Channels a property-management record can be attributed to when the
    /// upstream payload does not say. Google reviews never come through that source.
    pub const INFERABLE: [Channel; 3] = [Channel::Airbnb, Channel::Booking, Channel::Direct];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Airbnb => "airbnb",
            Channel::Booking => "booking",
            Channel::Direct => "direct",
            Channel::Google => "google",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "airbnb" => Some(Channel::Airbnb),
            "booking" | "booking.com" | "bookingcom" => Some(Channel::Booking),
            "direct" => Some(Channel::Direct),
            "google" => Some(Channel::Google),
            _ => None,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Moderation state reported by the upstream source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Published,
    Pending,
    Rejected,
}

impl ReviewStatus {
    /// Unrecognized or missing values count as published.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("pending") => ReviewStatus::Pending,
            Some("rejected") => ReviewStatus::Rejected,
            _ => ReviewStatus::Published,
        }
    }
}

/// Canonical review shape every source adapter produces.
///
/// `rating` is on the 0-5 scale; `categories` holds 0-10 sub-scores.
/// `submitted_at` serializes as an RFC 3339 instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub listing_id: String,
    pub listing_name: String,
    pub guest_name: String,
    pub review: String,
    pub rating: f64,
    pub categories: BTreeMap<String, f64>,
    pub channel: Channel,
    pub submitted_at: DateTime<Utc>,
    pub approved: bool,
    pub status: ReviewStatus,
}

/// Round to one decimal place, half away from zero.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Arithmetic mean, `None` for an empty input.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
