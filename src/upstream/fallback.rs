use crate::upstream::models::{HostawayReview, PlaceReview};
use chrono::{DateTime, Utc};
use serde::Serialize;

const HOSTAWAY_FALLBACK_JSON: &str = include_str!("../../data/hostaway_fallback.json");
const PLACES_FALLBACK_JSON: &str = include_str!("../../data/places_fallback.json");

/// Where a batch of raw records actually came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Hostaway,
    Google,
    Mock,
}

/// Result of one upstream fetch, live or substituted.
#[derive(Debug, Clone)]
pub struct FetchOutcome<T> {
    pub source: SourceKind,
    pub records: Vec<T>,
    pub fallback_reason: Option<String>,
    pub last_synced_at: DateTime<Utc>,
}

impl<T> FetchOutcome<T> {
    pub fn live(source: SourceKind, records: Vec<T>) -> Self {
        Self {
            source,
            records,
            fallback_reason: None,
            last_synced_at: Utc::now(),
        }
    }

    pub fn fallback(records: Vec<T>, reason: impl Into<String>) -> Self {
        Self {
            source: SourceKind::Mock,
            records,
            fallback_reason: Some(reason.into()),
            last_synced_at: Utc::now(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == SourceKind::Mock
    }
}

/// Bundled synthetic property-management reviews.
pub fn hostaway_reviews() -> Vec<HostawayReview> {
    parse_bundle(HOSTAWAY_FALLBACK_JSON, "hostaway")
}

/// Bundled synthetic places reviews, attached to whichever listing was queried.
pub fn place_reviews() -> Vec<PlaceReview> {
    parse_bundle(PLACES_FALLBACK_JSON, "places")
}

fn parse_bundle<T: serde::de::DeserializeOwned>(json: &str, name: &str) -> Vec<T> {
    serde_json::from_str(json).unwrap_or_else(|e| {
        tracing::error!(bundle = name, error = %e, "bundled fallback dataset is malformed");
        Vec::new()
    })
}
