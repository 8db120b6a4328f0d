// src/service.rs
use crate::aggregate::{build_totals, group_by_listing};
use crate::approvals::{apply_approvals, ApprovalLedger};
use crate::config::AppConfig;
use crate::domain::{ListingReviews, Review, Totals};
use crate::errors::ServerError;
use crate::normalize::{normalize_hostaway_batch, normalize_place_reviews};
use crate::query::{filter_reviews, sort_reviews, ReviewQuery};
use crate::upstream::{FetchOutcome, HostawayClient, HostawayReview, PlaceReviews, PlacesClient, SourceKind};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Provenance of one source's batch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMeta {
    #[serde(rename = "type")]
    pub kind: SourceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
    pub last_synced_at: DateTime<Utc>,
}

impl<T> From<&FetchOutcome<T>> for SourceMeta {
    fn from(outcome: &FetchOutcome<T>) -> Self {
        Self {
            kind: outcome.source,
            fallback: outcome.fallback_reason.clone(),
            last_synced_at: outcome.last_synced_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsResponse {
    pub success: bool,
    pub listings: Vec<ListingReviews>,
    pub totals: Totals,
    pub source: SourceMeta,
    pub sources: BTreeMap<String, SourceMeta>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleMeta {
    pub source: SourceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    pub last_synced_at: DateTime<Utc>,
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleReviewsResponse {
    pub success: bool,
    pub reviews: Vec<Review>,
    pub meta: GoogleMeta,
}

/// Fetch, normalize, overlay approvals, aggregate. Nothing is cached
/// between calls except place resolutions inside the places client.
pub struct ReviewService {
    hostaway: HostawayClient,
    places: PlacesClient,
    ledger: Box<dyn ApprovalLedger>,
}

impl ReviewService {
    pub fn new(config: &AppConfig, ledger: Box<dyn ApprovalLedger>) -> Result<Self, ServerError> {
        let hostaway = HostawayClient::new(&config.hostaway, config.upstream_timeout).map_err(|e| {
            tracing::error!(error = %e, "failed to build hostaway client");
            ServerError::InternalError
        })?;
        let places = PlacesClient::new(&config.places, config.upstream_timeout).map_err(|e| {
            tracing::error!(error = %e, "failed to build places client");
            ServerError::InternalError
        })?;

        Ok(Self {
            hostaway,
            places,
            ledger,
        })
    }

    fn load_reviews(&self) -> Result<LoadedReviews, ServerError> {
        self.combine(self.hostaway.fetch_reviews(), self.places.fleet_reviews())
    }

    /// Both sources normalized into one set, approvals applied, plus where
    /// each batch came from.
    fn combine(
        &self,
        hostaway: FetchOutcome<HostawayReview>,
        google: PlaceReviews,
    ) -> Result<LoadedReviews, ServerError> {
        let mut reviews = normalize_hostaway_batch(&hostaway.records);
        reviews.extend(normalize_place_reviews(
            &google.outcome.records,
            &google.query,
            google.place.as_ref(),
        ));
        apply_approvals(&mut reviews, self.ledger.as_ref())?;

        let outcome = &google.outcome;
        let expose_google =
            !outcome.records.is_empty() || outcome.source == SourceKind::Google || outcome.fallback_reason.is_some();

        Ok(LoadedReviews {
            reviews,
            hostaway: SourceMeta::from(&hostaway),
            google: expose_google.then(|| SourceMeta::from(outcome)),
        })
    }

    /// All listings with insights and fleet totals.
    ///
    /// Aggregates cover the full review set; `query` only narrows and
    /// orders the reviews listed under each listing. With an active filter,
    /// listings left with no reviews are dropped.
    pub fn dashboard(&self, query: &ReviewQuery, now: DateTime<Utc>) -> Result<ReviewsResponse, ServerError> {
        Ok(dashboard_from(self.load_reviews()?, query, now))
    }

    pub fn listing(
        &self,
        listing_id: &str,
        query: &ReviewQuery,
        now: DateTime<Utc>,
    ) -> Result<Option<ListingReviews>, ServerError> {
        let loaded = self.load_reviews()?;
        Ok(group_by_listing(&loaded.reviews)
            .into_iter()
            .find(|listing| listing.listing_id == listing_id)
            .map(|listing| present(listing, query, now)))
    }

    pub fn review(&self, review_id: &str) -> Result<Option<Review>, ServerError> {
        let loaded = self.load_reviews()?;
        Ok(loaded.reviews.into_iter().find(|review| review.id == review_id))
    }

    /// Places-provider reviews for one listing, searched by its display name.
    pub fn google_reviews(&self, listing_name: &str) -> Result<GoogleReviewsResponse, ServerError> {
        let listing_name = listing_name.trim();
        if listing_name.is_empty() {
            return Err(ServerError::BadRequest("listingName is required".into()));
        }

        let fetched = self.places.reviews_for_listing(listing_name);
        let mut reviews = normalize_place_reviews(&fetched.outcome.records, listing_name, fetched.place.as_ref());
        apply_approvals(&mut reviews, self.ledger.as_ref())?;

        Ok(GoogleReviewsResponse {
            success: true,
            reviews,
            meta: GoogleMeta {
                source: fetched.outcome.source,
                fallback_reason: fetched.outcome.fallback_reason,
                last_synced_at: fetched.outcome.last_synced_at,
                query: fetched.query,
                place_id: fetched.place.as_ref().map(|p| p.place_id.clone()),
                place_name: fetched.place.map(|p| p.name),
            },
        })
    }

    /// Records the decision and returns the flag now stored for `review_id`.
    pub fn set_approval(&self, review_id: &str, approved: bool) -> Result<bool, ServerError> {
        let review_id = review_id.trim();
        if review_id.is_empty() {
            return Err(ServerError::BadRequest("reviewId is required".into()));
        }
        if approved {
            self.ledger.approve(review_id)?;
        } else {
            self.ledger.unapprove(review_id)?;
        }
        self.ledger.is_approved(review_id)
    }

    pub fn approvals(&self) -> Result<BTreeMap<String, bool>, ServerError> {
        self.ledger.get_all()
    }
}

struct LoadedReviews {
    reviews: Vec<Review>,
    hostaway: SourceMeta,
    google: Option<SourceMeta>,
}

fn dashboard_from(loaded: LoadedReviews, query: &ReviewQuery, now: DateTime<Utc>) -> ReviewsResponse {
    let totals = build_totals(&loaded.reviews);
    let listings = group_by_listing(&loaded.reviews)
        .into_iter()
        .map(|listing| present(listing, query, now))
        .filter(|listing| query.filter.is_empty() || !listing.reviews.is_empty())
        .collect();

    tracing::debug!(
        reviews = loaded.reviews.len(),
        source = ?loaded.hostaway.kind,
        google = loaded.google.is_some(),
        "dashboard built"
    );

    let mut sources = BTreeMap::from([("hostaway".to_string(), loaded.hostaway.clone())]);
    if let Some(google) = loaded.google {
        sources.insert("google".to_string(), google);
    }

    ReviewsResponse {
        success: true,
        listings,
        totals,
        source: loaded.hostaway,
        sources,
    }
}

fn present(mut listing: ListingReviews, query: &ReviewQuery, now: DateTime<Utc>) -> ListingReviews {
    let filtered = filter_reviews(&listing.reviews, &query.filter, now);
    listing.reviews = sort_reviews(&filtered, query.sort_by, query.order);
    listing
}
