// places.rs
use crate::config::PlacesConfig;
use crate::upstream::fallback::{self, FetchOutcome, SourceKind};
use crate::upstream::models::{FindPlaceResponse, PlaceDetailsResponse, PlaceMatch, PlaceReview};
use crate::upstream::place_cache::PlaceCache;
use crate::upstream::SourceError;
use reqwest::blocking::Client;
use std::time::Duration;

const SOURCE_NAME: &str = "Google Places";

/// Reviews for one listing from the places provider, plus how the
/// listing name was resolved.
#[derive(Debug, Clone)]
pub struct PlaceReviews {
    pub query: String,
    pub place: Option<PlaceMatch>,
    pub outcome: FetchOutcome<PlaceReview>,
}

/// Client for the places provider. Listing names are resolved to place ids
/// by text search; resolutions are cached per raw query string.
pub struct PlacesClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    fleet_place: Option<PlaceMatch>,
    cache: PlaceCache,
}

impl PlacesClient {
    pub fn new(config: &PlacesConfig, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            fleet_place: config.place_id.as_ref().map(|place_id| PlaceMatch {
                name: config
                    .place_listing_name
                    .clone()
                    .unwrap_or_else(|| format!("Google Place {place_id}")),
                place_id: place_id.clone(),
            }),
            cache: PlaceCache::new(config.cache.clone()),
        })
    }

    /// Resolve `query` and fetch its reviews, substituting the bundled
    /// dataset when the key is missing, nothing matches, or a call fails.
    pub fn reviews_for_listing(&self, query: &str) -> PlaceReviews {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::info!(query, "places API key missing, serving fallback dataset");
            return PlaceReviews {
                query: query.to_string(),
                place: None,
                outcome: FetchOutcome::fallback(
                    fallback::place_reviews(),
                    "Missing GOOGLE_PLACES_API_KEY",
                ),
            };
        };

        let place = match self.resolve_place(query, api_key) {
            Ok(place) => place,
            Err(e) => {
                tracing::warn!(query, error = %e, "place lookup failed, serving fallback dataset");
                return PlaceReviews {
                    query: query.to_string(),
                    place: None,
                    outcome: FetchOutcome::fallback(fallback::place_reviews(), e.to_string()),
                };
            }
        };

        let outcome = match self.request_reviews(&place.place_id, api_key) {
            Ok(reviews) if reviews.is_empty() => {
                tracing::info!(query, place_id = %place.place_id, "place has no reviews");
                FetchOutcome::fallback(
                    fallback::place_reviews(),
                    format!("{} has no Google reviews yet", place.name),
                )
            }
            Ok(reviews) => {
                tracing::info!(
                    query,
                    place_id = %place.place_id,
                    count = reviews.len(),
                    "fetched place reviews"
                );
                FetchOutcome::live(SourceKind::Google, reviews)
            }
            Err(e) => {
                tracing::error!(query, error = %e, "places API error, falling back to mock data");
                FetchOutcome::fallback(fallback::place_reviews(), e.to_string())
            }
        };

        PlaceReviews {
            query: query.to_string(),
            place: Some(place),
            outcome,
        }
    }

    /// Reviews for the configured fleet-wide place, filed under its listing name.
    ///
    /// No bundled dataset here: a missing key or place id, or a failed call,
    /// yields an empty batch carrying the reason.
    pub fn fleet_reviews(&self) -> PlaceReviews {
        let (Some(api_key), Some(place)) = (self.api_key.as_deref(), self.fleet_place.as_ref()) else {
            tracing::debug!("fleet place not configured, skipping places reviews");
            return PlaceReviews {
                query: String::new(),
                place: None,
                outcome: FetchOutcome::fallback(Vec::new(), "Missing Google Places API key or Place ID"),
            };
        };

        let outcome = match self.request_reviews(&place.place_id, api_key) {
            Ok(reviews) => {
                tracing::info!(place_id = %place.place_id, count = reviews.len(), "fetched fleet place reviews");
                FetchOutcome::live(SourceKind::Google, reviews)
            }
            Err(e) => {
                tracing::error!(place_id = %place.place_id, error = %e, "fleet place reviews unavailable");
                FetchOutcome::fallback(Vec::new(), e.to_string())
            }
        };

        PlaceReviews {
            query: place.name.clone(),
            place: Some(place.clone()),
            outcome,
        }
    }

    /// Text search, served from the cache when this exact query was seen before.
    pub fn resolve_place(&self, query: &str, api_key: &str) -> Result<PlaceMatch, SourceError> {
        if let Some(hit) = self.cache.get(query) {
            tracing::debug!(query, place_id = %hit.place_id, "place cache hit");
            return Ok(hit);
        }

        let resp = self
            .client
            .get(format!("{}/findplacefromtext/json", self.base_url))
            .query(&[
                ("input", query),
                ("inputtype", "textquery"),
                ("fields", "place_id,name"),
                ("key", api_key),
            ])
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Api {
                source_name: SOURCE_NAME,
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("request failed").to_string(),
            });
        }

        let body: FindPlaceResponse = resp.json()?;
        let place = first_candidate(body, query)?;
        self.cache.insert(query, place.clone());
        tracing::debug!(query, place_id = %place.place_id, cached = self.cache.len(), "place resolved");
        Ok(place)
    }

    fn request_reviews(&self, place_id: &str, api_key: &str) -> Result<Vec<PlaceReview>, SourceError> {
        let resp = self
            .client
            .get(format!("{}/details/json", self.base_url))
            .query(&[
                ("place_id", place_id),
                ("fields", "name,reviews"),
                ("key", api_key),
            ])
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Api {
                source_name: SOURCE_NAME,
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("request failed").to_string(),
            });
        }

        let body: PlaceDetailsResponse = resp.json()?;
        if body.status != "OK" {
            return Err(status_error(&body.status, body.error_message));
        }

        Ok(body.result.map(|r| r.reviews).unwrap_or_default())
    }
}

fn first_candidate(body: FindPlaceResponse, query: &str) -> Result<PlaceMatch, SourceError> {
    match body.status.as_str() {
        "OK" => {}
        "ZERO_RESULTS" => return Err(SourceError::NoMatch(query.to_string())),
        other => return Err(status_error(other, body.error_message)),
    }

    body.candidates
        .into_iter()
        .find_map(|c| {
            let place_id = c.place_id.filter(|id| !id.is_empty())?;
            Some(PlaceMatch {
                name: c.name.unwrap_or_else(|| query.to_string()),
                place_id,
            })
        })
        .ok_or_else(|| SourceError::NoMatch(query.to_string()))
}

fn status_error(status: &str, message: Option<String>) -> SourceError {
    let mut text = format!("Google Places API returned status: {status}");
    if let Some(message) = message {
        text.push_str(&format!(" ({message})"));
    }
    SourceError::UnexpectedShape(text)
}
