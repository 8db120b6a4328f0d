// hostaway.rs
use crate::config::HostawayConfig;
use crate::upstream::fallback::{self, FetchOutcome, SourceKind};
use crate::upstream::models::HostawayReview;
use crate::upstream::SourceError;
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::{Duration, Instant};

const SOURCE_NAME: &str = "Hostaway";

/// Client for the property-management provider.
///
/// Authenticates with an OAuth2 client-credentials exchange on every fetch,
/// then pulls the account's reviews. Any failure degrades to the bundled
/// dataset; there is no retry.
pub struct HostawayClient {
    client: Client,
    base_url: String,
    account_id: Option<String>,
    api_key: Option<String>,
}

impl HostawayClient {
    pub fn new(config: &HostawayConfig, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            account_id: config.account_id.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Fetch raw reviews, substituting the fallback dataset on any problem.
    pub fn fetch_reviews(&self) -> FetchOutcome<HostawayReview> {
        let (Some(account_id), Some(api_key)) = (&self.account_id, &self.api_key) else {
            tracing::info!("hostaway credentials missing, serving fallback dataset");
            return FetchOutcome::fallback(
                fallback::hostaway_reviews(),
                "Missing HOSTAWAY_ACCOUNT_ID or HOSTAWAY_API_KEY",
            );
        };

        let start = Instant::now();
        match self.try_fetch_reviews(account_id, api_key) {
            Ok(reviews) if reviews.is_empty() => {
                tracing::warn!("hostaway returned no reviews, serving fallback dataset");
                FetchOutcome::fallback(
                    fallback::hostaway_reviews(),
                    "Hostaway sandbox responded without review data",
                )
            }
            Ok(reviews) => {
                tracing::info!(
                    count = reviews.len(),
                    elapsed = ?start.elapsed(),
                    "fetched hostaway reviews"
                );
                FetchOutcome::live(SourceKind::Hostaway, reviews)
            }
            Err(e) => {
                tracing::error!(error = %e, "hostaway API error, falling back to mock data");
                FetchOutcome::fallback(fallback::hostaway_reviews(), e.to_string())
            }
        }
    }

    fn try_fetch_reviews(
        &self,
        account_id: &str,
        api_key: &str,
    ) -> Result<Vec<HostawayReview>, SourceError> {
        let token = self.request_access_token(account_id, api_key)?;
        self.request_reviews(&token, account_id)
    }

    fn request_access_token(&self, account_id: &str, api_key: &str) -> Result<String, SourceError> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", account_id),
            ("client_secret", api_key),
            ("scope", "general"),
        ];

        let resp = self
            .client
            .post(format!("{}/accessTokens", self.base_url))
            .form(&form)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Auth(format!(
                "Unable to authenticate with Hostaway ({status})"
            )));
        }

        let body: Value = resp.json()?;
        extract_token(&body)
            .ok_or_else(|| SourceError::Auth("Hostaway token response did not include a token".into()))
    }

    fn request_reviews(&self, token: &str, account_id: &str) -> Result<Vec<HostawayReview>, SourceError> {
        let resp = self
            .client
            .get(format!("{}/reviews", self.base_url))
            .query(&[("accountId", account_id)])
            .bearer_auth(token)
            .header("X-Account-Id", account_id)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().unwrap_or_else(|_| "(no body)".to_string());
            return Err(SourceError::Api {
                source_name: SOURCE_NAME,
                status: status.as_u16(),
                message,
            });
        }

        let payload: Value = resp.json()?;
        extract_reviews(payload)
    }
}

/// The token has shown up under three different keys depending on API version.
fn extract_token(body: &Value) -> Option<String> {
    body.get("access_token")
        .or_else(|| body.get("token"))
        .or_else(|| body.pointer("/result/token"))
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Records live under `result`, else `reviews`; anything non-array is empty.
/// Records that are not JSON objects are skipped individually.
fn extract_reviews(payload: Value) -> Result<Vec<HostawayReview>, SourceError> {
    let Value::Object(mut map) = payload else {
        return Err(SourceError::UnexpectedShape(
            "reviews payload is not an object".to_string(),
        ));
    };

    let list = map
        .remove("result")
        .filter(|v| !v.is_null())
        .or_else(|| map.remove("reviews"));

    let Some(Value::Array(items)) = list else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<HostawayReview>(item) {
            Ok(review) => Some(review),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable hostaway record");
                None
            }
        })
        .collect())
}
