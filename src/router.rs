use crate::errors::ServerError;
use crate::query::{parse_query, parse_review_query};
use crate::responses::{json_response, ResultResp};
use crate::service::ReviewService;
use crate::upstream::lenient;
use astra::Request;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApproveRequest {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    review_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::truthy")]
    approved: bool,
}

pub fn handle(mut req: Request, app: &ReviewService) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().trim_end_matches('/').to_string();
    let query = req.uri().query().map(str::to_string);
    let query = query.as_deref();

    tracing::debug!(%method, %path, "request");

    match (method.as_str(), path.as_str()) {
        ("GET", "/api/reviews") => {
            let review_query = parse_review_query(query)?;
            json_response(200, &app.dashboard(&review_query, Utc::now())?)
        }

        ("GET", "/api/reviews/google") => {
            let params = parse_query(query);
            let listing_name = params
                .get("listingName")
                .ok_or_else(|| ServerError::BadRequest("listingName is required".into()))?;
            json_response(200, &app.google_reviews(listing_name)?)
        }

        ("GET", "/api/reviews/approve") => {
            json_response(200, &json!({ "success": true, "approvals": app.approvals()? }))
        }

        ("POST", "/api/reviews/approve") => {
            let body: ApproveRequest = serde_json::from_reader(req.body_mut().reader())
                .map_err(|e| ServerError::BadRequest(format!("Invalid JSON body: {e}")))?;

            let review_id = body
                .review_id
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .ok_or_else(|| ServerError::BadRequest("reviewId is required".into()))?;

            let approved = app.set_approval(&review_id, body.approved)?;
            json_response(
                200,
                &json!({ "success": true, "reviewId": review_id, "approved": approved }),
            )
        }

        ("GET", p) if p.starts_with("/api/reviews/listings/") => {
            let listing_id = segment(p, "/api/reviews/listings/")?;
            let review_query = parse_review_query(query)?;
            let listing = app
                .listing(listing_id, &review_query, Utc::now())?
                .ok_or(ServerError::NotFound)?;
            json_response(200, &json!({ "success": true, "listing": listing }))
        }

        ("GET", p) if p.starts_with("/api/reviews/") => {
            let review_id = segment(p, "/api/reviews/")?;
            let review = app.review(review_id)?.ok_or(ServerError::NotFound)?;
            json_response(200, &json!({ "success": true, "review": review }))
        }

        _ => Err(ServerError::NotFound),
    }
}

/// The single path segment following `prefix`.
fn segment<'a>(path: &'a str, prefix: &str) -> Result<&'a str, ServerError> {
    match path.strip_prefix(prefix) {
        Some(rest) if !rest.is_empty() && !rest.contains('/') => Ok(rest),
        _ => Err(ServerError::NotFound),
    }
}
