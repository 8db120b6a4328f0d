use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};
use serde_json::json;

/// Convert a ServerError into `{ "success": false, "error": ... }`.
/// Database and internal details are logged, never returned.
pub fn json_error_response(err: &ServerError) -> Response {
    match err {
        ServerError::DbError(_) | ServerError::InternalError => {
            tracing::error!(error = %err, "request failed")
        }
        _ => tracing::debug!(error = %err, "request rejected"),
    }

    let body = json!({ "success": false, "error": err.public_message() }).to_string();

    ResponseBuilder::new()
        .status(err.status())
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::empty()))
}
