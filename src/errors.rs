use astra::Response;
// errors.rs
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, missing resources, bad input) or downstream layers (DB).
///
/// Upstream review API failures never show up here: they are absorbed
/// at the fetch boundary and surfaced as a fallback reason instead.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Database Error: {0}")]
    DbError(String),
    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::DbError(_) | ServerError::InternalError => 500,
        }
    }

    /// Message safe to hand back to API clients.
    pub fn public_message(&self) -> String {
        match self {
            ServerError::NotFound => "Not found".to_string(),
            ServerError::BadRequest(msg) => msg.clone(),
            ServerError::DbError(_) | ServerError::InternalError => {
                "Failed to process request".to_string()
            }
        }
    }
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;
