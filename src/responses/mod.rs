pub mod errors;
pub mod json;

pub use crate::errors::ResultResp;
pub use errors::json_error_response;
pub use json::json_response;
