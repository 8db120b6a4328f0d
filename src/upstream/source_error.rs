use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("{source_name} API error (status {status}): {message}")]
    Api {
        source_name: &'static str,
        status: u16,
        message: String,
    },
    #[error("Authentication failed: {0}")]
    Auth(String),
    #[error("JSON parse error: {0}")]
    Parse(String),
    #[error("Unexpected data shape: {0}")]
    UnexpectedShape(String),
    #[error("No place matched query \"{0}\"")]
    NoMatch(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(err.to_string())
    }
}
