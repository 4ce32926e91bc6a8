use thiserror::Error;

/// Errors raised while talking to the search backend or producing output.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("backend answered with HTTP status {0}")]
    Status(u16),
    #[error("template rendering failed: {0}")]
    Template(#[from] tera::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("malformed payload: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
