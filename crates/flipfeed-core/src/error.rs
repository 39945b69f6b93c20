use thiserror::Error;

/// Message shown when a feed page could not be loaded, whatever the cause.
pub const LOAD_FAILED_MESSAGE: &str = "Error loading news or summaries. Please try again later.";

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for URL: {url}")]
    Status { status: u16, url: String },

    #[error("Malformed response body: {0}")]
    MalformedBody(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("{0}")]
    Validation(String),

    #[error("{}", LOAD_FAILED_MESSAGE)]
    LoadFailed,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
