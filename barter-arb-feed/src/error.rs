use thiserror::Error;

/// Errors that can occur when fetching or decoding a venue feed.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("venue API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("invalid feed URL: {0}")]
    Url(#[from] url::ParseError),
}
