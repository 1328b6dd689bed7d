//! Error types for the query client.

use thiserror::Error;

/// Result type alias for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;

/// Errors that can occur while submitting a query and handling its outcome.
#[derive(Error, Debug)]
pub enum QueryError {
    /// Input rejected before any request was issued.
    ///
    /// Handled locally as an advisory; never shown on the error panel.
    #[error("{0}")]
    Validation(String),

    /// HTTP transport failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status.
    #[error("HTTP {code}: {text}")]
    Status { code: u16, text: String },

    /// Failed to parse the response body.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Backend reported a failure in an otherwise well-formed response.
    #[error("{0}")]
    Application(String),

    /// URL parsing error.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl QueryError {
    /// Returns true for input errors that are handled as local advisories.
    pub fn is_validation(&self) -> bool {
        matches!(self, QueryError::Validation(_))
    }
}
