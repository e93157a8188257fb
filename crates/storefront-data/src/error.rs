//! Catalog fetch errors.

use thiserror::Error;

/// Why a catalog request could not be resolved.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The HTTP client itself could not be set up.
    #[error("failed to create HTTP client: {0}")]
    Client(String),

    /// The request never produced a response.
    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// The body was not the JSON the caller asked for.
    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("request to {url} timed out")]
    Timeout { url: String },
}

impl FetchError {
    /// Status code of an HTTP error response.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_only_for_http_errors() {
        let not_found = FetchError::HttpError {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(not_found.status(), Some(404));
        assert_eq!(not_found.to_string(), "HTTP 404: Not Found");

        let timeout = FetchError::Timeout {
            url: "/products.json".to_string(),
        };
        assert_eq!(timeout.status(), None);
        assert_eq!(timeout.to_string(), "request to /products.json timed out");
    }
}
