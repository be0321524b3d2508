/// Errors from the API gateway layer.
use thiserror::Error;

/// Typed errors from building, signing, sending or decoding a request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request URL could not be formed from the base URL and path.
    #[error("Invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    /// The `Authorization` header could not be computed.
    #[error("Failed to sign request: {0}")]
    Signing(String),

    /// The request never produced a response (DNS, TLS, connection, timeout).
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body, usually a problem-details JSON document.
        body: String,
    },

    /// The response body is not valid JSON.
    #[error("Response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}
