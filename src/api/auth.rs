/// EG1-HMAC-SHA256 request signing.
///
/// Each request gets an `Authorization` header derived from the client
/// credentials, a UTC timestamp and a random nonce:
///
/// 1. `signing_key = base64(HMAC-SHA256(client_secret, timestamp))`
/// 2. `data = METHOD \t scheme \t host \t path?query \t headers \t content_hash \t prefix`
/// 3. `signature = base64(HMAC-SHA256(signing_key, data))`
///
/// No headers are canonicalized and GET requests carry no content hash, so
/// those two fields are empty.
use std::fmt;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use url::Url;
use uuid::Uuid;

use super::errors::ApiError;

type HmacSha256 = Hmac<Sha256>;

/// Authorization scheme name.
pub const ALGORITHM: &str = "EG1-HMAC-SHA256";

/// Timestamp layout expected by the API gateway.
const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H:%M:%S+0000";

/// API client credentials from a credentials file section.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_token: String,
    pub client_secret: String,
    pub access_token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_token", &self.client_token)
            .field("client_secret", &"<redacted>")
            .field("access_token", &self.access_token)
            .finish()
    }
}

/// Signs requests with a fixed set of credentials.
#[derive(Debug, Clone)]
pub struct EdgeGridSigner {
    credentials: Credentials,
}

impl EdgeGridSigner {
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Build the `Authorization` header for a request, using the current time
    /// and a fresh nonce.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Signing` if the URL has no host or the MAC cannot be keyed.
    pub fn sign(&self, method: &str, url: &Url) -> Result<String, ApiError> {
        let timestamp = Utc::now().format(TIMESTAMP_FORMAT).to_string();
        let nonce = Uuid::new_v4().to_string();
        self.authorization(method, url, &timestamp, &nonce)
    }

    /// Build the `Authorization` header for a request with an explicit
    /// timestamp and nonce.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Signing` if the URL has no host or the MAC cannot be keyed.
    pub fn authorization(
        &self,
        method: &str,
        url: &Url,
        timestamp: &str,
        nonce: &str,
    ) -> Result<String, ApiError> {
        let prefix = format!(
            "{ALGORITHM} client_token={};access_token={};timestamp={timestamp};nonce={nonce};",
            self.credentials.client_token, self.credentials.access_token,
        );

        let signing_key = hmac_base64(
            self.credentials.client_secret.as_bytes(),
            timestamp.as_bytes(),
        )?;

        let method = method.to_uppercase();
        let authority = authority(url)?;
        let relative_url = relative_url(url);
        let data = [
            method.as_str(),
            url.scheme(),
            authority.as_str(),
            relative_url.as_str(),
            "",
            "",
            prefix.as_str(),
        ]
        .join("\t");

        let signature = hmac_base64(signing_key.as_bytes(), data.as_bytes())?;
        Ok(format!("{prefix}signature={signature}"))
    }
}

/// Host, plus the port when it is not the scheme default.
fn authority(url: &Url) -> Result<String, ApiError> {
    let host = url
        .host_str()
        .ok_or_else(|| ApiError::Signing(format!("URL '{url}' has no host")))?;
    Ok(match url.port() {
        Some(port) => format!("{}:{port}", host.to_lowercase()),
        None => host.to_lowercase(),
    })
}

/// Path and query, as sent on the request line.
fn relative_url(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_owned(),
    }
}

fn hmac_base64(key: &[u8], message: &[u8]) -> Result<String, ApiError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| ApiError::Signing(format!("HMAC error: {e}")))?;
    mac.update(message);
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}
