/// Signed HTTP client for the configuration API.
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use super::auth::{Credentials, EdgeGridSigner};
use super::endpoint::{Endpoint, Operation};
use super::errors::ApiError;
use crate::config::Configuration;

const ACCOUNT_SWITCH_KEY_PARAM: &str = "accountSwitchKey";

/// Constructed once per invocation and passed by reference to every call.
#[derive(Debug)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    signer: EdgeGridSigner,
    account_switch_key: Option<String>,
    /// When true, request and response headers are logged at debug level.
    debug: bool,
}

impl ApiClient {
    /// Build a client from a resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Client` if the HTTP client cannot be built.
    pub fn new(config: &Configuration) -> Result<Self, ApiError> {
        Self::with_base_url(
            config.base_url.clone(),
            config.credentials.clone(),
            config.account_switch_key.clone(),
            config.debug > 0,
        )
    }

    /// Build a client against an explicit base URL.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Client` if the HTTP client cannot be built.
    pub fn with_base_url(
        base_url: Url,
        credentials: Credentials,
        account_switch_key: Option<String>,
        debug: bool,
    ) -> Result<Self, ApiError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("media-services-cli/", env!("CARGO_PKG_VERSION"))),
        );
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            http,
            base_url,
            signer: EdgeGridSigner::new(credentials),
            account_switch_key,
            debug,
        })
    }

    /// Full request URL for an endpoint: base URL, substituted path, the
    /// endpoint's own query parameters, then `accountSwitchKey` if configured.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Url` if the path cannot be joined onto the base URL.
    pub fn request_url(&self, endpoint: &Endpoint) -> Result<Url, ApiError> {
        let mut url = self.base_url.join(&endpoint.path())?;

        let mut query: Vec<(&str, &str)> = endpoint
            .query
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .collect();
        if let Some(key) = &self.account_switch_key {
            query.push((ACCOUNT_SWITCH_KEY_PARAM, key.as_str()));
        }

        // An empty `query_pairs_mut` still leaves a trailing `?`, which would be signed.
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Perform one signed GET for `operation` and return the decoded body.
    ///
    /// # Errors
    ///
    /// - `ApiError::Transport` when no response is received
    /// - `ApiError::Status` for any non-success status
    /// - `ApiError::Decode` when the body is not JSON
    pub fn call(&self, operation: &Operation) -> Result<Value, ApiError> {
        let url = self.request_url(&operation.endpoint())?;
        let authorization = self.signer.sign("GET", &url)?;

        let request = self
            .http
            .get(url.clone())
            .header(AUTHORIZATION, authorization)
            .build()?;

        info!(operation = operation.name(), url = %url, "GET");
        if self.debug {
            log_headers("request", request.headers());
        }

        let response = self.http.execute(request)?;
        let status = response.status();
        info!(status = status.as_u16(), "response");
        if self.debug {
            log_headers("response", response.headers());
        }

        let body = response.text()?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn log_headers(direction: &str, headers: &HeaderMap) {
    for (name, value) in headers {
        if *name == AUTHORIZATION {
            debug!(direction, header = %name, value = %redact_authorization(value), "header");
        } else {
            debug!(direction, header = %name, value = ?value, "header");
        }
    }
}

/// Keep only the scheme name of an `Authorization` value.
fn redact_authorization(value: &HeaderValue) -> String {
    let scheme = value
        .to_str()
        .ok()
        .and_then(|v| v.split_whitespace().next())
        .unwrap_or("");
    format!("{scheme} <redacted>")
}
