/// Serializable error envelope for `--output-type json`.
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::errors::CliError;

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (snake_case).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// HTTP status, for API errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Existing credentials sections (for missing-section errors).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<String>>,
}

impl ErrorOutput {
    /// Construct from a `CliError`.
    #[must_use]
    pub fn from_cli_error(err: &CliError) -> Self {
        let candidates = match err {
            CliError::Config(ConfigError::MissingSection { candidates, .. })
                if !candidates.is_empty() =>
            {
                Some(candidates.clone())
            }
            _ => None,
        };
        let status = match err {
            CliError::Api(crate::api::ApiError::Status { status, .. }) => Some(*status),
            _ => None,
        };
        Self {
            ok: false,
            error: ErrorDetail {
                code: err.code().to_owned(),
                message: err.to_string(),
                status,
                candidates,
            },
        }
    }
}
