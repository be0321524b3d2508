/// Top-level error for a single invocation.
use thiserror::Error;

use crate::api::ApiError;
use crate::cli::OutputError;
use crate::config::ConfigError;

/// Exit code for a malformed command line.
pub const ARGUMENT_ERROR_EXIT: i32 = 2;

/// Any failure between argument parsing and printing the result.
#[derive(Debug, Error)]
pub enum CliError {
    /// Credentials file or section problem. Raised before any request.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The request failed or returned something unusable.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The payload does not fit the operation's table schema.
    #[error(transparent)]
    Output(#[from] OutputError),
}

impl CliError {
    /// Return the process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Output(_) => 1,
            Self::Config(_) => 3,
            Self::Api(_) => 4,
        }
    }

    /// Machine-readable error code (snake_case).
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(err) => match err {
                ConfigError::MissingFile { .. } => "credentials_file_not_found",
                ConfigError::MissingSection { .. } => "section_not_found",
                ConfigError::MissingKey { .. } => "credential_missing",
                ConfigError::Read { .. } | ConfigError::Parse { .. } => "credentials_file_invalid",
                ConfigError::InvalidHost { .. } => "invalid_host",
            },
            Self::Api(err) => match err {
                ApiError::Status { .. } => "api_error",
                ApiError::Decode(_) => "invalid_response",
                ApiError::Transport(_) => "request_failed",
                ApiError::Client(_) | ApiError::Url(_) | ApiError::Signing(_) => "request_invalid",
            },
            Self::Output(_) => "output_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_codes() {
        let config = CliError::from(ConfigError::MissingSection {
            section: "s".to_owned(),
            path: PathBuf::from("/e"),
            candidates: vec![],
        });
        assert_eq!(config.exit_code(), 3);
        assert_eq!(config.code(), "section_not_found");

        let api = CliError::from(ApiError::Status {
            status: 403,
            body: String::new(),
        });
        assert_eq!(api.exit_code(), 4);
        assert_eq!(api.code(), "api_error");

        let output = CliError::from(OutputError::MissingField {
            field: "id".to_owned(),
        });
        assert_eq!(output.exit_code(), 1);
    }

    #[test]
    fn test_message_passes_through() {
        let err = CliError::from(ApiError::Status {
            status: 401,
            body: "denied".to_owned(),
        });
        assert_eq!(err.to_string(), "API returned HTTP 401: denied");
    }
}
