/// Errors from resolving the configuration.
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while merging CLI flags with the credentials file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The credentials file does not exist.
    #[error(
        "Credentials file {} was not found\nPlease generate API credentials and run 'gen_edgerc.py {section}' to set up the credentials file",
        .path.display()
    )]
    MissingFile {
        /// Expanded path that was looked up.
        path: PathBuf,
        /// Section the user asked for.
        section: String,
    },

    /// The credentials file exists but could not be read.
    #[error("Failed to read credentials file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The credentials file is not valid INI.
    #[error("Failed to parse credentials file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// The requested section is not in the credentials file.
    #[error(
        "No section named '{section}' was found in your {} file\nPlease generate credentials for the script functionality\nand run 'gen_edgerc.py {section}' to generate the credential file",
        .path.display()
    )]
    MissingSection {
        /// Requested section name.
        section: String,
        /// Credentials file that was searched.
        path: PathBuf,
        /// Existing sections, closest match first.
        candidates: Vec<String>,
    },

    /// A required credential is absent from both the CLI and the section.
    #[error("Section '{section}' is missing required key '{key}'")]
    MissingKey {
        section: String,
        key: &'static str,
    },

    /// The host cannot be turned into a base URL.
    #[error("Invalid API host '{host}': {message}")]
    InvalidHost { host: String, message: String },
}
