/// Merge command-line flags with a credentials file section.
///
/// Precedence is fixed: a value given on the command line always wins; the
/// section only fills in what the command line left out.
use std::path::PathBuf;

use tracing::{debug, info};
use url::Url;

use super::edgerc::{Edgerc, Section, expand_home, similar_sections};
use super::errors::ConfigError;
use crate::api::Credentials;
use crate::cli::args::GlobalArgs;

/// Default credentials file location.
pub const DEFAULT_EDGERC: &str = "~/.edgerc";

/// Default credentials file section.
pub const DEFAULT_SECTION: &str = "mediaservices";

/// Section key carrying an account-switch key.
const ACCOUNT_KEY: &str = "account_key";

/// Settings for one invocation. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub credentials: Credentials,
    /// API host as given (without scheme, unless one was supplied).
    pub host: String,
    /// `https://{host}`, or the host itself when it carries a scheme.
    pub base_url: Url,
    /// Credentials file section the credentials came from.
    pub section: String,
    /// Expanded credentials file path.
    pub edgerc: PathBuf,
    pub account_switch_key: Option<String>,
    pub verbose: u8,
    pub debug: u8,
}

/// Resolve the configuration for this invocation.
///
/// # Errors
///
/// - `ConfigError::MissingFile`: the credentials file does not exist
/// - `ConfigError::MissingSection`: the file lacks the requested section
/// - `ConfigError::MissingKey`: a credential is in neither the CLI nor the section
/// - `ConfigError::InvalidHost`: the host cannot form a URL
pub fn resolve(args: &GlobalArgs) -> Result<Configuration, ConfigError> {
    let path = expand_home(&args.edgerc);
    if !path.is_file() {
        return Err(ConfigError::MissingFile {
            path,
            section: args.section.clone(),
        });
    }

    let edgerc = Edgerc::load(&path)?;
    debug!(path = %path.display(), "loaded credentials file");
    resolve_with(args, &edgerc, path)
}

/// Resolve against an already-loaded credentials file.
///
/// # Errors
///
/// Same as [`resolve`], minus file access.
pub fn resolve_with(
    args: &GlobalArgs,
    edgerc: &Edgerc,
    path: PathBuf,
) -> Result<Configuration, ConfigError> {
    let section_name = args.section.as_str();
    let Some(section) = edgerc.section(section_name) else {
        return Err(ConfigError::MissingSection {
            section: section_name.to_owned(),
            path,
            candidates: similar_sections(section_name, edgerc.section_names()),
        });
    };

    let require = |key: &'static str| {
        lookup(section, key).ok_or_else(|| ConfigError::MissingKey {
            section: section_name.to_owned(),
            key,
        })
    };

    let host = match &args.host {
        Some(host) => host.clone(),
        None => require("host")?,
    };
    let credentials = Credentials {
        client_token: require("client_token")?,
        client_secret: require("client_secret")?,
        access_token: require("access_token")?,
    };
    let account_switch_key = args
        .account_switch_key
        .clone()
        .or_else(|| lookup(section, ACCOUNT_KEY));

    let base_url = base_url(&host)?;
    info!(section = section_name, host = %host, "resolved credentials");

    Ok(Configuration {
        credentials,
        host,
        base_url,
        section: section_name.to_owned(),
        edgerc: path,
        account_switch_key,
        verbose: args.verbose,
        debug: args.debug,
    })
}

/// Non-empty value of `key` in `section`.
fn lookup(section: &Section, key: &str) -> Option<String> {
    section.get(key).filter(|v| !v.is_empty()).cloned()
}

/// Build the base URL for `host`.
///
/// # Errors
///
/// Returns `ConfigError::InvalidHost` when the result is not a valid URL.
pub fn base_url(host: &str) -> Result<Url, ConfigError> {
    let trimmed = host.trim().trim_end_matches('/');
    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    };

    let url = Url::parse(&candidate).map_err(|e| ConfigError::InvalidHost {
        host: host.to_owned(),
        message: e.to_string(),
    })?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ConfigError::InvalidHost {
            host: host.to_owned(),
            message: "no host name".to_owned(),
        });
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;

    const EDGERC: &str = "\
[default]
client_secret = default-secret
host = default.example.net
access_token = default-access
client_token = default-client

[mediaservices]
client_secret = media-secret
host = media.example.net
access_token = media-access
client_token = media-client

[switched]
client_secret = s
host = switched.example.net
access_token = a
client_token = c
account_key = 1-FILEKEY

[incomplete]
host = incomplete.example.net
client_token = c
";

    fn args(section: &str) -> GlobalArgs {
        GlobalArgs {
            verbose: 0,
            debug: 0,
            edgerc: "/unused".to_owned(),
            section: section.to_owned(),
            account_switch_key: None,
            host: None,
        }
    }

    fn edgerc() -> Edgerc {
        Edgerc::parse(EDGERC).unwrap()
    }

    #[test]
    fn test_section_values_copied_verbatim() {
        let config = resolve_with(&args("mediaservices"), &edgerc(), PathBuf::new()).unwrap();
        assert_eq!(config.credentials.client_token, "media-client");
        assert_eq!(config.credentials.client_secret, "media-secret");
        assert_eq!(config.credentials.access_token, "media-access");
        assert_eq!(config.host, "media.example.net");
        assert_eq!(config.base_url.as_str(), "https://media.example.net/");
        assert_eq!(config.section, "mediaservices");
        assert!(config.account_switch_key.is_none());
    }

    #[test]
    fn test_section_override_selects_other_section() {
        let config = resolve_with(&args("default"), &edgerc(), PathBuf::new()).unwrap();
        assert_eq!(config.credentials.client_token, "default-client");
        assert_eq!(config.host, "default.example.net");
    }

    #[test]
    fn test_cli_wins_over_file() {
        let mut a = args("switched");
        a.host = Some("override.example.net".to_owned());
        a.account_switch_key = Some("1-CLIKEY".to_owned());
        let config = resolve_with(&a, &edgerc(), PathBuf::new()).unwrap();
        assert_eq!(config.host, "override.example.net");
        assert_eq!(config.account_switch_key.as_deref(), Some("1-CLIKEY"));
    }

    #[test]
    fn test_account_key_from_file_when_cli_absent() {
        let config = resolve_with(&args("switched"), &edgerc(), PathBuf::new()).unwrap();
        assert_eq!(config.account_switch_key.as_deref(), Some("1-FILEKEY"));
    }

    #[test]
    fn test_missing_section() {
        let result = resolve_with(&args("mediaservice"), &edgerc(), PathBuf::from("/x/.edgerc"));
        match result {
            Err(ConfigError::MissingSection {
                section,
                path,
                candidates,
            }) => {
                assert_eq!(section, "mediaservice");
                assert_eq!(path, PathBuf::from("/x/.edgerc"));
                assert_eq!(candidates.first().map(String::as_str), Some("mediaservices"));
            }
            other => panic!("expected missing section, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_key() {
        let result = resolve_with(&args("incomplete"), &edgerc(), PathBuf::new());
        assert!(matches!(
            result,
            Err(ConfigError::MissingKey {
                key: "client_secret",
                ..
            })
        ));
    }

    #[test]
    fn test_flags_carried_through() {
        let mut a = args("mediaservices");
        a.verbose = 1;
        a.debug = 2;
        let config = resolve_with(&a, &edgerc(), PathBuf::new()).unwrap();
        assert_eq!(config.verbose, 1);
        assert_eq!(config.debug, 2);
    }

    #[test]
    fn test_base_url_forms() {
        assert_eq!(
            base_url("akab-x.luna.akamaiapis.net").unwrap().as_str(),
            "https://akab-x.luna.akamaiapis.net/"
        );
        assert_eq!(
            base_url("akab-x.luna.akamaiapis.net/").unwrap().as_str(),
            "https://akab-x.luna.akamaiapis.net/"
        );
        assert_eq!(
            base_url("http://127.0.0.1:8080").unwrap().as_str(),
            "http://127.0.0.1:8080/"
        );
        assert!(matches!(base_url(""), Err(ConfigError::InvalidHost { .. })));
    }

    #[test]
    fn test_resolve_reads_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(EDGERC.as_bytes())?;

        let mut a = args("default");
        a.edgerc = file.path().to_string_lossy().into_owned();
        let config = resolve(&a)?;
        assert_eq!(config.credentials.client_token, "default-client");
        assert_eq!(config.edgerc, file.path());
        Ok(())
    }

    #[test]
    fn test_resolve_missing_file() {
        let mut a = args("default");
        a.edgerc = "/nonexistent/dir/.edgerc".to_owned();
        assert!(matches!(resolve(&a), Err(ConfigError::MissingFile { .. })));
    }

    #[test]
    fn test_resolve_missing_section_from_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(EDGERC.as_bytes())?;

        let mut a = args("papi");
        a.edgerc = file.path().to_string_lossy().into_owned();
        assert!(matches!(
            resolve(&a),
            Err(ConfigError::MissingSection { .. })
        ));
        Ok(())
    }
}
