/// Command dispatch: resolves configuration, builds the client once and maps
/// each subcommand to its API operation.
pub mod query;

use tracing::debug;

use crate::api::{ApiClient, Operation};
use crate::cli::OutputCtx;
use crate::cli::args::{Cli, Command};
use crate::config;
use crate::errors::CliError;

/// Dispatch a parsed command line.
///
/// # Errors
///
/// Returns `CliError::Config` before any request is made when the
/// credentials cannot be resolved, and `CliError::Api` / `CliError::Output`
/// from the query itself.
pub fn dispatch(cli: &Cli, ctx: &OutputCtx) -> Result<(), CliError> {
    let config = config::resolve(&cli.global)?;
    debug!(
        edgerc = %config.edgerc.display(),
        section = %config.section,
        host = %config.host,
        verbose = config.verbose,
        "configuration resolved"
    );
    let client = ApiClient::new(&config)?;
    query::run(&client, &operation_for(&cli.command), ctx)
}

/// The API operation a subcommand performs.
#[must_use]
pub fn operation_for(command: &Command) -> Operation {
    match command {
        Command::ListDomains(_) => Operation::ListDomains,
        Command::ListStreams(args) => Operation::ListStreams {
            domain: args.domain.clone(),
        },
        Command::ListEvents(args) => Operation::ListEvents {
            domain: args.domain.clone(),
            stream_id: args.stream_id.clone(),
        },
        Command::GetEvent(args) => Operation::GetEvent {
            domain: args.domain.clone(),
            stream_id: args.stream_id.clone(),
            event_name: args.event_name.clone(),
        },
        Command::ListRtmpConfigs(_) => Operation::ListRtmpConfigs,
        Command::ListRtmpStreams(_) => Operation::ListRtmpStreams,
        Command::ListStorageGroup(_) => Operation::ListStorageGroups,
        Command::GetDomain(args) => Operation::GetDomain {
            domain: args.domain.clone(),
        },
        Command::GetStream(args) => Operation::GetStream {
            domain: args.domain.clone(),
            stream_id: args.stream_id.clone(),
        },
        Command::GetRtmpConfig(args) => Operation::GetRtmpConfig {
            cpcode: args.cpcode.clone(),
        },
        Command::GetRtmpStream(args) => Operation::GetRtmpStream {
            stream_id: args.stream_id.clone(),
        },
        Command::ListMslStreams(_) => Operation::ListMslStreams,
        Command::GetMslStreams(args) => Operation::GetMslStream {
            stream_id: args.stream_id.clone(),
        },
        Command::ListCdns(_) => Operation::ListCdns,
        Command::ListCpcodes(args) => Operation::ListCpcodes {
            cpcode_type: args.cpcode_type,
            unused: args.unused,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::CpcodeType;
    use crate::cli::OutputType;
    use crate::config::ConfigError;
    use anyhow::Result;
    use clap::Parser;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::io::Write;

    fn command(args: &[&str]) -> Command {
        Cli::try_parse_from(std::iter::once("media-services").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn test_subcommand_operations() {
        assert_eq!(operation_for(&command(&["list-domains"])), Operation::ListDomains);
        assert_eq!(
            operation_for(&command(&["list-storage-group"])),
            Operation::ListStorageGroups
        );
        assert_eq!(operation_for(&command(&["list-CDNs"])), Operation::ListCdns);
        assert_eq!(
            operation_for(&command(&["get-msl-streams", "99"])),
            Operation::GetMslStream {
                stream_id: "99".to_owned()
            }
        );
        assert_eq!(
            operation_for(&command(&["get-event", "d.example.com", "7", "launch"])),
            Operation::GetEvent {
                domain: "d.example.com".to_owned(),
                stream_id: "7".to_owned(),
                event_name: "launch".to_owned(),
            }
        );
        assert_eq!(
            operation_for(&command(&["get-rtmp-config", "12345"])),
            Operation::GetRtmpConfig {
                cpcode: "12345".to_owned()
            }
        );
    }

    #[test]
    fn test_list_cpcodes_operation() {
        assert_eq!(
            operation_for(&command(&["list-cpcodes", "--type", "DELIVERY", "--unused", "false"])),
            Operation::ListCpcodes {
                cpcode_type: CpcodeType::Delivery,
                unused: false,
            }
        );
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let cli = Cli::try_parse_from([
            "media-services",
            "--edgerc",
            "/nonexistent/.edgerc",
            "list-domains",
        ])
        .unwrap();
        let ctx = OutputCtx::new(OutputType::Text, false);
        let result = dispatch(&cli, &ctx);
        assert!(matches!(
            result,
            Err(CliError::Config(ConfigError::MissingFile { .. }))
        ));
    }

    #[test]
    fn test_missing_section_fails_before_any_request() -> Result<()> {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.any_request();
            then.status(200).json_body(json!({}));
        });

        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(
            b"[default]\nclient_secret = s\nhost = h.example.net\naccess_token = a\nclient_token = c\n",
        )?;

        let edgerc = file.path().to_string_lossy().into_owned();
        let base_url = server.base_url();
        let cli = Cli::try_parse_from([
            "media-services",
            "--edgerc",
            edgerc.as_str(),
            "--section",
            "mediaservices",
            "--host",
            base_url.as_str(),
            "list-domains",
        ])?;
        let ctx = OutputCtx::new(OutputType::Text, false);

        match dispatch(&cli, &ctx) {
            Err(CliError::Config(ConfigError::MissingSection {
                section,
                candidates,
                ..
            })) => {
                assert_eq!(section, "mediaservices");
                assert_eq!(candidates, vec!["default".to_owned()]);
            }
            other => panic!("expected missing section, got {other:?}"),
        }
        mock.assert_calls(0);
        Ok(())
    }
}
