/// CLI argument definitions via clap derive.
use clap::error::ErrorKind;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::api::CpcodeType;
use crate::config::{DEFAULT_EDGERC, DEFAULT_SECTION};

/// media-services: query media live-stream configuration from the CLI.
#[derive(Debug, Parser)]
#[command(
    name = "media-services",
    about = "Query media live-stream configuration (domains, streams, RTMP, MSL origin)",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Verbose mode (logs each request).
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Debug mode (logs HTTP headers; `-dd` for transport traces).
    #[arg(long, short = 'd', global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Location of the credentials file.
    #[arg(
        long,
        short = 'e',
        global = true,
        env = "AKAMAI_EDGERC",
        value_name = "CREDENTIALS_FILE",
        default_value = DEFAULT_EDGERC
    )]
    pub edgerc: String,

    /// Credentials file section to use.
    #[arg(
        long,
        short = 'c',
        global = true,
        env = "AKAMAI_EDGERC_SECTION",
        value_name = "SECTION",
        default_value = DEFAULT_SECTION
    )]
    pub section: String,

    /// Switch key to act on behalf of a different account.
    #[arg(long = "accountSwitchKey", short = 'a', global = true, value_name = "KEY")]
    pub account_switch_key: Option<String>,

    /// Override the API host from the credentials file.
    #[arg(long, global = true, value_name = "HOST")]
    pub host: Option<String>,
}

/// Output type variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputType {
    /// Pretty-printed JSON, exactly as returned by the API.
    Json,
    /// Fixed-column table with a header row.
    #[default]
    Text,
}

/// `--output-type` flag accepted by every subcommand.
#[derive(Debug, Clone, Copy, Args)]
pub struct OutputArgs {
    /// Output type.
    #[arg(long = "output-type", short = 't', value_enum, default_value_t = OutputType::Text)]
    pub output_type: OutputType,
}

/// All subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all domains.
    ListDomains(OutputArgs),
    /// List all streams of a domain.
    ListStreams(DomainArgs),
    /// List all events of a stream.
    ListEvents(StreamArgs),
    /// Get a single event of a stream.
    GetEvent(EventArgs),
    /// List all RTMP configs.
    ListRtmpConfigs(OutputArgs),
    /// List all RTMP streams.
    ListRtmpStreams(OutputArgs),
    /// List all storage groups.
    ListStorageGroup(OutputArgs),
    /// Get a domain.
    GetDomain(DomainArgs),
    /// Get a stream.
    GetStream(StreamArgs),
    /// Get an RTMP config.
    GetRtmpConfig(CpcodeArgs),
    /// Get an RTMP stream.
    GetRtmpStream(StreamIdArgs),
    /// List all MSL streams, newest first.
    ListMslStreams(OutputArgs),
    /// Get MSL stream details.
    GetMslStreams(StreamIdArgs),
    /// List the CDNs available to MSL streams.
    #[command(name = "list-CDNs")]
    ListCdns(OutputArgs),
    /// List CP codes.
    ListCpcodes(CpcodeListArgs),
}

/// Arguments for commands addressed by domain.
#[derive(Debug, Args)]
pub struct DomainArgs {
    /// Domain name.
    #[arg(value_name = "DOMAIN")]
    pub domain: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for commands addressed by domain and stream.
#[derive(Debug, Args)]
pub struct StreamArgs {
    /// Domain name.
    #[arg(value_name = "DOMAIN")]
    pub domain: String,

    /// Stream ID.
    #[arg(value_name = "STREAM_ID")]
    pub stream_id: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for `media-services get-event`.
#[derive(Debug, Args)]
pub struct EventArgs {
    /// Domain name.
    #[arg(value_name = "DOMAIN")]
    pub domain: String,

    /// Stream ID.
    #[arg(value_name = "STREAM_ID")]
    pub stream_id: String,

    /// Event name.
    #[arg(value_name = "EVENT_NAME")]
    pub event_name: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for `media-services get-rtmp-config`.
#[derive(Debug, Args)]
pub struct CpcodeArgs {
    /// CP code of the RTMP config.
    #[arg(value_name = "CP_CODE")]
    pub cpcode: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for commands addressed by stream ID alone.
#[derive(Debug, Args)]
pub struct StreamIdArgs {
    /// Stream ID.
    #[arg(value_name = "STREAM_ID")]
    pub stream_id: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for `media-services list-cpcodes`.
#[derive(Debug, Args)]
pub struct CpcodeListArgs {
    /// CP code type.
    #[arg(long = "type", value_enum, default_value_t = CpcodeType::Ingest)]
    pub cpcode_type: CpcodeType,

    /// Only list CP codes not yet used to provision an origin.
    #[arg(long, value_name = "true|false", default_value_t = true, action = ArgAction::Set)]
    pub unused: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Whether a parse outcome is printed. Only explicit help and version
/// requests are; every other parse failure exits without output.
#[must_use]
pub fn prints_parse_outcome(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::DisplayHelp | ErrorKind::DisplayVersion)
}

impl Command {
    /// The output type requested for this command.
    #[must_use]
    pub fn output_type(&self) -> OutputType {
        match self {
            Self::ListDomains(output)
            | Self::ListRtmpConfigs(output)
            | Self::ListRtmpStreams(output)
            | Self::ListStorageGroup(output)
            | Self::ListMslStreams(output)
            | Self::ListCdns(output) => output.output_type,
            Self::ListStreams(args) | Self::GetDomain(args) => args.output.output_type,
            Self::ListEvents(args) | Self::GetStream(args) => args.output.output_type,
            Self::GetEvent(args) => args.output.output_type,
            Self::GetRtmpConfig(args) => args.output.output_type,
            Self::GetRtmpStream(args) | Self::GetMslStreams(args) => args.output.output_type,
            Self::ListCpcodes(args) => args.output.output_type,
        }
    }
}
