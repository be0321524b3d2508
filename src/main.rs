#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! media-services: query the Akamai Media Services Live configuration API.

mod api;
mod cli;
mod commands;
mod config;
mod errors;
mod types;

use clap::Parser;

use cli::{Cli, OutputCtx, write_error};
use errors::ARGUMENT_ERROR_EXIT;
use types::ErrorOutput;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if cli::args::prints_parse_outcome(err.kind()) => err.exit(),
        Err(_) => std::process::exit(ARGUMENT_ERROR_EXIT),
    };

    cli::logging::init(cli.global.verbose, cli.global.debug);

    let ctx = OutputCtx::new(cli.command.output_type(), cli.global.debug > 0);

    if let Err(err) = commands::dispatch(&cli, &ctx) {
        tracing::debug!(code = err.code(), "command failed");
        write_error(&ErrorOutput::from_cli_error(&err), ctx.output_type);
        std::process::exit(err.exit_code());
    }
}
