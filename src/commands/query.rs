/// Run one query: signed GET, then render the payload.
use crate::api::{ApiClient, Operation};
use crate::cli::output::render;
use crate::cli::{OutputCtx, OutputType, tables};
use crate::errors::CliError;

/// Run `operation` and print the result to stdout.
///
/// # Errors
///
/// Returns `CliError::Api` on request failure and `CliError::Output` when
/// the payload does not fit the operation's table schema.
pub fn run(client: &ApiClient, operation: &Operation, ctx: &OutputCtx) -> Result<(), CliError> {
    let text = fetch(client, operation, ctx.output_type, ctx)?;
    println!("{text}");
    Ok(())
}

/// Run `operation` and return the rendered output.
///
/// # Errors
///
/// Same as [`run`].
pub fn fetch(
    client: &ApiClient,
    operation: &Operation,
    output_type: OutputType,
    ctx: &OutputCtx,
) -> Result<String, CliError> {
    let t_call = ctx.timer("api_call");
    let payload = client.call(operation)?;
    drop(t_call);

    let _t_render = ctx.timer("render");
    Ok(render(
        &payload,
        output_type,
        tables::for_operation(operation),
    )?)
}
