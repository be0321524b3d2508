/// CLI layer: argument parsing, logging setup and output formatting.
pub mod args;
pub mod logging;
pub mod output;
pub mod tables;

pub use args::{Cli, OutputType};
pub use output::{OutputCtx, OutputError, write_error};
