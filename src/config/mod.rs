/// Configuration layer: credentials file loading and CLI/file merging.
pub mod edgerc;
pub mod errors;
pub mod resolve;

pub use errors::ConfigError;
pub use resolve::{Configuration, DEFAULT_EDGERC, DEFAULT_SECTION, resolve};
