/// Gateway to the media live-stream configuration API.
pub mod auth;
pub mod client;
pub mod endpoint;
pub mod errors;

pub use auth::Credentials;
pub use client::ApiClient;
pub use endpoint::{CpcodeType, Operation};
pub use errors::ApiError;
