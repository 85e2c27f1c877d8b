/*
[INPUT]:  HTTP client configuration and roster API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod teams;
pub mod units;

pub use error::{Result, RosterError};

pub use client::{ClientConfig, DEFAULT_BASE_URL, RosterClient};
