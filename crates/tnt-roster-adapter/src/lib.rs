/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public roster API adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod api;
pub mod auth;
pub mod http;
pub mod types;

pub use api::RosterApi;

// Re-export commonly used types from auth
pub use auth::{TokenData, TokenManager};

// Re-export commonly used types from http
pub use http::{ClientConfig, DEFAULT_BASE_URL, Result, RosterClient, RosterError};

// Re-export all types
pub use types::*;
