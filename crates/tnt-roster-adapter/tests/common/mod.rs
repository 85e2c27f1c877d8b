/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for tnt-roster-adapter tests

use tnt_roster_adapter::{ClientConfig, RosterClient};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server
pub fn client_for(server: &MockServer) -> RosterClient {
    RosterClient::with_config(ClientConfig::default(), &server.uri()).expect("client init")
}

/// Mock bearer token for testing
pub fn mock_token() -> String {
    "eyJhbGciOiJIUzUxMiJ9.test.signature".to_string()
}
