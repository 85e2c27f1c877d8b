/*
[INPUT]:  Mock HTTP responses
[OUTPUT]: Test results for the roster HTTP client
[POS]:    Integration tests - HTTP endpoints through the RosterApi trait
[UPDATE]: When HTTP endpoints change
*/

mod common;

use common::{client_for, mock_token, setup_mock_server};
use serde_json::json;
use tnt_roster_adapter::{ClientConfig, RosterApi, RosterClient, RosterError};
use tokio_test::assert_ok;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn test_client_creation() {
    let _client = assert_ok!(RosterClient::new());
}

#[test]
fn test_client_with_config() {
    let config = ClientConfig::default();
    let _client = assert_ok!(RosterClient::with_config(config, "https://roster.example.com/api"));
}

#[test]
fn test_invalid_base_url() {
    let err = RosterClient::with_config(ClientConfig::default(), "not a url").unwrap_err();
    assert!(matches!(err, RosterError::UrlParse(_)));
}

#[tokio::test]
async fn test_token_set_through_trait_reaches_requests() {
    let server = setup_mock_server().await;
    let token = mock_token();
    Mock::given(method("GET"))
        .and(path("/factions"))
        .and(header("authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Tribals"},
            {"id": 7, "name": "Freelancers"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let api: &dyn RosterApi = &client;
    api.set_auth_token(&token);

    let factions = assert_ok!(api.get_faction_list().await);
    assert_eq!(factions.len(), 2);
    assert_eq!(factions[1].name, "Freelancers");
}

#[tokio::test]
async fn test_cleared_token_is_not_sent() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/teams"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/teams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.set_auth_token(mock_token());
    client.clear_auth_token();

    let teams = assert_ok!(client.retrieve_team_list().await);
    assert!(teams.is_empty());
}

#[tokio::test]
async fn test_team_round_trip_through_trait() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/teams/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "name": "Wardens",
            "money": 250,
            "factionId": 2,
            "unitList": [
                {"id": 11, "teamId": 3, "name": "Boss", "rank": "Leader"}
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let api: &dyn RosterApi = &client;
    let team = assert_ok!(api.get_team_by_id(3).await);

    assert_eq!(team.unit_list.len(), 1);
    assert_eq!(team.unit_index(11), Some(0));
}

#[tokio::test]
async fn test_exploration_units() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/explorationUnits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 50, "unitClass": "Wandering Merc", "rank": "Freelancer"}
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let units = assert_ok!(client.get_exploration_units().await);
    assert_eq!(units[0].unit_class, "Wandering Merc");
}

#[tokio::test]
async fn test_unreachable_server_is_retryable() {
    let client = RosterClient::with_config(ClientConfig::default(), "http://127.0.0.1:9")
        .expect("client init");
    let err = client.retrieve_team_list().await.expect_err("should fail");
    assert!(err.is_retryable());
}
