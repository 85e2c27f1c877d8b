/*
[INPUT]:  Mock server and roster fixtures
[OUTPUT]: Stores wired to a wiremock server plus JSON payloads the server would send
[POS]:    Test infrastructure - shared across store integration tests
[UPDATE]: When fixtures need new server fields
*/

#![allow(dead_code)]

use serde_json::{Value, json};
use tnt_roster_adapter::{ClientConfig, RosterClient};
use tnt_roster_store::Store;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEAM_ID: i32 = 7;

pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn store_for(server: &MockServer) -> Store {
    let client =
        RosterClient::with_config(ClientConfig::default(), &server.uri()).expect("client init");
    Store::new(client)
}

pub fn unit_json(id: i32, name: &str, rank: &str) -> Value {
    json!({
        "id": id,
        "teamId": TEAM_ID,
        "name": name,
        "unitClass": "Scavenger",
        "rank": rank,
        "species": "Human",
        "baseCost": 40,
        "skills": [],
        "injuries": [],
        "inventory": []
    })
}

pub fn team_json(money: i32, units: Vec<Value>) -> Value {
    json!({
        "id": TEAM_ID,
        "userId": 1,
        "name": "Dust Rats",
        "factionId": 2,
        "faction": "Scavengers",
        "money": money,
        "bscost": 250,
        "unitList": units,
        "inventory": []
    })
}

/// GET /teams returning just the fixture team
pub async fn mount_team_list(server: &MockServer, team: &Value) {
    Mock::given(method("GET"))
        .and(path("/teams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([team])))
        .mount(server)
        .await;
}

/// GET /teams/{TEAM_ID}
pub async fn mount_team(server: &MockServer, team: &Value) {
    Mock::given(method("GET"))
        .and(path(format!("/teams/{TEAM_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(team))
        .mount(server)
        .await;
}
