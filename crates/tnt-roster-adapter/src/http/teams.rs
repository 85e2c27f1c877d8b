/*
[INPUT]:  Team payloads and ids
[OUTPUT]: Teams, factions and the units a team may recruit
[POS]:    HTTP layer - team and faction endpoints
[UPDATE]: When adding new team endpoints or changing payloads
*/

use crate::http::{Result, RosterClient};
use crate::types::{Faction, NewTeamRequest, Team, Unit};
use reqwest::Method;
use tracing::debug;

impl RosterClient {
    /// List the logged-in user's teams
    ///
    /// GET /teams
    pub async fn retrieve_team_list(&self) -> Result<Vec<Team>> {
        let builder = self.request(Method::GET, "/teams")?;
        self.send_json(builder).await
    }

    /// Fetch a single team owned by the user
    ///
    /// GET /teams/{id}
    pub async fn get_team_by_id(&self, id: i32) -> Result<Team> {
        let builder = self.request(Method::GET, &format!("/teams/{id}"))?;
        self.send_json(builder).await
    }

    /// Create a team from its name and faction
    ///
    /// POST /teams
    pub async fn create_new_team(&self, new_team: &NewTeamRequest) -> Result<Team> {
        debug!(name = %new_team.name, faction_id = new_team.faction_id, "creating team");
        let builder = self.request(Method::POST, "/teams")?.json(new_team);
        self.send_json(builder).await
    }

    /// Persist an edited team
    ///
    /// PUT /teams/{team.id}
    pub async fn update_team(&self, team: &Team) -> Result<Team> {
        let builder = self
            .request(Method::PUT, &format!("/teams/{}", team.id))?
            .json(team);
        self.send_json(builder).await
    }

    /// Delete a team owned by the user
    ///
    /// DELETE /teams/{id}
    pub async fn delete_team(&self, id: i32) -> Result<()> {
        let builder = self.request(Method::DELETE, &format!("/teams/{id}"))?;
        self.send_empty(builder).await
    }

    /// List every playable faction
    ///
    /// GET /factions
    pub async fn get_faction_list(&self) -> Result<Vec<Faction>> {
        let builder = self.request(Method::GET, "/factions")?;
        self.send_json(builder).await
    }

    /// Units of the team's faction that the team may currently buy
    ///
    /// POST /factions/{team.factionId}
    pub async fn get_units_for_team(&self, team: &Team) -> Result<Vec<Unit>> {
        let builder = self
            .request(Method::POST, &format!("/factions/{}", team.faction_id))?
            .json(team);
        self.send_json(builder).await
    }

    /// Units that can be picked up for free while exploring
    ///
    /// GET /explorationUnits
    pub async fn get_exploration_units(&self) -> Result<Vec<Unit>> {
        let builder = self.request(Method::GET, "/explorationUnits")?;
        self.send_json(builder).await
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{ClientConfig, RosterClient, RosterError};
    use crate::types::{NewTeamRequest, Team};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> RosterClient {
        RosterClient::with_config(ClientConfig::default(), &server.uri()).expect("client init")
    }

    #[tokio::test]
    async fn test_retrieve_team_list_sends_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teams"))
            .and(header("authorization", "Bearer tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "Raiders", "money": 500, "factionId": 2, "unitList": []},
                {"id": 2, "name": "Wardens", "money": 120, "factionId": 3, "unitList": []}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client.set_auth_token("tok-1");
        let teams = client.retrieve_team_list().await.expect("team list");

        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].name, "Raiders");
        assert_eq!(teams[1].money, 120);
    }

    #[tokio::test]
    async fn test_create_new_team_posts_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/teams"))
            .and(body_json(json!({"name": "Raiders", "factionId": 2})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 9, "name": "Raiders", "factionId": 2, "money": 1000
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let team = client
            .create_new_team(&NewTeamRequest::new("Raiders", 2))
            .await
            .expect("create team");

        assert_eq!(team.id, 9);
        assert_eq!(team.money, 1000);
    }

    #[tokio::test]
    async fn test_get_units_for_team_uses_faction_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/factions/4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 30, "unitClass": "Boss", "rank": "Leader", "baseCost": 100}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let team = Team {
            id: 1,
            faction_id: 4,
            ..Team::default()
        };
        let units = client.get_units_for_team(&team).await.expect("units");

        assert_eq!(units.len(), 1);
        assert_eq!(units[0].unit_class, "Boss");
    }

    #[tokio::test]
    async fn test_delete_team_accepts_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/teams/5"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client.delete_team(5).await.expect("delete team");
    }

    #[tokio::test]
    async fn test_update_team_surfaces_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/teams/3"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "status": 400,
                "error": "Bad Request",
                "message": "Team update is not valid"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let team = Team {
            id: 3,
            ..Team::default()
        };
        let err = client.update_team(&team).await.expect_err("should fail");

        assert!(matches!(err, RosterError::Api { status: 400, .. }));
        assert_eq!(err.user_message(), "Team update is not valid");
    }
}
