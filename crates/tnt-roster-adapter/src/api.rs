/*
[INPUT]:  Roster operations requested by the state store
[OUTPUT]: Typed results from whichever backend implements the trait
[POS]:    API seam - decouples the store from the concrete HTTP client
[UPDATE]: When endpoints are added to RosterClient
*/

use async_trait::async_trait;

use crate::http::{Result, RosterClient};
use crate::types::{Faction, NewTeamRequest, Skill, Team, Unit};

/// Everything the state store needs from the roster server.
///
/// [`RosterClient`] is the HTTP implementation; tests and offline tools can
/// supply their own.
#[async_trait]
pub trait RosterApi: Send + Sync {
    /// Attach a bearer token to subsequent calls
    fn set_auth_token(&self, token: &str);

    /// Drop the bearer token
    fn clear_auth_token(&self);

    async fn retrieve_team_list(&self) -> Result<Vec<Team>>;
    async fn get_team_by_id(&self, id: i32) -> Result<Team>;
    async fn create_new_team(&self, new_team: &NewTeamRequest) -> Result<Team>;
    async fn update_team(&self, team: &Team) -> Result<Team>;
    async fn delete_team(&self, id: i32) -> Result<()>;
    async fn get_faction_list(&self) -> Result<Vec<Faction>>;
    async fn get_units_for_team(&self, team: &Team) -> Result<Vec<Unit>>;
    async fn get_exploration_units(&self) -> Result<Vec<Unit>>;

    async fn buy_unit(&self, new_unit: &Unit) -> Result<Unit>;
    async fn get_unit(&self, id: i32) -> Result<Unit>;
    async fn update_unit(&self, unit: &Unit) -> Result<Unit>;
    async fn get_base_unit(&self, unit_class: &str) -> Result<Unit>;
    async fn get_potential_skills(&self, unit_id: i32) -> Result<Vec<Skill>>;
    async fn add_skill(&self, unit_id: i32, skill: &Skill) -> Result<()>;
}

#[async_trait]
impl RosterApi for RosterClient {
    fn set_auth_token(&self, token: &str) {
        RosterClient::set_auth_token(self, token);
    }

    fn clear_auth_token(&self) {
        RosterClient::clear_auth_token(self);
    }

    async fn retrieve_team_list(&self) -> Result<Vec<Team>> {
        RosterClient::retrieve_team_list(self).await
    }

    async fn get_team_by_id(&self, id: i32) -> Result<Team> {
        RosterClient::get_team_by_id(self, id).await
    }

    async fn create_new_team(&self, new_team: &NewTeamRequest) -> Result<Team> {
        RosterClient::create_new_team(self, new_team).await
    }

    async fn update_team(&self, team: &Team) -> Result<Team> {
        RosterClient::update_team(self, team).await
    }

    async fn delete_team(&self, id: i32) -> Result<()> {
        RosterClient::delete_team(self, id).await
    }

    async fn get_faction_list(&self) -> Result<Vec<Faction>> {
        RosterClient::get_faction_list(self).await
    }

    async fn get_units_for_team(&self, team: &Team) -> Result<Vec<Unit>> {
        RosterClient::get_units_for_team(self, team).await
    }

    async fn get_exploration_units(&self) -> Result<Vec<Unit>> {
        RosterClient::get_exploration_units(self).await
    }

    async fn buy_unit(&self, new_unit: &Unit) -> Result<Unit> {
        RosterClient::buy_unit(self, new_unit).await
    }

    async fn get_unit(&self, id: i32) -> Result<Unit> {
        RosterClient::get_unit(self, id).await
    }

    async fn update_unit(&self, unit: &Unit) -> Result<Unit> {
        RosterClient::update_unit(self, unit).await
    }

    async fn get_base_unit(&self, unit_class: &str) -> Result<Unit> {
        RosterClient::get_base_unit(self, unit_class).await
    }

    async fn get_potential_skills(&self, unit_id: i32) -> Result<Vec<Skill>> {
        RosterClient::get_potential_skills(self, unit_id).await
    }

    async fn add_skill(&self, unit_id: i32, skill: &Skill) -> Result<()> {
        RosterClient::add_skill(self, unit_id, skill).await
    }
}
