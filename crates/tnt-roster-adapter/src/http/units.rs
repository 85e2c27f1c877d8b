/*
[INPUT]:  Unit payloads, unit ids and skill choices
[OUTPUT]: Units, reference units and skill lists
[POS]:    HTTP layer - unit and skill endpoints
[UPDATE]: When adding new unit endpoints or changing payloads
*/

use crate::http::{Result, RosterClient};
use crate::types::{Skill, Unit};
use reqwest::Method;
use tracing::debug;

impl RosterClient {
    /// Recruit a unit into a team
    ///
    /// POST /units
    pub async fn buy_unit(&self, new_unit: &Unit) -> Result<Unit> {
        debug!(team_id = new_unit.team_id, unit_class = %new_unit.unit_class, "buying unit");
        let builder = self.request(Method::POST, "/units")?.json(new_unit);
        self.send_json(builder).await
    }

    /// Fetch a unit owned by the user
    ///
    /// GET /units/{id}
    pub async fn get_unit(&self, id: i32) -> Result<Unit> {
        let builder = self.request(Method::GET, &format!("/units/{id}"))?;
        self.send_json(builder).await
    }

    /// Persist an edited unit; the server validates the kind of change
    ///
    /// PUT /units/{unit.id}
    pub async fn update_unit(&self, unit: &Unit) -> Result<Unit> {
        let builder = self
            .request(Method::PUT, &format!("/units/{}", unit.id))?
            .json(unit);
        self.send_json(builder).await
    }

    /// Reference stat line for a unit class
    ///
    /// GET /units?class={unit_class}
    pub async fn get_base_unit(&self, unit_class: &str) -> Result<Unit> {
        let builder = self
            .request(Method::GET, "/units")?
            .query(&[("class", unit_class)]);
        self.send_json(builder).await
    }

    /// Skills the unit may learn with its next advance
    ///
    /// GET /units/{id}/skills
    pub async fn get_potential_skills(&self, unit_id: i32) -> Result<Vec<Skill>> {
        let builder = self.request(Method::GET, &format!("/units/{unit_id}/skills"))?;
        self.send_json(builder).await
    }

    /// Teach the unit a skill
    ///
    /// POST /units/{id}/skills
    pub async fn add_skill(&self, unit_id: i32, skill: &Skill) -> Result<()> {
        debug!(unit_id, skill_id = skill.id, "adding skill");
        let builder = self
            .request(Method::POST, &format!("/units/{unit_id}/skills"))?
            .json(skill);
        self.send_empty(builder).await
    }
}
