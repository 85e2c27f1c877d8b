/*
[INPUT]:  User intents (pick a team, buy a unit, spend money, equip an item)
[OUTPUT]: Server-side changes mirrored into StoreState
[POS]:    Actions layer - async workflows on top of the store core
[UPDATE]: When the roster UI adds a new workflow
*/

use tnt_roster_adapter::{Faction, NewTeamRequest, RosterApi, Skill, Team, Unit};
use tracing::info;

use crate::error::{Result, StoreError};
use crate::mutations::Mutation;
use crate::rules;
use crate::store::Store;

impl<A: RosterApi> Store<A> {
    pub async fn load_factions(&mut self) -> Result<Vec<Faction>> {
        let result = self.api.get_faction_list().await.map_err(StoreError::from);
        self.guard(result).await
    }

    pub async fn create_team(&mut self, name: &str, faction_id: i32) -> Result<Team> {
        let result: Result<Team> = async {
            let request = NewTeamRequest::new(name, faction_id);
            let team = self.api.create_new_team(&request).await?;
            info!(team_id = team.id, faction_id, "team created");
            if self.state.show_new_team_form {
                self.commit(Mutation::ToggleNewTeamForm).await?;
            }
            self.commit(Mutation::SetCurrentTeam(team.clone())).await?;
            Ok(team)
        }
        .await;
        let team = self.guard(result).await?;
        self.load_teams().await?;
        Ok(team)
    }

    /// Make `team_id` the active team and open its detail panel
    pub async fn select_team(&mut self, team_id: i32) -> Result<()> {
        let result: Result<()> = async {
            let team = self.api.get_team_by_id(team_id).await?;
            self.commit(Mutation::SetCurrentTeam(team)).await
        }
        .await;
        self.guard(result).await
    }

    /// Back to the team list
    pub async fn clear_current_team(&mut self) -> Result<()> {
        let result = self.commit(Mutation::ClearCurrentTeam).await;
        self.guard(result).await?;
        self.load_teams().await
    }

    pub async fn delete_team(&mut self, team_id: i32) -> Result<()> {
        let result: Result<()> = async {
            self.api.delete_team(team_id).await?;
            info!(team_id, "team deleted");
            if self.state.current_team_id() == Some(team_id) {
                self.commit(Mutation::ClearCurrentTeam).await?;
            }
            Ok(())
        }
        .await;
        self.guard(result).await?;
        self.load_teams().await
    }

    pub async fn rename_team(&mut self, name: &str) -> Result<Team> {
        let result: Result<Team> = async {
            self.commit(Mutation::ChangeTeamName(name.to_string())).await?;
            self.save_current_team().await
        }
        .await;
        self.guard(result).await
    }

    pub async fn gain_money(&mut self, amount: i32) -> Result<Team> {
        let result: Result<Team> = async {
            self.commit(Mutation::GainMoney(amount)).await?;
            let team = self.save_current_team().await?;
            self.commit(Mutation::RemoveShowPopup).await?;
            Ok(team)
        }
        .await;
        self.guard(result).await
    }

    /// Spend team money; refused locally when the team would go negative
    pub async fn lose_money(&mut self, amount: i32) -> Result<Team> {
        let result: Result<Team> = async {
            self.commit(Mutation::LoseMoney(amount)).await?;
            let team = self.save_current_team().await?;
            self.commit(Mutation::RemoveShowPopup).await?;
            Ok(team)
        }
        .await;
        self.guard(result).await
    }

    /// Units the active team's faction offers
    pub async fn load_purchase_options(&mut self) -> Result<Vec<Unit>> {
        let result: Result<Vec<Unit>> = async {
            let team = self.active_team()?;
            Ok(self.api.get_units_for_team(&team).await?)
        }
        .await;
        self.guard(result).await
    }

    pub async fn load_exploration_units(&mut self) -> Result<Vec<Unit>> {
        let result = self.api.get_exploration_units().await.map_err(StoreError::from);
        self.guard(result).await
    }

    /// Recruit `candidate` into the active team after the roster rules allow it
    pub async fn buy_unit(&mut self, candidate: &Unit) -> Result<Unit> {
        let result: Result<Unit> = async {
            let team = self.active_team()?;
            rules::check_purchase(&team, candidate)?;

            let mut new_unit = candidate.clone();
            new_unit.team_id = team.id;
            let bought = self.api.buy_unit(&new_unit).await?;
            info!(
                team_id = team.id,
                unit_id = bought.id,
                class = %bought.unit_class,
                "unit bought"
            );

            if self.state.show_new_unit_form {
                self.commit(Mutation::ToggleNewUnitForm).await?;
            }
            Ok(bought)
        }
        .await;
        let bought = self.guard(result).await?;
        self.reload_current_team().await?;
        Ok(bought)
    }

    /// Make `unit_id` the active unit and open its detail panel
    pub async fn select_unit(&mut self, unit_id: i32) -> Result<()> {
        let result: Result<()> = async {
            let unit = self.api.get_unit(unit_id).await?;
            self.commit(Mutation::SetCurrentUnit(unit)).await
        }
        .await;
        self.guard(result).await
    }

    /// Back to the team panel; the team is reloaded from the server
    pub async fn clear_current_unit(&mut self) -> Result<()> {
        self.commit(Mutation::ClearCurrentUnit).await
    }

    pub async fn rename_unit(&mut self, name: &str) -> Result<Unit> {
        let result: Result<Unit> = async {
            self.commit(Mutation::ChangeUnitName(name.to_string())).await?;
            self.save_current_unit().await
        }
        .await;
        self.guard(result).await
    }

    pub async fn gain_experience(&mut self, amount: i32) -> Result<Unit> {
        let result: Result<Unit> = async {
            self.commit(Mutation::GainUnspentExp(amount)).await?;
            let unit = self.save_current_unit().await?;
            self.commit(Mutation::RemoveShowPopup).await?;
            Ok(unit)
        }
        .await;
        self.guard(result).await
    }

    /// Skills the active unit may take with its next advance
    pub async fn load_potential_skills(&mut self) -> Result<Vec<Skill>> {
        let result: Result<Vec<Skill>> = async {
            let unit = self.active_unit()?;
            Ok(self.api.get_potential_skills(unit.id).await?)
        }
        .await;
        self.guard(result).await
    }

    pub async fn add_skill(&mut self, skill: &Skill) -> Result<()> {
        let result: Result<()> = async {
            let unit = self.active_unit()?;
            self.api.add_skill(unit.id, skill).await?;
            info!(unit_id = unit.id, skill = %skill.name, "skill added");
            Ok(())
        }
        .await;
        self.guard(result).await?;
        self.reload_current_unit().await
    }

    /// Reference profile for the active unit's class
    pub async fn load_base_unit(&mut self) -> Result<Unit> {
        let result: Result<Unit> = async {
            let unit = self.active_unit()?;
            Ok(self.api.get_base_unit(&unit.unit_class).await?)
        }
        .await;
        self.guard(result).await
    }

    /// Equip or unequip one of the active unit's items
    pub async fn set_item_equipped(&mut self, item_id: i32, equipped: bool) -> Result<Unit> {
        let result: Result<Unit> = async {
            let mut unit = self.active_unit()?;
            let index = unit
                .inventory
                .iter()
                .position(|item| item.id == item_id)
                .ok_or(StoreError::UnknownItem { item_id })?;
            if equipped {
                rules::check_equip(&unit, &unit.inventory[index])?;
            }

            unit.inventory[index].equipped = equipped;
            let saved = self.api.update_unit(&unit).await?;
            self.commit(Mutation::SetCurrentUnit(saved.clone())).await?;
            Ok(saved)
        }
        .await;
        self.guard(result).await
    }

    async fn save_current_team(&mut self) -> Result<Team> {
        let team = self.active_team()?;
        let saved = self.api.update_team(&team).await?;
        self.commit(Mutation::SetCurrentTeamNoPageChange(saved.clone())).await?;
        Ok(saved)
    }

    async fn save_current_unit(&mut self) -> Result<Unit> {
        let unit = self.active_unit()?;
        let saved = self.api.update_unit(&unit).await?;
        self.commit(Mutation::SetCurrentUnit(saved.clone())).await?;
        Ok(saved)
    }

    fn active_team(&self) -> Result<Team> {
        self.state.current_team.clone().ok_or(StoreError::NoActiveTeam)
    }

    fn active_unit(&self) -> Result<Unit> {
        self.state.current_unit.clone().ok_or(StoreError::NoActiveUnit)
    }
}
