/*
[INPUT]:  Mutation values committed by actions or the caller
[OUTPUT]: Updated StoreState plus follow-up effects for the store to run
[POS]:    State layer - the only code that writes StoreState
[UPDATE]: When adding a state field or a new synchronous edit
*/

use tnt_roster_adapter::{Injury, ItemTrait, Skill, Team, Unit, User};
use tracing::{debug, warn};

use crate::derive;
use crate::error::{Result, StoreError};
use crate::state::{LOGIN_PAGE, StoreState};

/// Synchronous edits to the store state
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Store the bearer token and hand it to the API client
    SetAuthToken(String),
    SetUser(User),
    /// Drop the session and every loaded roster
    Logout,

    SetTeamList(Vec<Team>),
    /// Make a team active and switch to its detail panel
    SetCurrentTeam(Team),
    /// Replace the active team without touching panel flags
    SetCurrentTeamNoPageChange(Team),
    ClearCurrentTeam,
    /// Make a unit active, write it back into the active team and re-derive lists
    SetCurrentUnit(Unit),
    /// Leave the unit panel; the team is reloaded afterwards
    ClearCurrentUnit,

    ToggleNewUnitForm,
    ToggleNewTeamForm,

    ChangeTeamName(String),
    GainMoney(i32),
    LoseMoney(i32),
    ChangeUnitName(String),
    GainUnspentExp(i32),

    ShowErrorOff,
    ShowErrorOn(String),

    SetUnitInventoryTraits(Vec<ItemTrait>),
    SetTeamInventoryTraits(Vec<ItemTrait>),
    SetUnitSkillsSorted(Vec<Skill>),
    SetUnitInjuriesSorted(Vec<Injury>),

    SetManageInventory(bool),
    ToggleShowPopup,
    /// Close the popup and every form inside it
    RemoveShowPopup,
    SetShowBuyItems(bool),
    SetShowGainMoneyForm(bool),
    SetShowLoseMoneyForm(bool),
    SetShowGainExpForm(bool),
    SetPopupSubForm(Option<String>),
    SetCurrentPage(Option<String>),
    SetItemToModify(Option<i32>),
    ToggleViewNavigation,
}

impl Mutation {
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::SetAuthToken(_) => "set_auth_token",
            Mutation::SetUser(_) => "set_user",
            Mutation::Logout => "logout",
            Mutation::SetTeamList(_) => "set_team_list",
            Mutation::SetCurrentTeam(_) => "set_current_team",
            Mutation::SetCurrentTeamNoPageChange(_) => "set_current_team_no_page_change",
            Mutation::ClearCurrentTeam => "clear_current_team",
            Mutation::SetCurrentUnit(_) => "set_current_unit",
            Mutation::ClearCurrentUnit => "clear_current_unit",
            Mutation::ToggleNewUnitForm => "toggle_new_unit_form",
            Mutation::ToggleNewTeamForm => "toggle_new_team_form",
            Mutation::ChangeTeamName(_) => "change_team_name",
            Mutation::GainMoney(_) => "gain_money",
            Mutation::LoseMoney(_) => "lose_money",
            Mutation::ChangeUnitName(_) => "change_unit_name",
            Mutation::GainUnspentExp(_) => "gain_unspent_exp",
            Mutation::ShowErrorOff => "show_error_off",
            Mutation::ShowErrorOn(_) => "show_error_on",
            Mutation::SetUnitInventoryTraits(_) => "set_unit_inventory_traits",
            Mutation::SetTeamInventoryTraits(_) => "set_team_inventory_traits",
            Mutation::SetUnitSkillsSorted(_) => "set_unit_skills_sorted",
            Mutation::SetUnitInjuriesSorted(_) => "set_unit_injuries_sorted",
            Mutation::SetManageInventory(_) => "set_manage_inventory",
            Mutation::ToggleShowPopup => "toggle_show_popup",
            Mutation::RemoveShowPopup => "remove_show_popup",
            Mutation::SetShowBuyItems(_) => "set_show_buy_items",
            Mutation::SetShowGainMoneyForm(_) => "set_show_gain_money_form",
            Mutation::SetShowLoseMoneyForm(_) => "set_show_lose_money_form",
            Mutation::SetShowGainExpForm(_) => "set_show_gain_exp_form",
            Mutation::SetPopupSubForm(_) => "set_popup_sub_form",
            Mutation::SetCurrentPage(_) => "set_current_page",
            Mutation::SetItemToModify(_) => "set_item_to_modify",
            Mutation::ToggleViewNavigation => "toggle_view_navigation",
        }
    }
}

/// Follow-up work a mutation asks the store to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Push the token into the API client
    ApplyAuthToken(String),
    ClearAuthToken,
    /// Write token and user to the session file
    PersistSession,
    ClearSession,
    /// Fetch the active team again from the server
    ReloadCurrentTeam,
}

impl StoreState {
    /// Apply one mutation.
    ///
    /// A rejected mutation leaves the state exactly as it was.
    pub fn apply(&mut self, mutation: Mutation) -> Result<Vec<Effect>> {
        debug!(mutation = mutation.name(), "apply mutation");
        let mut effects = Vec::new();

        match mutation {
            Mutation::SetAuthToken(token) => {
                self.token = token.clone();
                effects.push(Effect::ApplyAuthToken(token));
                effects.push(Effect::PersistSession);
            }
            Mutation::SetUser(user) => {
                self.user = Some(user);
                effects.push(Effect::PersistSession);
            }
            Mutation::Logout => {
                self.token.clear();
                self.user = None;
                self.team_list.clear();
                self.current_team = None;
                self.current_unit = None;
                self.clear_unit_lists();
                self.team_inventory_traits.clear();
                self.show_unit_detail = false;
                self.show_team_detail = false;
                self.current_page = Some(LOGIN_PAGE.to_string());
                effects.push(Effect::ClearAuthToken);
                effects.push(Effect::ClearSession);
            }

            Mutation::SetTeamList(teams) => self.team_list = teams,
            Mutation::SetCurrentTeam(team) => {
                self.set_team(team);
                self.manage_inventory = false;
                self.show_team_detail = true;
                self.show_team_list = false;
                self.show_unit_detail = false;
            }
            Mutation::SetCurrentTeamNoPageChange(team) => self.set_team(team),
            Mutation::ClearCurrentTeam => {
                self.current_team = None;
                self.current_unit = None;
                self.clear_unit_lists();
                self.team_inventory_traits.clear();
                self.manage_inventory = false;
                self.show_team_detail = false;
                self.show_unit_detail = false;
                self.show_team_list = true;
            }
            Mutation::SetCurrentUnit(unit) => {
                self.write_back_unit(&unit);
                self.unit_inventory_traits = derive::unit_inventory_traits(&unit);
                self.unit_skills_sorted = derive::sorted_unit_skills(&unit);
                self.unit_injuries_sorted = derive::sorted_injuries(&unit);
                self.current_unit = Some(unit);
                self.show_unit_detail = true;
                self.show_team_detail = false;
            }
            Mutation::ClearCurrentUnit => {
                self.current_unit = None;
                self.clear_unit_lists();
                self.manage_inventory = false;
                self.show_unit_detail = false;
                self.show_team_detail = true;
                effects.push(Effect::ReloadCurrentTeam);
            }

            Mutation::ToggleNewUnitForm => self.show_new_unit_form = !self.show_new_unit_form,
            Mutation::ToggleNewTeamForm => self.show_new_team_form = !self.show_new_team_form,

            Mutation::ChangeTeamName(name) => self.team_mut()?.name = name,
            Mutation::GainMoney(amount) => {
                if amount < 0 {
                    return Err(StoreError::NegativeAmount { amount });
                }
                let team = self.team_mut()?;
                team.money = team
                    .money
                    .checked_add(amount)
                    .ok_or(StoreError::AmountTooLarge { amount })?;
            }
            Mutation::LoseMoney(amount) => {
                if amount < 0 {
                    return Err(StoreError::NegativeAmount { amount });
                }
                let team = self.team_mut()?;
                if team.money - amount < 0 {
                    return Err(StoreError::NotEnoughMoney {
                        money: team.money,
                        requested: amount,
                    });
                }
                team.money -= amount;
            }
            Mutation::ChangeUnitName(name) => self.unit_mut()?.name = name,
            Mutation::GainUnspentExp(amount) => {
                if amount <= 0 {
                    return Err(StoreError::NonPositiveExperience { amount });
                }
                let unit = self.unit_mut()?;
                unit.unspent_experience = unit
                    .unspent_experience
                    .checked_add(amount)
                    .ok_or(StoreError::AmountTooLarge { amount })?;
            }

            Mutation::ShowErrorOff => {
                self.show_error = false;
                self.error_message.clear();
            }
            Mutation::ShowErrorOn(message) => {
                self.error_message = message;
                self.show_error = true;
            }

            Mutation::SetUnitInventoryTraits(traits) => self.unit_inventory_traits = traits,
            Mutation::SetTeamInventoryTraits(traits) => self.team_inventory_traits = traits,
            Mutation::SetUnitSkillsSorted(skills) => self.unit_skills_sorted = skills,
            Mutation::SetUnitInjuriesSorted(injuries) => self.unit_injuries_sorted = injuries,

            Mutation::SetManageInventory(flag) => self.manage_inventory = flag,
            Mutation::ToggleShowPopup => self.show_popup = !self.show_popup,
            Mutation::RemoveShowPopup => {
                self.show_popup = false;
                self.show_new_team_form = false;
                self.show_new_unit_form = false;
                self.show_buy_items = false;
                self.show_gain_money_form = false;
                self.show_lose_money_form = false;
                self.show_gain_exp_form = false;
                self.popup_sub_form = None;
            }
            Mutation::SetShowBuyItems(flag) => self.show_buy_items = flag,
            Mutation::SetShowGainMoneyForm(flag) => self.show_gain_money_form = flag,
            Mutation::SetShowLoseMoneyForm(flag) => self.show_lose_money_form = flag,
            Mutation::SetShowGainExpForm(flag) => self.show_gain_exp_form = flag,
            Mutation::SetPopupSubForm(form) => self.popup_sub_form = form,
            Mutation::SetCurrentPage(page) => self.current_page = page,
            Mutation::SetItemToModify(item_id) => self.item_to_modify = item_id,
            Mutation::ToggleViewNavigation => self.view_navigation = !self.view_navigation,
        }

        Ok(effects)
    }

    fn set_team(&mut self, team: Team) {
        self.team_inventory_traits = derive::team_inventory_traits(&team);
        self.current_team = Some(team);
    }

    fn write_back_unit(&mut self, unit: &Unit) {
        let Some(team) = self.current_team.as_mut() else {
            return;
        };
        match team.unit_index(unit.id) {
            Some(index) => {
                team.unit_list[index] = unit.clone();
                self.team_inventory_traits = derive::team_inventory_traits(team);
            }
            None => warn!(
                unit_id = unit.id,
                team_id = team.id,
                "active unit is not part of the active team"
            ),
        }
    }

    fn clear_unit_lists(&mut self) {
        self.unit_inventory_traits.clear();
        self.unit_skills_sorted.clear();
        self.unit_injuries_sorted.clear();
    }

    fn team_mut(&mut self) -> Result<&mut Team> {
        self.current_team.as_mut().ok_or(StoreError::NoActiveTeam)
    }

    fn unit_mut(&mut self) -> Result<&mut Unit> {
        self.current_unit.as_mut().ok_or(StoreError::NoActiveUnit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tnt_roster_adapter::{InventoryItem, Skill};

    fn team_with_units(money: i32) -> Team {
        Team {
            id: 7,
            name: "Scavs".to_string(),
            money,
            unit_list: vec![
                Unit {
                    id: 1,
                    name: "Boss".to_string(),
                    ..Unit::default()
                },
                Unit {
                    id: 2,
                    name: "Grunt".to_string(),
                    ..Unit::default()
                },
            ],
            ..Team::default()
        }
    }

    fn state_with_team(money: i32) -> StoreState {
        let mut state = StoreState::default();
        state
            .apply(Mutation::SetCurrentTeam(team_with_units(money)))
            .expect("set team");
        state
    }

    #[test]
    fn set_current_team_switches_panels() {
        let mut state = StoreState::default();
        state.manage_inventory = true;
        state.show_unit_detail = true;

        let effects = state
            .apply(Mutation::SetCurrentTeam(team_with_units(100)))
            .expect("apply");

        assert!(effects.is_empty());
        assert_eq!(state.current_team_id(), Some(7));
        assert!(state.show_team_detail);
        assert!(!state.show_team_list && !state.show_unit_detail && !state.manage_inventory);
    }

    #[test]
    fn no_page_change_keeps_panels() {
        let mut state = StoreState::default();
        state
            .apply(Mutation::SetCurrentTeamNoPageChange(team_with_units(100)))
            .expect("apply");

        assert_eq!(state.current_team_id(), Some(7));
        assert!(state.show_team_list);
        assert!(!state.show_team_detail);
    }

    #[test]
    fn set_current_unit_writes_back_into_team_and_derives() {
        let mut state = state_with_team(100);
        let unit = Unit {
            id: 2,
            name: "Renamed".to_string(),
            skills: vec![Skill::new(5, "Hatred", "")],
            inventory: vec![InventoryItem {
                id: 1,
                item_traits: vec![ItemTrait::new(3, "Sharp", "")],
                ..InventoryItem::default()
            }],
            ..Unit::default()
        };

        state.apply(Mutation::SetCurrentUnit(unit)).expect("apply");

        let team = state.current_team.as_ref().expect("team");
        assert_eq!(team.unit_list[1].name, "Renamed");
        assert_eq!(team.unit_list[0].name, "Boss");
        assert!(state.show_unit_detail && !state.show_team_detail);
        assert_eq!(state.unit_skills_sorted.len(), 2);
        assert_eq!(state.unit_inventory_traits.len(), 1);
        assert_eq!(state.team_inventory_traits.len(), 1);
    }

    #[test]
    fn set_current_unit_from_another_team_leaves_team_alone() {
        let mut state = state_with_team(100);
        let before = state.current_team.clone();

        state
            .apply(Mutation::SetCurrentUnit(Unit {
                id: 99,
                ..Unit::default()
            }))
            .expect("apply");

        assert_eq!(state.current_team, before);
        assert_eq!(state.current_unit_id(), Some(99));
    }

    #[test]
    fn clear_current_unit_requests_team_reload() {
        let mut state = state_with_team(100);
        state
            .apply(Mutation::SetCurrentUnit(Unit {
                id: 1,
                ..Unit::default()
            }))
            .expect("apply");

        let effects = state.apply(Mutation::ClearCurrentUnit).expect("apply");

        assert_eq!(effects, vec![Effect::ReloadCurrentTeam]);
        assert!(state.current_unit.is_none());
        assert!(state.unit_skills_sorted.is_empty());
        assert!(state.show_team_detail && !state.show_unit_detail);
    }

    #[test]
    fn lose_money_refuses_overdraft() {
        let mut state = state_with_team(30);
        let before = state.clone();

        let err = state.apply(Mutation::LoseMoney(31)).expect_err("overdraft");

        assert_eq!(err.to_string(), "Not enough money for this action");
        assert_eq!(state, before);

        state.apply(Mutation::LoseMoney(30)).expect("exact amount");
        assert_eq!(state.current_team.as_ref().map(|t| t.money), Some(0));
    }

    #[test]
    fn gain_money_adds_and_rejects_negative() {
        let mut state = state_with_team(30);
        state.apply(Mutation::GainMoney(15)).expect("gain");
        assert_eq!(state.current_team.as_ref().map(|t| t.money), Some(45));

        assert!(matches!(
            state.apply(Mutation::GainMoney(-1)),
            Err(StoreError::NegativeAmount { amount: -1 })
        ));
    }

    #[test]
    fn overflowing_amounts_are_rejected() {
        let mut state = state_with_team(10);
        state.current_unit = Some(Unit {
            unspent_experience: 5,
            ..Unit::default()
        });
        let before = state.clone();

        assert!(matches!(
            state.apply(Mutation::GainMoney(i32::MAX)),
            Err(StoreError::AmountTooLarge { amount: i32::MAX })
        ));
        assert!(matches!(
            state.apply(Mutation::GainUnspentExp(i32::MAX)),
            Err(StoreError::AmountTooLarge { amount: i32::MAX })
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn experience_must_be_positive() {
        let mut state = StoreState::default();
        state.current_unit = Some(Unit::default());

        let err = state.apply(Mutation::GainUnspentExp(0)).expect_err("zero");
        assert_eq!(err.to_string(), "Experience gained must be positive.");

        state.apply(Mutation::GainUnspentExp(4)).expect("gain");
        assert_eq!(state.current_unit.as_ref().map(|u| u.unspent_experience), Some(4));
    }

    #[test]
    fn team_edits_need_an_active_team() {
        let mut state = StoreState::default();
        assert!(matches!(
            state.apply(Mutation::ChangeTeamName("x".to_string())),
            Err(StoreError::NoActiveTeam)
        ));
        assert!(matches!(
            state.apply(Mutation::ChangeUnitName("x".to_string())),
            Err(StoreError::NoActiveUnit)
        ));
    }

    #[test]
    fn logout_clears_session_state() {
        let mut state = state_with_team(10);
        state
            .apply(Mutation::SetAuthToken("abc".to_string()))
            .expect("token");
        state.team_list = vec![team_with_units(10)];

        let effects = state.apply(Mutation::Logout).expect("logout");

        assert_eq!(effects, vec![Effect::ClearAuthToken, Effect::ClearSession]);
        assert!(state.token.is_empty());
        assert!(state.team_list.is_empty());
        assert!(state.current_team.is_none());
        assert_eq!(state.current_page.as_deref(), Some(LOGIN_PAGE));
    }

    #[test]
    fn set_auth_token_is_applied_and_persisted() {
        let mut state = StoreState::default();
        let effects = state
            .apply(Mutation::SetAuthToken("abc".to_string()))
            .expect("token");

        assert_eq!(
            effects,
            vec![Effect::ApplyAuthToken("abc".to_string()), Effect::PersistSession]
        );
        assert!(state.is_logged_in());
    }

    #[test]
    fn error_panel_toggles() {
        let mut state = StoreState::default();
        state
            .apply(Mutation::ShowErrorOn("boom".to_string()))
            .expect("on");
        assert!(state.show_error);
        assert_eq!(state.error_message, "boom");

        state.apply(Mutation::ShowErrorOff).expect("off");
        assert!(!state.show_error);
        assert!(state.error_message.is_empty());
    }

    #[test]
    fn remove_show_popup_closes_every_form() {
        let mut state = StoreState::default();
        for mutation in [
            Mutation::ToggleShowPopup,
            Mutation::ToggleNewTeamForm,
            Mutation::ToggleNewUnitForm,
            Mutation::SetShowBuyItems(true),
            Mutation::SetShowGainMoneyForm(true),
            Mutation::SetShowLoseMoneyForm(true),
            Mutation::SetShowGainExpForm(true),
            Mutation::SetPopupSubForm(Some("weapons".to_string())),
        ] {
            state.apply(mutation).expect("apply");
        }

        state.apply(Mutation::RemoveShowPopup).expect("apply");

        assert_eq!(state, StoreState::default());
    }
}
