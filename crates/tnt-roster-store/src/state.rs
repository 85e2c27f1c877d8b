/*
[INPUT]:  Mutations committed by the store
[OUTPUT]: Everything the roster UI renders: panel flags, active team/unit, derived lists
[POS]:    State layer - single source of truth for the client
[UPDATE]: When the UI grows a new panel or popup form
*/

use serde::{Deserialize, Serialize};
use tnt_roster_adapter::{Injury, ItemTrait, Skill, Team, Unit, User};

/// Page the client lands on after logging out.
pub const LOGIN_PAGE: &str = "login";

/// Client-side roster state.
///
/// Only mutations change it; derived lists are rebuilt from `current_unit`
/// and `current_team` and never edited directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreState {
    pub token: String,
    pub user: Option<User>,

    // panels
    pub show_team_list: bool,
    pub show_team_detail: bool,
    pub show_unit_detail: bool,
    pub show_new_unit_form: bool,
    pub show_new_team_form: bool,

    pub team_list: Vec<Team>,
    pub current_team: Option<Team>,
    pub current_unit: Option<Unit>,

    pub show_error: bool,
    pub error_message: String,

    // derived
    pub unit_inventory_traits: Vec<ItemTrait>,
    pub team_inventory_traits: Vec<ItemTrait>,
    pub unit_skills_sorted: Vec<Skill>,
    pub unit_injuries_sorted: Vec<Injury>,

    // popups
    pub manage_inventory: bool,
    pub show_popup: bool,
    pub show_buy_items: bool,
    pub show_gain_money_form: bool,
    pub show_lose_money_form: bool,
    pub show_gain_exp_form: bool,
    pub popup_sub_form: Option<String>,

    pub current_page: Option<String>,
    pub item_to_modify: Option<i32>,
    pub view_navigation: bool,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            token: String::new(),
            user: None,
            show_team_list: true,
            show_team_detail: false,
            show_unit_detail: false,
            show_new_unit_form: false,
            show_new_team_form: false,
            team_list: Vec::new(),
            current_team: None,
            current_unit: None,
            show_error: false,
            error_message: String::new(),
            unit_inventory_traits: Vec::new(),
            team_inventory_traits: Vec::new(),
            unit_skills_sorted: Vec::new(),
            unit_injuries_sorted: Vec::new(),
            manage_inventory: false,
            show_popup: false,
            show_buy_items: false,
            show_gain_money_form: false,
            show_lose_money_form: false,
            show_gain_exp_form: false,
            popup_sub_form: None,
            current_page: None,
            item_to_modify: None,
            view_navigation: false,
        }
    }
}

impl StoreState {
    pub fn is_logged_in(&self) -> bool {
        !self.token.is_empty()
    }

    pub fn current_team_id(&self) -> Option<i32> {
        self.current_team.as_ref().map(|team| team.id)
    }

    pub fn current_unit_id(&self) -> Option<i32> {
        self.current_unit.as_ref().map(|unit| unit.id)
    }
}
