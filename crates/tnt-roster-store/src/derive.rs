/*
[INPUT]:  Unit and team data as returned by the roster server
[OUTPUT]: Display lists: sorted skills, sorted injuries, deduplicated traits
[POS]:    Derivation layer - pure functions re-run whenever the active unit changes
[UPDATE]: When a rule adds an implied skill or trait
*/

use std::cmp::Ordering;
use std::collections::HashSet;

use tnt_roster_adapter::{Injury, InventoryItem, ItemTrait, Skill, Team, Unit};

pub const NO_LEGS: &str = "No Legs";
pub const HATRED: &str = "Hatred";
pub const FRENZIED: &str = "Frenzied";

pub const MOVE_OR_FIRE_ID: i32 = 4;
pub const MOVE_OR_FIRE: &str = "Move or Fire";
const MOVE_OR_FIRE_EFFECT: &str =
    "Weapon may not be fired if the attacker moved or intends to move during the same activation.";

pub const FRENZIED_FROM_HATRED_ID: i32 = 99;
pub const FRENZIED_FROM_HATRED: &str = "Frenzied *";
const FRENZIED_FROM_HATRED_TAG: &str = "(Hatred)";
const FRENZIED_FROM_HATRED_TEXT: &str = "\
    Only applies when Hatred is active. At the beginning of each activation, model must make \
    an Intelligence test (MET/TN 10). On pass, it acts as normal. On fail, it enters a \
    Frenzy. While in a Frenzy, it may only move or charge towards the nearest enemy model, \
    or make a melee attack if it is already in base contact. It also gets a +2 bonus against \
    Will tests. On subsequent activations, model may test Intelligence (MET/TN 10) to try to \
    return to normal. This test does not consume AP.";

/// Alphabetical, case-insensitive; exact text breaks ties so the order is total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Traits from every carried item, one entry per trait id, sorted by name.
///
/// Units with "No Legs" also get "Move or Fire" unless an item already gives it.
pub fn unit_inventory_traits(unit: &Unit) -> Vec<ItemTrait> {
    let mut traits = collect_traits(&unit.inventory, Vec::new());

    if unit.has_skill(NO_LEGS) && !traits.iter().any(|t| t.name == MOVE_OR_FIRE) {
        traits.push(ItemTrait::new(
            MOVE_OR_FIRE_ID,
            MOVE_OR_FIRE,
            MOVE_OR_FIRE_EFFECT,
        ));
    }

    traits.sort_by(|a, b| compare_names(&a.name, &b.name));
    traits
}

/// Traits across the team stash and every unit's inventory.
pub fn team_inventory_traits(team: &Team) -> Vec<ItemTrait> {
    let mut traits = collect_traits(&team.inventory, Vec::new());
    for unit in &team.unit_list {
        traits = collect_traits(&unit.inventory, traits);
    }
    traits.sort_by(|a, b| compare_names(&a.name, &b.name));
    traits
}

fn collect_traits(items: &[InventoryItem], mut traits: Vec<ItemTrait>) -> Vec<ItemTrait> {
    let mut seen: HashSet<i32> = traits.iter().map(|t| t.id).collect();
    for item_trait in items.iter().flat_map(|item| &item.item_traits) {
        if seen.insert(item_trait.id) {
            traits.push(item_trait.clone());
        }
    }
    traits
}

/// The unit's own skills plus those granted by injuries and equipped items.
///
/// Granted skills carry `added_string` naming their source. A unit with Hatred
/// but no Frenzied gets the conditional "Frenzied *". Sorted by name.
pub fn sorted_unit_skills(unit: &Unit) -> Vec<Skill> {
    let mut skills = unit.skills.clone();
    let mut seen: HashSet<i32> = skills.iter().map(|s| s.id).collect();

    let injury_grants = unit
        .injuries
        .iter()
        .filter_map(|injury| injury.grants.as_ref().map(|g| (g, &injury.name)));
    let item_grants = unit
        .inventory
        .iter()
        .filter(|item| item.equipped)
        .filter_map(|item| item.grants.as_ref().map(|g| (g, &item.name)));

    for (granted, source) in injury_grants.chain(item_grants) {
        if seen.insert(granted.id) {
            let mut skill = granted.clone();
            skill.added_string = Some(source.clone());
            skills.push(skill);
        }
    }

    let has_hatred = skills.iter().any(|s| s.name == HATRED);
    let has_frenzied = skills
        .iter()
        .any(|s| s.name == FRENZIED || s.name == FRENZIED_FROM_HATRED);
    if has_hatred && !has_frenzied {
        let mut frenzied = Skill::new(
            FRENZIED_FROM_HATRED_ID,
            FRENZIED_FROM_HATRED,
            FRENZIED_FROM_HATRED_TEXT,
        );
        frenzied.added_string = Some(FRENZIED_FROM_HATRED_TAG.to_string());
        skills.push(frenzied);
    }

    skills.sort_by(|a, b| compare_names(&a.name, &b.name));
    skills
}

/// Permanent injuries first, then removable ones; alphabetical within each group.
pub fn sorted_injuries(unit: &Unit) -> Vec<Injury> {
    let mut injuries = unit.injuries.clone();
    injuries.sort_by(|a, b| compare_names(&a.name, &b.name));
    injuries.sort_by_key(|injury| injury.removable);
    injuries
}
