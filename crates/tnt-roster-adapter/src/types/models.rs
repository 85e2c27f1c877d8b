/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::enums::{ItemCategory, Rank};

/// Fields the client does not model but must send back untouched on PUT
/// (item subclass tags, weapon ranges, armor costs, ...).
pub type ExtraFields = Map<String, Value>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Team {
    pub id: i32,
    pub user_id: i32,
    #[serde(deserialize_with = "serde_helpers::null_as_default")]
    pub name: String,
    pub faction_id: i32,
    #[serde(deserialize_with = "serde_helpers::null_as_default")]
    pub faction: String,
    pub money: i32,
    /// The server derives this name from `getBSCost`, so it is all lowercase.
    #[serde(rename = "bscost", alias = "bsCost", alias = "bSCost")]
    pub bs_cost: i32,
    #[serde(deserialize_with = "serde_helpers::null_as_default")]
    pub unit_list: Vec<Unit>,
    #[serde(deserialize_with = "serde_helpers::null_as_default")]
    pub inventory: Vec<InventoryItem>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Team {
    /// Position of the unit with `unit_id` in `unit_list`
    pub fn unit_index(&self, unit_id: i32) -> Option<usize> {
        self.unit_list.iter().position(|unit| unit.id == unit_id)
    }

    /// Number of units whose rank matches `rank`
    pub fn count_rank(&self, rank: Rank) -> usize {
        self.unit_list
            .iter()
            .filter(|unit| unit.rank() == Some(rank))
            .count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Unit {
    pub id: i32,
    pub team_id: i32,
    #[serde(deserialize_with = "serde_helpers::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "serde_helpers::null_as_default")]
    pub unit_class: String,
    #[serde(deserialize_with = "serde_helpers::null_as_default")]
    pub rank: String,
    #[serde(deserialize_with = "serde_helpers::null_as_default")]
    pub species: String,
    pub base_cost: i32,
    pub wounds: i32,
    pub defense: i32,
    pub mettle: i32,
    #[serde(rename = "move")]
    pub movement: i32,
    pub ranged: i32,
    pub melee: i32,
    pub strength: i32,
    pub empty_skills: i32,
    #[serde(deserialize_with = "serde_helpers::null_as_default")]
    pub special_rules: String,
    pub spent_experience: i32,
    pub unspent_experience: i32,
    pub total_advances: i32,
    pub ten_point_advances: i32,
    pub cost_to_advance: i32,
    #[serde(deserialize_with = "serde_helpers::null_as_default")]
    pub available_skillsets: Vec<Value>,
    pub banged_up: bool,
    pub long_recovery: bool,
    #[serde(deserialize_with = "serde_helpers::null_as_default")]
    pub skills: Vec<Skill>,
    #[serde(deserialize_with = "serde_helpers::null_as_default")]
    pub injuries: Vec<Injury>,
    #[serde(deserialize_with = "serde_helpers::null_as_default")]
    pub inventory: Vec<InventoryItem>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Unit {
    pub fn rank(&self) -> Option<Rank> {
        Rank::from_label(&self.rank)
    }

    /// Whether the unit itself lists a skill named `name`
    pub fn has_skill(&self, name: &str) -> bool {
        self.skills.iter().any(|skill| skill.name == name)
    }

    /// Total hands taken by currently equipped items
    pub fn hands_in_use(&self) -> i32 {
        self.inventory
            .iter()
            .filter(|item| item.equipped)
            .map(|item| item.hands_required)
            .sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Skill {
    pub id: i32,
    #[serde(deserialize_with = "serde_helpers::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "serde_helpers::null_as_default")]
    pub description: String,
    /// Provenance shown next to skills granted by an injury or item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_string: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Skill {
    pub fn new(id: i32, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ItemTrait {
    pub id: i32,
    #[serde(deserialize_with = "serde_helpers::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "serde_helpers::null_as_default")]
    pub effect: String,
}

impl ItemTrait {
    pub fn new(id: i32, name: impl Into<String>, effect: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            effect: effect.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Injury {
    pub id: i32,
    #[serde(deserialize_with = "serde_helpers::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "serde_helpers::null_as_default")]
    pub description: String,
    pub removable: bool,
    pub grants: Option<Skill>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: i32,
    pub reference_id: i32,
    #[serde(deserialize_with = "serde_helpers::null_as_default")]
    pub name: String,
    pub cost: i32,
    #[serde(deserialize_with = "serde_helpers::null_as_default")]
    pub special_rules: String,
    #[serde(deserialize_with = "serde_helpers::null_as_default")]
    pub item_traits: Vec<ItemTrait>,
    #[serde(deserialize_with = "serde_helpers::null_as_default")]
    pub rarity: String,
    pub relic: bool,
    pub hands_required: i32,
    #[serde(deserialize_with = "serde_helpers::null_as_default")]
    pub category: String,
    pub equipped: bool,
    /// Only meaningful for armor.
    pub shield: bool,
    pub grants: Option<Skill>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl InventoryItem {
    pub fn category(&self) -> Option<ItemCategory> {
        ItemCategory::from_label(&self.category)
    }

    /// Worn armor, i.e. armor that is not a shield
    pub fn is_body_armor(&self) -> bool {
        self.category() == Some(ItemCategory::Armor) && !self.shield
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Faction {
    pub id: i32,
    #[serde(deserialize_with = "serde_helpers::null_as_default")]
    pub name: String,
}

/// Logged-in user as returned by the login endpoint and kept in the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    #[serde(deserialize_with = "serde_helpers::null_as_default")]
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

mod serde_helpers {
    use serde::{Deserialize, Deserializer};

    /// Java beans send `null` for unset strings and lists; treat it as empty.
    pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + Deserialize<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}
