/*
[INPUT]:  Rank and category labels sent by the roster server
[OUTPUT]: Typed Rust enums for rule checks
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When the server adds ranks or item categories
*/

use serde::{Deserialize, Serialize};

/// Unit rank as reported in `Unit::rank`.
///
/// The server sends free-form labels and compares them case-insensitively,
/// so parsing goes through [`Rank::from_label`] instead of serde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Leader,
    Elite,
    Specialist,
    Freelancer,
    RankAndFile,
}

impl Rank {
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        [
            Rank::Leader,
            Rank::Elite,
            Rank::Specialist,
            Rank::Freelancer,
            Rank::RankAndFile,
        ]
        .into_iter()
        .find(|rank| rank.label().eq_ignore_ascii_case(label))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Rank::Leader => "Leader",
            Rank::Elite => "Elite",
            Rank::Specialist => "Specialist",
            Rank::Freelancer => "Freelancer",
            Rank::RankAndFile => "Rank and File",
        }
    }
}

/// Inventory item category as reported in `InventoryItem::category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    Armor,
    Weapon,
    Equipment,
}

impl ItemCategory {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Armor" => Some(ItemCategory::Armor),
            "Weapon" => Some(ItemCategory::Weapon),
            "Equipment" => Some(ItemCategory::Equipment),
            _ => None,
        }
    }
}
