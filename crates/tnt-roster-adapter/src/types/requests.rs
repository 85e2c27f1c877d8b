/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

/// Body of `POST /teams`; the server fills in everything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTeamRequest {
    pub name: String,
    pub faction_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub money: Option<i32>,
}

impl NewTeamRequest {
    pub fn new(name: impl Into<String>, faction_id: i32) -> Self {
        Self {
            name: name.into(),
            faction_id,
            money: None,
        }
    }
}
