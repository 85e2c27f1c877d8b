/*
[INPUT]:  Failures from mutations, roster rules, the API client and session files
[OUTPUT]: StoreError with the message the error panel shows
[POS]:    Error handling layer - store crate
[UPDATE]: When mutations or actions gain new failure modes
*/

use thiserror::Error;
use tnt_roster_adapter::RosterError;

use crate::rules::RuleViolation;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Not enough money for this action")]
    NotEnoughMoney { money: i32, requested: i32 },

    #[error("Experience gained must be positive.")]
    NonPositiveExperience { amount: i32 },

    #[error("Amount must not be negative.")]
    NegativeAmount { amount: i32 },

    #[error("Amount is too large.")]
    AmountTooLarge { amount: i32 },

    #[error("No team is selected")]
    NoActiveTeam,

    #[error("No unit is selected")]
    NoActiveUnit,

    #[error("Unit has no item with id {item_id}")]
    UnknownItem { item_id: i32 },

    #[error(transparent)]
    Rule(#[from] RuleViolation),

    #[error(transparent)]
    Api(#[from] RosterError),

    #[error("Session file error: {0}")]
    Session(#[from] std::io::Error),

    #[error("Session data error: {0}")]
    SessionData(#[from] serde_json::Error),
}

impl StoreError {
    /// Text for the error panel; server messages pass through verbatim
    pub fn user_message(&self) -> String {
        match self {
            StoreError::Api(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
