/*
[INPUT]:  Roster API adapter and YAML configuration
[OUTPUT]: Client-side roster store: state, mutations, actions, derived lists
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

mod actions;
pub mod config;
pub mod derive;
pub mod error;
pub mod mutations;
pub mod rules;
pub mod session;
pub mod state;
pub mod store;

pub use config::{ApiConfig, RosterConfig};
pub use error::{Result, StoreError};
pub use mutations::{Effect, Mutation};
pub use rules::RuleViolation;
pub use session::{SessionData, SessionStore};
pub use state::StoreState;
pub use store::Store;
