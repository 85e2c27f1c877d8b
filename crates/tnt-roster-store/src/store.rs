/*
[INPUT]:  Mutations from the caller, responses from the roster API
[OUTPUT]: StoreState kept in sync with the server, error panel on failure
[POS]:    Store core - commit loop, follow-up effects, shared error handler
[UPDATE]: When a mutation gains a new effect or the resync flow changes
*/

use tnt_roster_adapter::{RosterApi, RosterClient, User};
use tracing::{debug, info, warn};

use crate::derive;
use crate::error::{Result, StoreError};
use crate::mutations::{Effect, Mutation};
use crate::session::{SessionData, SessionStore};
use crate::state::StoreState;

/// Roster state plus the API it is synchronized with
pub struct Store<A: RosterApi = RosterClient> {
    pub(crate) api: A,
    pub(crate) state: StoreState,
    session: Option<SessionStore>,
}

impl<A: RosterApi> Store<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: StoreState::default(),
            session: None,
        }
    }

    /// Remember token and user in `session` from now on
    pub fn with_session(mut self, session: SessionStore) -> Self {
        self.session = Some(session);
        self
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Apply a mutation and run the follow-up work it asks for
    pub async fn commit(&mut self, mutation: Mutation) -> Result<()> {
        let effects = self.state.apply(mutation)?;
        for effect in effects {
            self.run_effect(effect).await?;
        }
        Ok(())
    }

    /// Apply a mutation that has no follow-up work
    pub(crate) fn commit_local(&mut self, mutation: Mutation) -> Result<()> {
        let effects = self.state.apply(mutation)?;
        if !effects.is_empty() {
            warn!(?effects, "follow-up effects skipped");
        }
        Ok(())
    }

    async fn run_effect(&mut self, effect: Effect) -> Result<()> {
        debug!(?effect, "run effect");
        match effect {
            Effect::ApplyAuthToken(token) => self.api.set_auth_token(&token),
            Effect::ClearAuthToken => self.api.clear_auth_token(),
            Effect::PersistSession => {
                if let Some(session) = &self.session {
                    let data = SessionData::new(self.state.token.clone(), self.state.user.clone());
                    session.save(&data).await?;
                }
            }
            Effect::ClearSession => {
                if let Some(session) = &self.session {
                    session.clear().await?;
                }
            }
            Effect::ReloadCurrentTeam => self.reload_current_team().await?,
        }
        Ok(())
    }

    /// Start using `token` for API calls
    pub async fn login(&mut self, token: impl Into<String>, user: Option<User>) -> Result<()> {
        self.commit(Mutation::SetAuthToken(token.into())).await?;
        if let Some(user) = user {
            self.commit(Mutation::SetUser(user)).await?;
        }
        info!("session started");
        Ok(())
    }

    /// Pick up the saved session, falling back to `token` when there is none.
    ///
    /// Returns whether the store ended up with a token.
    pub async fn restore_session(&mut self, token: Option<String>) -> Result<bool> {
        let saved = match &self.session {
            Some(session) => session.load().await?,
            None => None,
        };

        match (saved, token) {
            (Some(saved), _) if !saved.token.is_empty() => {
                debug!(saved_at = %saved.saved_at, "restoring saved session");
                self.login(saved.token, saved.user).await?;
            }
            (_, Some(token)) if !token.is_empty() => self.login(token, None).await?,
            _ => debug!("no session to restore"),
        }
        Ok(self.state.is_logged_in())
    }

    pub async fn logout(&mut self) -> Result<()> {
        self.commit(Mutation::Logout).await?;
        info!("logged out");
        Ok(())
    }

    /// Fetch the caller's teams; a failure goes to the error panel
    pub async fn load_teams(&mut self) -> Result<()> {
        match self.fetch_team_list().await {
            Ok(()) => Ok(()),
            Err(err) => Err(self.surface(err)),
        }
    }

    /// Fetch the active unit again, then its team
    pub async fn reload_current_unit(&mut self) -> Result<()> {
        match self.fetch_current_unit().await {
            Ok(()) => Ok(()),
            Err(err) => Err(self.surface(err)),
        }
    }

    /// Fetch the active team again without changing panels
    pub async fn reload_current_team(&mut self) -> Result<()> {
        match self.fetch_current_team().await {
            Ok(()) => Ok(()),
            Err(err) => Err(self.surface(err)),
        }
    }

    // Reload failures only reach the error panel. Actions run their trailing
    // reload after the guard, so a failed reload never triggers a resync.

    async fn fetch_team_list(&mut self) -> Result<()> {
        let teams = self.api.retrieve_team_list().await?;
        debug!(count = teams.len(), "teams loaded");
        self.commit_local(Mutation::SetTeamList(teams))
    }

    async fn fetch_current_unit(&mut self) -> Result<()> {
        let Some(unit_id) = self.state.current_unit_id() else {
            debug!("no active unit to reload");
            return Ok(());
        };
        let unit = self.api.get_unit(unit_id).await?;
        self.commit_local(Mutation::SetCurrentUnit(unit))?;
        self.fetch_current_team().await
    }

    async fn fetch_current_team(&mut self) -> Result<()> {
        let Some(team_id) = self.state.current_team_id() else {
            debug!("no active team to reload");
            return Ok(());
        };
        let team = self.api.get_team_by_id(team_id).await?;
        self.commit_local(Mutation::SetCurrentTeamNoPageChange(team))
    }

    /// Shared error handler: show the message, then resync from the server.
    ///
    /// A failure during the resync only replaces the message.
    pub async fn show_error(&mut self, err: &StoreError) {
        warn!(error = %err, "roster action failed");
        self.show_message(err.user_message());

        if let Err(err) = self.load_teams().await {
            debug!(error = %err, "team list reload after error failed");
        }
        let resync = if self.state.current_unit.is_some() {
            self.reload_current_unit().await
        } else {
            self.reload_current_team().await
        };
        if let Err(err) = resync {
            debug!(error = %err, "resync after error failed");
        }
    }

    /// Route a failed action through the error handler and hand it back
    pub(crate) async fn guard<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            self.show_error(err).await;
        }
        result
    }

    /// Put `err` on the error panel without a resync
    fn surface(&mut self, err: StoreError) -> StoreError {
        warn!(error = %err, "roster reload failed");
        self.show_message(err.user_message());
        err
    }

    fn show_message(&mut self, message: String) {
        if let Err(err) = self.commit_local(Mutation::ShowErrorOn(message)) {
            warn!(error = %err, "could not show error");
        }
    }

    pub fn update_unit_inventory_traits(&mut self) -> Result<()> {
        let unit = self.state.current_unit.as_ref().ok_or(StoreError::NoActiveUnit)?;
        let traits = derive::unit_inventory_traits(unit);
        self.commit_local(Mutation::SetUnitInventoryTraits(traits))
    }

    pub fn update_team_inventory_traits(&mut self) -> Result<()> {
        let team = self.state.current_team.as_ref().ok_or(StoreError::NoActiveTeam)?;
        let traits = derive::team_inventory_traits(team);
        self.commit_local(Mutation::SetTeamInventoryTraits(traits))
    }

    pub fn sort_unit_skills(&mut self) -> Result<()> {
        let unit = self.state.current_unit.as_ref().ok_or(StoreError::NoActiveUnit)?;
        let skills = derive::sorted_unit_skills(unit);
        self.commit_local(Mutation::SetUnitSkillsSorted(skills))
    }

    pub fn sort_injuries(&mut self) -> Result<()> {
        let unit = self.state.current_unit.as_ref().ok_or(StoreError::NoActiveUnit)?;
        let injuries = derive::sorted_injuries(unit);
        self.commit_local(Mutation::SetUnitInjuriesSorted(injuries))
    }
}
