/*
[INPUT]:  Bearer tokens and the moment they were installed
[OUTPUT]: Token retrieval and Authorization header values
[POS]:    Auth layer - token lifecycle management
[UPDATE]: When adding token refresh or changing storage strategy
*/

use chrono::{DateTime, TimeDelta, Utc};
use std::sync::{Arc, PoisonError, RwLock};

/// Stored token data with metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenData {
    pub token: String,
    pub set_at: DateTime<Utc>,
}

/// Thread-safe bearer token holder.
///
/// Clones share the same slot, so the store can swap the token that every
/// request built by a [`crate::RosterClient`] picks up.
#[derive(Debug, Clone, Default)]
pub struct TokenManager {
    data: Arc<RwLock<Option<TokenData>>>,
}

impl TokenManager {
    /// Create a new empty token manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new token; an empty string clears the slot
    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        *guard = if token.is_empty() {
            None
        } else {
            Some(TokenData {
                token,
                set_at: Utc::now(),
            })
        };
    }

    /// Get the current token if available
    pub fn get_token(&self) -> Option<String> {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().map(|data| data.token.clone())
    }

    /// Value for the `Authorization` header, if a token is set
    pub fn bearer(&self) -> Option<String> {
        self.get_token().map(|token| format!("Bearer {token}"))
    }

    /// Time since the current token was installed
    pub fn token_age(&self) -> Option<TimeDelta> {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().map(|data| Utc::now() - data.set_at)
    }

    /// Clear the stored token
    pub fn clear(&self) {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }
}
