//! Client-held session state

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::user::{User, UserRole};
use crate::errors::{DomainError, DomainResult};

use super::store::SessionStore;

/// Identity fields cached alongside the session token
///
/// Only presentation fields are cached. Stored hashes never enter the
/// snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub role: UserRole,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            address: user.address.clone(),
            role: user.role,
        }
    }
}

/// The persisted session: who is signed in and the token proving it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: SessionUser,
    pub token: String,
}

/// Explicitly passed session state with a load/save/clear lifecycle
///
/// Replaces ambient global auth state: the embedding client owns exactly
/// one context, loads it at startup, establishes it on login, and clears
/// it on logout. Persistence goes through a [`SessionStore`] so the
/// context never cares where the blob lives.
pub struct SessionContext<S: SessionStore> {
    store: Arc<S>,
    session: Option<Session>,
}

impl<S: SessionStore> SessionContext<S> {
    /// Create an empty context over the given store
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            session: None,
        }
    }

    /// Load the persisted session, if any
    ///
    /// A blob that no longer parses is treated as no session rather than
    /// an error, so a stale or corrupted snapshot cannot lock the user out
    /// of the login screen.
    pub fn load(&mut self) -> DomainResult<Option<&Session>> {
        let raw = self
            .store
            .load()
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to load session: {}", e),
            })?;

        self.session = match raw {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::warn!(
                        event = "session_snapshot_unreadable",
                        "Stored session did not parse, starting signed out: {}",
                        e
                    );
                    None
                }
            },
            None => None,
        };

        Ok(self.session.as_ref())
    }

    /// Establish a session after a successful login and persist it
    pub fn establish(&mut self, user: &User, token: &str) -> DomainResult<()> {
        let session = Session {
            user: SessionUser::from(user),
            token: token.to_string(),
        };
        let raw = serde_json::to_string(&session).map_err(|e| DomainError::Internal {
            message: format!("Failed to serialize session: {}", e),
        })?;
        self.store.save(&raw).map_err(|e| DomainError::Internal {
            message: format!("Failed to save session: {}", e),
        })?;
        self.session = Some(session);
        Ok(())
    }

    /// Drop the session and remove the persisted snapshot
    pub fn clear(&mut self) -> DomainResult<()> {
        self.store.clear().map_err(|e| DomainError::Internal {
            message: format!("Failed to clear session: {}", e),
        })?;
        self.session = None;
        Ok(())
    }

    /// The current session, if one is established
    pub fn current(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The bearer token for protected calls
    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    /// Whether someone is signed in
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Whether the signed-in user holds the administrative role
    pub fn is_admin(&self) -> bool {
        self.session
            .as_ref()
            .map(|s| s.user.role == UserRole::Administrative)
            .unwrap_or(false)
    }
}
