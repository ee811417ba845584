//! Session state: who is signed in and with which bearer token.

use std::cell::RefCell;
use std::rc::Rc;

use calorie_common::User;
use serde::{Deserialize, Serialize};

use crate::storage::PersistedStore;

/// Slot holding the persisted session.
pub const SESSION_SLOT: &str = "auth-storage";

/// Session snapshot, persisted as a whole.
///
/// `authenticated` is true exactly when both `user` and `token` are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub authenticated: bool,
}

impl Session {
    fn is_consistent(&self) -> bool {
        self.authenticated == (self.token.is_some() && self.user.is_some())
    }
}

/// Handle shared between the gateway client and the presentation layer.
pub type SharedSession = Rc<RefCell<SessionState>>;

pub struct SessionState {
    session: Session,
    store: PersistedStore,
}

impl SessionState {
    /// Restore the last persisted session, or start signed out.
    pub fn restore(store: PersistedStore) -> Self {
        let session = match store.load::<Session>(SESSION_SLOT) {
            Some(session) if session.is_consistent() => session,
            Some(_) => {
                tracing::warn!("Persisted session is inconsistent, starting signed out");
                Session::default()
            }
            None => Session::default(),
        };
        Self { session, store }
    }

    pub fn shared(store: PersistedStore) -> SharedSession {
        Rc::new(RefCell::new(Self::restore(store)))
    }

    /// Install a token and user in one step. The token is opaque.
    pub fn login(&mut self, token: impl Into<String>, user: User) {
        tracing::info!(email = %user.email, "User logged in");
        self.session = Session {
            token: Some(token.into()),
            user: Some(user),
            authenticated: true,
        };
        self.persist();
    }

    /// Drop token and user. Requests already sent keep the old token.
    pub fn logout(&mut self) {
        let email = self
            .session
            .user
            .as_ref()
            .map(|u| u.email.as_str())
            .unwrap_or("unknown");
        tracing::info!(email = %email, "Logging out user");
        self.session = Session::default();
        self.persist();
    }

    /// Replace the user record only, e.g. after a profile refresh.
    pub fn set_user(&mut self, user: User) {
        self.session.user = Some(user);
        self.persist();
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.authenticated
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user.as_ref()
    }

    pub fn snapshot(&self) -> &Session {
        &self.session
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(SESSION_SLOT, &self.session) {
            tracing::warn!(error = %e, "Failed to persist session");
        }
    }
}
