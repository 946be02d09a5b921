//! Session store
//!
//! Holds the one current identity of the running client. Only `login` and
//! `logout` mutate it.

use tracing::instrument;

use crate::directory::CredentialDirectory;
use crate::error::{Error, Result};
use crate::guard::GuardState;
use crate::models::{Identity, Role, Session};

pub struct SessionStore {
    directory: CredentialDirectory,
    current: Option<Session>,
}

impl SessionStore {
    /// Start signed out against the given directory
    pub fn new(directory: CredentialDirectory) -> Self {
        Self {
            directory,
            current: None,
        }
    }

    /// Sign in with an email, password and claimed role.
    ///
    /// On failure the current session is left untouched.
    #[instrument(skip(self, password), fields(role = %claimed_role))]
    pub fn login(&mut self, email: &str, password: &str, claimed_role: Role) -> Result<Identity> {
        let identity = match self.directory.verify(email, password, claimed_role) {
            Ok(identity) => identity,
            Err(Error::NotFound(_)) => {
                tracing::warn!(email = %email, "Login rejected");
                return Err(Error::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        tracing::info!(user_id = %identity.id, "Signed in");
        self.current = Some(Session::new(identity.clone()));
        Ok(identity)
    }

    /// Clear the session. Safe to call when already signed out.
    pub fn logout(&mut self) {
        if let Some(session) = self.current.take() {
            tracing::info!(user_id = %session.identity.id, "Signed out");
        }
    }

    pub fn current_identity(&self) -> Option<&Identity> {
        self.current.as_ref().map(|s| &s.identity)
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Project the session onto the route guard's states
    pub fn guard_state(&self) -> GuardState {
        match self.current_identity() {
            Some(identity) => GuardState::AuthenticatedAs(identity.role),
            None => GuardState::Unauthenticated,
        }
    }

    pub fn directory(&self) -> &CredentialDirectory {
        &self.directory
    }
}
