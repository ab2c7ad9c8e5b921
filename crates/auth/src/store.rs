//! The auth store.
//!
//! Holds the current token and user in memory and mirrors them into
//! session storage so that a later process starts signed in.

use std::sync::Arc;

use entities::User;
use session::{keys, SessionStorage};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::{validate_login, validate_signup, AuthError, AuthResult, AuthSession, Authenticator};

#[derive(Debug, Default)]
struct AuthState {
    token: Option<String>,
    user: Option<User>,
    is_loading: bool,
}

/// Current authentication state and the actions that change it.
pub struct AuthStore {
    storage: Arc<dyn SessionStorage>,
    authenticator: Arc<dyn Authenticator>,
    state: RwLock<AuthState>,
}

impl AuthStore {
    /// Creates a store and rehydrates it from session storage.
    ///
    /// The session is restored only when both a token and a readable user
    /// are stored. Unreadable entries are logged and treated as signed out.
    pub fn load(storage: Arc<dyn SessionStorage>, authenticator: Arc<dyn Authenticator>) -> Self {
        let mut state = AuthState {
            is_loading: true,
            ..Default::default()
        };

        match restore(storage.as_ref()) {
            Ok(Some(session)) => {
                state.token = Some(session.token);
                state.user = Some(session.user);
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Ignoring unreadable stored session"),
        }
        state.is_loading = false;

        Self {
            storage,
            authenticator,
            state: RwLock::new(state),
        }
    }

    /// Signs in and persists the session.
    ///
    /// Empty fields are rejected before the authenticator is called. On any
    /// failure the current state and storage are left untouched.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<User> {
        validate_login(email, password)?;
        let session = self.authenticator.login(email.trim(), password).await?;
        self.commit(session).await
    }

    /// Creates an account, signs in and persists the session.
    pub async fn signup(&self, email: &str, password: &str, name: &str) -> AuthResult<User> {
        validate_signup(email, password, name)?;
        let session = self
            .authenticator
            .signup(email.trim(), password, name.trim())
            .await?;
        self.commit(session).await
    }

    /// Clears the session from memory and storage.
    pub async fn logout(&self) -> AuthResult<()> {
        self.storage.remove(keys::TOKEN)?;
        self.storage.remove(keys::USER)?;

        let mut state = self.state.write().await;
        if let Some(user) = state.user.take() {
            info!(email = %user.email, "Signed out");
        }
        state.token = None;
        Ok(())
    }

    /// The signed-in user, if any.
    pub async fn user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    /// The current token, if any.
    pub async fn token(&self) -> Option<String> {
        self.state.read().await.token.clone()
    }

    /// Returns true if a token is held.
    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.token.is_some()
    }

    /// Returns true while the stored session is being restored.
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading
    }

    /// Returns the signed-in user or [`AuthError::NotAuthenticated`].
    pub async fn require_user(&self) -> AuthResult<User> {
        let state = self.state.read().await;
        match (&state.token, &state.user) {
            (Some(_), Some(user)) => Ok(user.clone()),
            _ => Err(AuthError::NotAuthenticated),
        }
    }

    async fn commit(&self, session: AuthSession) -> AuthResult<User> {
        let user_json = serde_json::to_string(&session.user)?;
        self.storage.set(keys::TOKEN, &session.token)?;
        if let Err(e) = self.storage.set(keys::USER, &user_json) {
            // Never leave a token without its user
            if let Err(cleanup) = self.storage.remove(keys::TOKEN) {
                warn!(error = %cleanup, "Failed to drop token after a partial session write");
            }
            return Err(e.into());
        }

        let mut state = self.state.write().await;
        info!(email = %session.user.email, "Signed in");
        state.token = Some(session.token);
        state.user = Some(session.user.clone());
        Ok(session.user)
    }
}

fn restore(storage: &dyn SessionStorage) -> AuthResult<Option<AuthSession>> {
    let token = storage.get(keys::TOKEN)?;
    let user = storage.get(keys::USER)?;

    match (token, user) {
        (Some(token), Some(user)) => {
            let user: User = serde_json::from_str(&user)?;
            Ok(Some(AuthSession { token, user }))
        }
        _ => Ok(None),
    }
}
