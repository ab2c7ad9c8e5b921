//! Authenticator trait and the API-backed implementation.

use api_client::ApiClient;
use api_protocol::{LoginRequest, RegisterRequest};
use async_trait::async_trait;
use entities::User;
use tracing::debug;

use crate::AuthResult;

/// A freshly issued session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// Opaque bearer token.
    pub token: String,
    /// The signed-in user.
    pub user: User,
}

/// Trait for exchanging credentials for a session.
///
/// Implementations can assume the local guards in [`crate::validate_login`]
/// and [`crate::validate_signup`] already passed.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Signs in with existing credentials.
    async fn login(&self, email: &str, password: &str) -> AuthResult<AuthSession>;

    /// Creates an account and signs in.
    async fn signup(&self, email: &str, password: &str, name: &str) -> AuthResult<AuthSession>;
}

/// Authenticator backed by the Taskboard backend.
#[derive(Clone)]
pub struct ApiAuthenticator {
    client: ApiClient,
}

impl ApiAuthenticator {
    /// Creates a new API authenticator.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Authenticator for ApiAuthenticator {
    async fn login(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        debug!(email = %email, "Logging in through the API");
        let response = self
            .client
            .login(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;

        Ok(AuthSession {
            user: response.user(),
            token: response.token,
        })
    }

    async fn signup(&self, email: &str, password: &str, name: &str) -> AuthResult<AuthSession> {
        debug!(email = %email, "Registering through the API");
        let response = self
            .client
            .register(&RegisterRequest {
                email: email.to_string(),
                password: password.to_string(),
                full_name: name.to_string(),
            })
            .await?;

        Ok(AuthSession {
            user: response.user(),
            token: response.token,
        })
    }
}
