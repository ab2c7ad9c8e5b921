//! Mock authenticator for offline use.
//!
//! Accepts any well-formed credentials and fabricates a token. Nothing here
//! is meant to be secure.

use async_trait::async_trait;
use entities::User;
use rand::Rng;

use crate::{AuthError, AuthResult, AuthSession, Authenticator, MIN_PASSWORD_LENGTH};

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Authenticator that never leaves the process.
#[derive(Debug, Default, Clone)]
pub struct MockAuthenticator;

impl MockAuthenticator {
    /// Creates a new mock authenticator.
    pub fn new() -> Self {
        Self
    }
}

fn random_suffix(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

fn mock_token() -> String {
    format!("jwt_{}", random_suffix(7))
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    async fn login(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::validation("Invalid credentials"));
        }

        let name = email.split('@').next().unwrap_or(email);
        Ok(AuthSession {
            token: mock_token(),
            user: User::new("1", email, name),
        })
    }

    async fn signup(&self, email: &str, password: &str, name: &str) -> AuthResult<AuthSession> {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }
        if !email.contains('@') {
            return Err(AuthError::validation("Invalid email format"));
        }

        Ok(AuthSession {
            token: mock_token(),
            user: User::new(random_suffix(7), email, name),
        })
    }
}
