//! Local input guards run before any authenticator is asked.

use crate::{AuthError, AuthResult};

/// Rejects a login with an empty email or password.
pub fn validate_login(email: &str, password: &str) -> AuthResult<()> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AuthError::validation("Email and password are required"));
    }
    Ok(())
}

/// Rejects a signup with any empty field.
pub fn validate_signup(email: &str, password: &str, name: &str) -> AuthResult<()> {
    if email.trim().is_empty() || password.is_empty() || name.trim().is_empty() {
        return Err(AuthError::validation("All fields are required"));
    }
    Ok(())
}
