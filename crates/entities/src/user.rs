//! User-related entity definitions.

use serde::{Deserialize, Serialize};

/// The signed-in user as kept by the auth store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: String,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
}

impl User {
    /// Creates a new user.
    pub fn new(id: impl Into<String>, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
        }
    }

    /// Returns the name to greet the user with, falling back to the email.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("1", "test@example.com", "Test User");

        assert_eq!(user.email, "test@example.com");
        assert_eq!(user.display_name(), "Test User");
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let user = User::new("1", "test@example.com", " ");
        assert_eq!(user.display_name(), "test@example.com");
    }

    #[test]
    fn test_user_json_shape() {
        let user = User::new("1", "a@b.c", "A");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({"id": "1", "email": "a@b.c", "name": "A"}));
    }
}
