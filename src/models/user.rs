use serde::{Deserialize, Serialize};

use crate::database::Document;

/// Stored user record. Never serialized to clients; see [`UserView`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    #[serde(default)]
    pub image_url: String,
}

impl Document for User {
    const COLLECTION: &'static str = "users";
    const UNIQUE: &'static [&'static str] = &["email"];

    fn id(&self) -> &str {
        &self.id
    }
}

/// Public projection of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserView {
    pub id: String,
    pub email: String,
    pub username: String,
    pub image_url: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            image_url: user.image_url,
        }
    }
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub image_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body of `PUT /users/:id`. The stored hash is kept when `password` is absent.
#[derive(Debug, Clone, Deserialize)]
pub struct UserChanges {
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub image_url: String,
}

/// Lower-cases and trims an email or username for storage and lookup.
pub fn normalize_identity(value: &str) -> String {
    value.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_trimmed_and_lowercased() {
        assert_eq!(normalize_identity("  Jisoo@Example.COM "), "jisoo@example.com");
    }

    #[test]
    fn view_drops_password_hash() {
        let user = User {
            id: "u1".to_string(),
            email: "a@x.com".to_string(),
            username: "alice".to_string(),
            password_hash: "$2b$hash".to_string(),
            image_url: String::new(),
        };
        let json = serde_json::to_value(UserView::from(user)).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "alice");
    }
}
