use serde::{Deserialize, Serialize};

/// The signed-in user as reported by the auth backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl User {
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

/// Editable profile fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub email: String,
}

impl ProfileUpdate {
    /// Start from the user's current values
    pub fn from_user(user: &User) -> Self {
        Self {
            full_name: user.full_name.clone().unwrap_or_default(),
            email: user.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_from_auth_backend() {
        let user: User = serde_json::from_value(serde_json::json!({
            "username": "jdoe",
            "email": "jdoe@example.com",
            "full_name": null,
            "is_active": true,
            "is_verified": false,
            "created_at": "2025-01-02T03:04:05"
        }))
        .unwrap();

        assert_eq!(user.display_name(), "jdoe");
        assert!(user.is_active);
        assert_eq!(ProfileUpdate::from_user(&user).full_name, "");
    }
}
