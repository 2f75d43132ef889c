//! Users and authentication payloads.

use serde::{Deserialize, Serialize};

/// Platform role of a user account.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    ContentManager,
    /// Unknown roles are treated as students so they never pass the admin gate
    #[default]
    #[serde(other)]
    Student,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Admin, Role::ContentManager];

    /// Roles allowed into the admin dashboard.
    pub fn can_administer(self) -> bool {
        matches!(self, Role::Admin | Role::ContentManager)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::ContentManager => "ContentManager",
            Role::Student => "Student",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::ContentManager => "Content Manager",
            Role::Student => "Student",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub profile_image_url: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub is_email_verified: bool,
    pub created_at: String,
    pub bio: Option<String>,
    pub profession: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_deserialization() {
        let resp: LoginResponse = serde_json::from_value(serde_json::json!({
            "accessToken": "jwt",
            "refreshToken": "r",
            "user": {
                "id": "u1",
                "email": "a@b.c",
                "firstName": "Ada",
                "lastName": "Lovelace",
                "role": "ContentManager",
                "isActive": true
            }
        }))
        .unwrap();
        assert_eq!(resp.access_token, "jwt");
        assert_eq!(resp.user.role, Role::ContentManager);
        assert_eq!(resp.user.full_name(), "Ada Lovelace");
        assert!(resp.user.role.can_administer());
        assert!(!Role::Student.can_administer());
    }
}
