//! User identity as returned by the backend. The client keeps a read-mostly copy
//! inside the session; none of these fields are secrets.

use crate::features::common::ResourceId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Role {
    #[default]
    User,
    Staff,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Staff => "staff",
            Self::Admin => "admin",
        }
    }
}

/// Unknown role names grant the least privilege.
impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "admin" => Self::Admin,
            "staff" => Self::Staff,
            _ => Self::User,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum UserStatus {
    #[default]
    Active,
    Suspended,
}

impl From<String> for UserStatus {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("active") {
            Self::Active
        } else {
            Self::Suspended
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("active"),
            Self::Suspended => f.write_str("suspended"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl User {
    /// Label used in views: the display name when present, otherwise the email.
    #[must_use]
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
    fn user_deserializes_minimal_payload() {
        let user: User =
            serde_json::from_str(r#"{"id":1,"role":"admin"}"#).expect("Failed to deserialize");
        assert_eq!(user.id.as_str(), "1");
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.status, UserStatus::Active);
        assert!(user.profile_image.is_none());
    }

    #[test]
    fn user_accepts_mongo_style_id_and_camel_case() {
        let user: User = serde_json::from_str(
            r#"{"_id":"65a1","name":"Ada","email":"ada@example.com","role":"staff","status":"suspended","profileImage":"/img/ada.png"}"#,
        )
        .expect("Failed to deserialize");
        assert_eq!(user.id.as_str(), "65a1");
        assert_eq!(user.role, Role::Staff);
        assert_eq!(user.status, UserStatus::Suspended);
        assert_eq!(user.profile_image.as_deref(), Some("/img/ada.png"));
        assert_eq!(user.display_name(), "Ada");
    }

    #[test]
    fn unknown_role_falls_back_to_user() {
        let user: User = serde_json::from_str(r#"{"id":"u","role":"superuser"}"#)
            .expect("Failed to deserialize");
        assert_eq!(user.role, Role::User);
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Staff).expect("Failed to serialize");
        assert_eq!(json, "\"staff\"");
    }
}
