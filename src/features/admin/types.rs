use crate::features::users::{Role, UserStatus};
use serde::{Deserialize, Serialize};

/// Dashboard counters. The backend decides which ones it reports.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminStats {
    #[serde(alias = "users")]
    pub total_users: Option<u64>,
    #[serde(alias = "events")]
    pub total_events: Option<u64>,
    #[serde(alias = "tickets")]
    pub total_tickets: Option<u64>,
    #[serde(alias = "ticketsSold")]
    pub tickets_sold: Option<u64>,
    #[serde(alias = "totalRevenue")]
    pub revenue: Option<f64>,
}

#[derive(Clone, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Partial update; absent fields are left untouched by the backend.
#[derive(Clone, Debug, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
}

impl UserUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.role.is_none() && self.status.is_none()
    }
}
