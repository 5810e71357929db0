//! Route table and navigation sink. Routes describe the views of the desk; the
//! auth guard and the gateway's 401 policy request navigation through the
//! `Navigator` trait so the presentation layer decides how to react.

use crate::features::users::Role;
use std::{
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

pub mod paths {
    pub const HOME: &str = "/";
    pub const LOGIN: &str = "/login";
    pub const REGISTER: &str = "/register";
    pub const OAUTH_CALLBACK: &str = "/auth/callback";
    pub const EXHIBITIONS: &str = "/exhibitions";
    pub const DASHBOARD: &str = "/dashboard";
    pub const ADMIN: &str = "/admin";
    pub const ADMIN_USERS: &str = "/admin/users";
    pub const SCAN: &str = "/scan";
}

const STAFF_ROLES: &[Role] = &[Role::Staff, Role::Admin];
const ADMIN_ROLES: &[Role] = &[Role::Admin];

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    OAuthCallback,
    Exhibitions,
    Exhibition(String),
    Event(String),
    Dashboard,
    Ticket(String),
    Scan,
    Admin,
    AdminUsers,
    AdminUser(String),
    NotFound(String),
}

impl Route {
    /// Parses a location path, ignoring any query string or fragment.
    #[must_use]
    pub fn parse(location: &str) -> Self {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Home,
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["auth", "callback"] => Self::OAuthCallback,
            ["exhibitions"] => Self::Exhibitions,
            ["exhibitions", id] => Self::Exhibition((*id).to_string()),
            ["events", id] => Self::Event((*id).to_string()),
            ["dashboard"] => Self::Dashboard,
            ["tickets", id] => Self::Ticket((*id).to_string()),
            ["scan"] => Self::Scan,
            ["admin"] => Self::Admin,
            ["admin", "users"] => Self::AdminUsers,
            ["admin", "users", id] => Self::AdminUser((*id).to_string()),
            _ => Self::NotFound(path.to_string()),
        }
    }

    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => paths::HOME.to_string(),
            Self::Login => paths::LOGIN.to_string(),
            Self::Register => paths::REGISTER.to_string(),
            Self::OAuthCallback => paths::OAUTH_CALLBACK.to_string(),
            Self::Exhibitions => paths::EXHIBITIONS.to_string(),
            Self::Exhibition(id) => format!("{}/{id}", paths::EXHIBITIONS),
            Self::Event(id) => format!("/events/{id}"),
            Self::Dashboard => paths::DASHBOARD.to_string(),
            Self::Ticket(id) => format!("/tickets/{id}"),
            Self::Scan => paths::SCAN.to_string(),
            Self::Admin => paths::ADMIN.to_string(),
            Self::AdminUsers => paths::ADMIN_USERS.to_string(),
            Self::AdminUser(id) => format!("{}/{id}", paths::ADMIN_USERS),
            Self::NotFound(path) => path.clone(),
        }
    }

    /// Routes reachable without a session.
    #[must_use]
    pub const fn is_public(&self) -> bool {
        matches!(
            self,
            Self::Home
                | Self::Login
                | Self::Register
                | Self::OAuthCallback
                | Self::Exhibitions
                | Self::Exhibition(_)
                | Self::Event(_)
        )
    }

    /// Public routes that an authenticated session is bounced away from.
    #[must_use]
    pub const fn is_public_only(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// Roles admitted to the route; empty means any authenticated user.
    #[must_use]
    pub const fn required_roles(&self) -> &'static [Role] {
        match self {
            Self::Scan => STAFF_ROLES,
            Self::Admin | Self::AdminUsers | Self::AdminUser(_) => ADMIN_ROLES,
            _ => &[],
        }
    }

    /// Landing view for a freshly authenticated session.
    #[must_use]
    pub const fn landing_for(role: Role) -> Self {
        match role {
            Role::Admin => Self::Admin,
            Role::Staff | Role::User => Self::Dashboard,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Sink for navigation requests issued by guards and the gateway.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// In-memory location history; the current location is the last entry.
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: Arc<Mutex<Vec<Route>>>,
}

impl History {
    #[must_use]
    pub fn new(initial: Route) -> Self {
        Self {
            entries: Arc::new(Mutex::new(vec![initial])),
        }
    }

    #[must_use]
    pub fn location(&self) -> Option<Route> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    #[must_use]
    pub fn entries(&self) -> Vec<Route> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for History {
    fn navigate(&self, route: Route) {
        tracing::debug!(to = %route, "navigate");
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.last() != Some(&route) {
            entries.push(route);
        }
    }
}
