//! Executable actions. Each action opens the desk (session hydration plus
//! the API client), applies the route guard for its view, and renders the
//! result on stdout. Backend failures are reported, not propagated; only
//! configuration problems end the process with an error.

pub mod admin;
pub mod auth;
pub mod events;
pub mod scan;
pub mod tickets;
mod views;

use crate::{
    api::ApiClient,
    cli::globals::GlobalArgs,
    features::auth::{AuthManager, GuardDecision},
    navigation::{History, Navigator, Route},
    session::{FileStorage, SessionStore},
};
use anyhow::Result;
use std::sync::Arc;

#[derive(Debug)]
pub enum Action {
    Auth(auth::Args),
    Scan(scan::Args),
    Verify(scan::VerifyArgs),
    Tickets(tickets::Args),
    Events(events::Args),
    Admin(admin::Args),
}

impl Action {
    /// Execute the action.
    ///
    /// # Errors
    /// Returns an error when the client cannot be configured.
    pub async fn execute(self) -> Result<()> {
        match self {
            Self::Auth(args) => auth::execute(args).await,
            Self::Scan(args) => scan::execute(args).await,
            Self::Verify(args) => scan::verify(args).await,
            Self::Tickets(args) => tickets::execute(args).await,
            Self::Events(args) => events::execute(args).await,
            Self::Admin(args) => admin::execute(args).await,
        }
    }
}

/// Hydrated session plus the location history it navigates.
#[derive(Debug)]
pub struct Desk {
    auth: AuthManager,
    history: History,
}

impl Desk {
    /// Builds the client stack from the global settings and restores any
    /// stored session.
    ///
    /// # Errors
    /// Returns an error when the HTTP client cannot be built.
    pub async fn open(globals: &GlobalArgs) -> Result<Self> {
        let storage = Arc::new(FileStorage::new(globals.config.session_file.clone()));
        let session = SessionStore::new(storage);
        let history = History::new(Route::Home);
        let navigator: Arc<dyn Navigator> = Arc::new(history.clone());
        let api = ApiClient::new(&globals.config, session, Arc::clone(&navigator))?;
        let auth = AuthManager::new(api, navigator);

        auth.check_session().await;

        Ok(Self { auth, history })
    }

    #[must_use]
    pub const fn auth(&self) -> &AuthManager {
        &self.auth
    }

    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        self.auth.api()
    }

    #[must_use]
    pub fn location(&self) -> Option<Route> {
        self.history.location()
    }

    /// Applies the guard for `route`. Returns `false` after explaining why
    /// the view is unavailable.
    pub fn enter(&self, route: &Route) -> bool {
        match self.auth.enforce(route) {
            GuardDecision::Allow => true,
            GuardDecision::Redirect(Route::Login) => {
                views::notice("Please sign in first: ticketdesk login --email <email>");
                false
            }
            GuardDecision::Redirect(_) => {
                views::already_signed_in(self.auth.current_user().as_ref());
                false
            }
            GuardDecision::Deny { required } => {
                views::access_denied(required);
                false
            }
            GuardDecision::Pending => {
                views::notice("Session is still loading, try again.");
                false
            }
        }
    }
}
