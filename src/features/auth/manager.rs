//! The auth session manager owns the session lifecycle: it hydrates the session
//! once at start-up, establishes it on login or OAuth callback, and tears it
//! down on logout. It is the only component that creates sessions; the gateway
//! may only clear them.

use crate::{
    api::ApiClient,
    errors::AppError,
    features::auth::{
        client,
        guards::{guard, GuardDecision},
        types::{AuthOutcome, LoginRequest, RegisterRequest, RegistrationForm},
        validation::{validate_login, validate_registration},
    },
    features::users::User,
    navigation::{Navigator, Route},
    session::SessionStore,
};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use url::Url;

const NO_CALLBACK_TOKEN: &str = "No authentication token received.";

#[derive(Clone)]
pub struct AuthManager {
    api: ApiClient,
    navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthManager")
            .field("api", &self.api)
            .finish_non_exhaustive()
    }
}

impl AuthManager {
    #[must_use]
    pub fn new(api: ApiClient, navigator: Arc<dyn Navigator>) -> Self {
        Self { api, navigator }
    }

    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        self.api.session()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.session().current_user()
    }

    /// Hydrates the session from client-local storage. Any failure downgrades
    /// to an anonymous session; the loading flag is cleared in every case.
    #[instrument(skip(self))]
    pub async fn check_session(&self) {
        let session = self.session();

        if let Some(persisted) = session.persisted() {
            let token = SecretString::from(persisted.token);
            session.attach_credential(token.clone());

            match client::fetch_me(&self.api).await {
                Ok(user) => {
                    debug!(role = %user.role, "session restored");
                    if let Err(err) = session.establish(token, user) {
                        warn!("Failed to refresh persisted session: {err}");
                    }
                }
                Err(err) => {
                    info!("Stored session rejected: {err}");
                    session.clear();
                }
            }
        } else {
            session.clear();
        }

        session.finish_loading();
    }

    /// Signs in with email and password and navigates to the role's landing view.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> AuthOutcome {
        if let Err(err) = validate_login(email, password) {
            return AuthOutcome::failed(err.user_message());
        }

        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        match client::login(&self.api, &request).await {
            Ok(response) if response.token.trim().is_empty() => {
                AuthOutcome::failed("Login response did not include a token.")
            }
            Ok(response) => {
                self.establish(SecretString::from(response.token), response.user);
                AuthOutcome::ok()
            }
            Err(err) => {
                debug!("login failed: {err}");
                AuthOutcome::failed(err.user_message())
            }
        }
    }

    /// Creates an account and sends the user to the login view.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn register(&self, form: &RegistrationForm) -> AuthOutcome {
        if let Err(err) = validate_registration(form) {
            return AuthOutcome::failed(err.user_message());
        }

        let request = RegisterRequest {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            password: form.password.clone(),
        };

        match client::register(&self.api, &request).await {
            Ok(()) => {
                self.navigator.navigate(Route::Login);
                AuthOutcome::ok()
            }
            Err(err) => AuthOutcome::failed(err.user_message()),
        }
    }

    /// Completes an external sign-in flow with the token it produced.
    #[instrument(skip(self, token))]
    pub async fn process_oauth_callback(&self, token: Option<&str>) -> AuthOutcome {
        let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
            return AuthOutcome::failed(NO_CALLBACK_TOKEN);
        };

        let token = SecretString::from(token.to_string());
        self.session().attach_credential(token.clone());

        match client::fetch_me(&self.api).await {
            Ok(user) => {
                self.establish(token, user);
                AuthOutcome::ok()
            }
            Err(err) => {
                self.session().clear();
                AuthOutcome::failed(err.user_message())
            }
        }
    }

    /// Ends the session locally; no server call is involved.
    pub fn logout(&self) {
        self.session().clear();
        self.navigator.navigate(Route::Home);
    }

    /// Evaluates the guard for `route` and performs any redirect it demands.
    pub fn enforce(&self, route: &Route) -> GuardDecision {
        let session = self.session();
        let user = session.current_user();
        let decision = guard(user.as_ref(), session.is_loading(), route);

        match &decision {
            GuardDecision::Redirect(target) => self.navigator.navigate(target.clone()),
            GuardDecision::Allow | GuardDecision::Deny { .. } => {
                self.navigator.navigate(route.clone());
            }
            GuardDecision::Pending => {}
        }

        decision
    }

    /// URL that starts the backend's external sign-in flow for `provider`.
    ///
    /// # Errors
    /// Returns `AppError::Validation` for provider names that are not a plain slug.
    pub fn oauth_start_url(&self, provider: &str) -> Result<String, AppError> {
        let provider = provider.trim().to_lowercase();
        if provider.is_empty()
            || !provider
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(AppError::Validation(format!(
                "Unknown sign-in provider: {provider}"
            )));
        }
        Ok(self.api.url(&format!("/auth/{provider}")))
    }

    fn establish(&self, token: SecretString, user: User) {
        let landing = Route::landing_for(user.role);
        if let Err(err) = self.session().establish(token, user) {
            warn!("Session is active but could not be persisted: {err}");
        }
        self.navigator.navigate(landing);
    }
}

/// Extracts the `token` query parameter from an OAuth redirect location. Both
/// absolute URLs and bare `?token=` query strings are accepted.
#[must_use]
pub fn token_from_callback_url(location: &str) -> Option<String> {
    let location = location.trim();
    let query = match Url::parse(location) {
        Ok(url) => url.query().map(str::to_string),
        Err(_) => location
            .split_once('?')
            .map(|(_, query)| query.to_string())
            .or_else(|| location.contains("token=").then(|| location.to_string())),
    }?;

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "token")
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
