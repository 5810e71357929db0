//! The API gateway: one shared HTTP client for the whole session with a fixed
//! origin, default headers, and a timeout. Every request passes through two
//! policies. Outgoing calls carry `Authorization: Bearer <token>` when the
//! session holds a credential. A `401` from any endpoint clears the session and
//! navigates to the login view before the error reaches the caller. All other
//! failures are returned untouched for local handling.

use crate::{
    config::AppConfig,
    errors::AppError,
    navigation::{Navigator, Route},
    session::SessionStore,
    APP_USER_AGENT,
};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Client, Method, RequestBuilder, Response, StatusCode,
};
use secrecy::ExposeSecret;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::{sync::Arc, time::Duration};
use tracing::{debug, warn};

/// Default request timeout (milliseconds) applied to every call.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
/// Maximum number of error body characters surfaced to the user.
const MAX_ERROR_CHARS: usize = 200;
const SESSION_EXPIRED: &str = "Session expired, please sign in again.";

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Builds the gateway for the configured origin.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the origin is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(
        config: &AppConfig,
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, AppError> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_millis(DEFAULT_TIMEOUT_MS))
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim().trim_end_matches('/').to_string(),
            session,
            navigator,
        })
    }

    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds an absolute URL from the configured origin and `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        build_url_with_base(&self.base_url, path)
    }

    /// # Errors
    /// Returns the gateway's `AppError` for transport, status, or decode failures.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        handle_json_response(response).await
    }

    /// # Errors
    /// Returns the gateway's `AppError` for transport, status, or decode failures.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let response = self
            .send(self.request(Method::POST, path).json(body))
            .await?;
        handle_json_response(response).await
    }

    /// Posts JSON and returns only the success status, for endpoints such as
    /// registration that answer `201` with a body the client does not need.
    ///
    /// # Errors
    /// Returns the gateway's `AppError` for transport or status failures.
    pub async fn post_json_status<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<u16, AppError> {
        let response = self
            .send(self.request(Method::POST, path).json(body))
            .await?;
        let status = response.status();
        if status.is_success() {
            Ok(status.as_u16())
        } else {
            Err(http_error(response).await)
        }
    }

    /// Posts without a body and parses the JSON response.
    ///
    /// # Errors
    /// Returns the gateway's `AppError` for transport, status, or decode failures.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self.send(self.request(Method::POST, path)).await?;
        handle_json_response(response).await
    }

    /// # Errors
    /// Returns the gateway's `AppError` for transport, status, or decode failures.
    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let response = self
            .send(self.request(Method::PUT, path).json(body))
            .await?;
        handle_json_response(response).await
    }

    /// # Errors
    /// Returns the gateway's `AppError` for transport or status failures.
    pub async fn delete(&self, path: &str) -> Result<(), AppError> {
        let response = self.send(self.request(Method::DELETE, path)).await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(http_error(response).await)
        }
    }

    /// Request policy: attach the bearer credential when one is present.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match self.session.credential() {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    /// Response policy: a `401` from any call ends the session.
    async fn send(&self, builder: RequestBuilder) -> Result<Response, AppError> {
        let response = builder.send().await.map_err(map_request_error)?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url().path(), "response");

        if status == StatusCode::UNAUTHORIZED {
            let message = error_message(response).await;
            warn!("Authorization rejected, clearing session");
            self.session.clear();
            self.navigator.navigate(Route::Login);
            let message = if message.is_empty() {
                SESSION_EXPIRED.to_string()
            } else {
                message
            };
            return Err(AppError::Unauthorized(message));
        }

        Ok(response)
    }
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps transport errors into user-facing variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        AppError::Serialization(format!("Failed to build request: {err}"))
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Parses JSON responses and surfaces HTTP errors with sanitized bodies.
async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    if response.status().is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        Err(http_error(response).await)
    }
}

async fn http_error(response: Response) -> AppError {
    let status = response.status().as_u16();
    let message = error_message(response).await;
    AppError::Http {
        status,
        message: if message.is_empty() {
            "Request failed.".to_string()
        } else {
            message
        },
    }
}

/// Extracts the server-supplied explanation from an error response, which is
/// either a JSON object with a `message` or `error` field or plain text.
async fn error_message(response: Response) -> String {
    let body = response.text().await.unwrap_or_default();
    extract_message(&body)
}

pub(crate) fn extract_message(body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|value| {
        value
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| value.get("error").and_then(Value::as_str))
            .or_else(|| value.pointer("/error/message").and_then(Value::as_str))
            .map(str::to_string)
    });

    sanitize(from_json.as_deref().unwrap_or(body))
}

/// Trims and truncates a message for display.
fn sanitize(body: &str) -> String {
    body.trim().chars().take(MAX_ERROR_CHARS).collect()
}
