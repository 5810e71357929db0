//! Client wrappers for the authentication endpoints.

use crate::{
    api::ApiClient,
    errors::AppError,
    features::{
        auth::types::{LoginRequest, LoginResponse, MeResponse, RegisterRequest},
        users::User,
    },
};

/// Exchanges credentials for a bearer token and the user record.
pub async fn login(api: &ApiClient, request: &LoginRequest) -> Result<LoginResponse, AppError> {
    api.post_json("/auth/login", request).await
}

/// Creates an account; the backend answers `201 Created`.
pub async fn register(api: &ApiClient, request: &RegisterRequest) -> Result<(), AppError> {
    api.post_json_status("/auth/register", request).await.map(|_| ())
}

/// Resolves the user behind the currently attached credential.
pub async fn fetch_me(api: &ApiClient) -> Result<User, AppError> {
    api.get_json::<MeResponse>("/auth/me")
        .await
        .map(MeResponse::into_user)
}
