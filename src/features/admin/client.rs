//! Admin endpoints. Authorization is enforced by the backend; callers gate the
//! views with `has_role` before reaching these helpers.

use crate::{
    api::ApiClient,
    errors::AppError,
    features::{
        admin::types::{AdminStats, NewUser, UserUpdate},
        auth::validation::{valid_email, MIN_PASSWORD_LEN},
        common::{required_segment, Listing, Single},
        users::User,
    },
};
use tracing::info;

pub async fn stats(api: &ApiClient) -> Result<AdminStats, AppError> {
    api.get_json::<Single<AdminStats>>("/admin/stats")
        .await
        .map(Single::into_inner)
}

pub async fn list_users(api: &ApiClient) -> Result<Vec<User>, AppError> {
    api.get_json::<Listing<User>>("/admin/users")
        .await
        .map(Listing::into_items)
}

pub async fn get_user(api: &ApiClient, id: &str) -> Result<User, AppError> {
    let id = required_segment(id, "User id")?;
    api.get_json::<Single<User>>(&format!("/admin/users/{id}"))
        .await
        .map(Single::into_inner)
}

/// Creates an account with an explicit role.
pub async fn create_user(api: &ApiClient, user: &NewUser) -> Result<User, AppError> {
    if user.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required.".to_string()));
    }
    if !valid_email(user.email.trim()) {
        return Err(AppError::Validation(
            "Please enter a valid email address.".to_string(),
        ));
    }
    if user.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters."
        )));
    }

    let created = api
        .post_json::<_, Single<User>>("/admin/users", user)
        .await
        .map(Single::into_inner)?;
    info!(role = %created.role, "user created");
    Ok(created)
}

pub async fn update_user(api: &ApiClient, id: &str, update: &UserUpdate) -> Result<User, AppError> {
    let id = required_segment(id, "User id")?;
    if update.is_empty() {
        return Err(AppError::Validation("Nothing to update.".to_string()));
    }
    if let Some(email) = &update.email {
        if !valid_email(email.trim()) {
            return Err(AppError::Validation(
                "Please enter a valid email address.".to_string(),
            ));
        }
    }

    api.put_json::<_, Single<User>>(&format!("/admin/users/{id}"), update)
        .await
        .map(Single::into_inner)
}

pub async fn delete_user(api: &ApiClient, id: &str) -> Result<(), AppError> {
    let id = required_segment(id, "User id")?;
    api.delete(&format!("/admin/users/{id}")).await?;
    info!(user = %id, "user deleted");
    Ok(())
}
