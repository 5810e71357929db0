use crate::{
    api::ApiClient,
    errors::AppError,
    features::verification::types::{VerifyRequest, VerifyResponse},
};

/// Posts a verification request. Non-2xx answers surface as `AppError::Http`
/// carrying the server's message.
pub async fn verify_ticket(
    api: &ApiClient,
    request: &VerifyRequest,
) -> Result<VerifyResponse, AppError> {
    api.post_json("/tickets/verify", request).await
}
