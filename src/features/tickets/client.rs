//! Client helpers for ticket endpoints. Transfer and cancel only ask the
//! backend for a transition; the resulting status comes back in the response.

use crate::{
    api::ApiClient,
    errors::AppError,
    features::{
        auth::validation::valid_email,
        common::{required_segment, Single},
        tickets::types::{Ticket, TicketActionResponse, TransferRequest},
    },
};
use tracing::info;

/// Fetches a ticket by id.
pub async fn get_ticket(api: &ApiClient, id: &str) -> Result<Ticket, AppError> {
    let id = required_segment(id, "Ticket id")?;
    api.get_json::<Single<Ticket>>(&format!("/tickets/{id}"))
        .await
        .map(Single::into_inner)
}

/// Requests transfer of a ticket to another account.
pub async fn transfer_ticket(
    api: &ApiClient,
    id: &str,
    recipient_email: &str,
) -> Result<TicketActionResponse, AppError> {
    let id = required_segment(id, "Ticket id")?;
    let recipient_email = recipient_email.trim();
    if !valid_email(recipient_email) {
        return Err(AppError::Validation(
            "Please enter a valid recipient email address.".to_string(),
        ));
    }

    let request = TransferRequest {
        recipient_email: recipient_email.to_string(),
    };
    let response = api
        .post_json(&format!("/tickets/{id}/transfer"), &request)
        .await?;
    info!(ticket = %id, "transfer requested");
    Ok(response)
}

/// Requests cancellation of a ticket.
pub async fn cancel_ticket(api: &ApiClient, id: &str) -> Result<TicketActionResponse, AppError> {
    let id = required_segment(id, "Ticket id")?;
    let response = api.post_empty(&format!("/tickets/{id}/cancel")).await?;
    info!(ticket = %id, "cancellation requested");
    Ok(response)
}
