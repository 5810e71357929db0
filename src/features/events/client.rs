//! Client helpers for event and exhibition endpoints. These are public
//! read-only resources; the gateway still attaches a credential when present.

use crate::{
    api::ApiClient,
    errors::AppError,
    features::{
        common::{required_segment, Listing, Single},
        events::types::{Event, Exhibition},
    },
};

/// Fetches a single event by id.
pub async fn get_event(api: &ApiClient, id: &str) -> Result<Event, AppError> {
    let id = required_segment(id, "Event id")?;
    api.get_json::<Single<Event>>(&format!("/events/{id}"))
        .await
        .map(Single::into_inner)
}

/// Lists the exhibitions currently published by the backend.
pub async fn list_exhibitions(api: &ApiClient) -> Result<Vec<Exhibition>, AppError> {
    api.get_json::<Listing<Exhibition>>("/exhibitions")
        .await
        .map(Listing::into_items)
}

/// Fetches exhibition details by id.
pub async fn get_exhibition(api: &ApiClient, id: &str) -> Result<Exhibition, AppError> {
    let id = required_segment(id, "Exhibition id")?;
    api.get_json::<Single<Exhibition>>(&format!("/exhibitions/{id}"))
        .await
        .map(Single::into_inner)
}
