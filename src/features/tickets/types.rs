//! Ticket resources. Status transitions are decided by the backend; the client
//! only displays the status it is given.

use crate::features::{common::ResourceId, events::Event};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TicketStatus {
    Valid,
    Used,
    Cancelled,
    Transferred,
    Other(String),
}

impl From<String> for TicketStatus {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "valid" | "active" => Self::Valid,
            "used" => Self::Used,
            "cancelled" | "canceled" => Self::Cancelled,
            "transferred" => Self::Transferred,
            _ => Self::Other(value),
        }
    }
}

impl From<TicketStatus> for String {
    fn from(status: TicketStatus) -> Self {
        status.to_string()
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => f.write_str("valid"),
            Self::Used => f.write_str("used"),
            Self::Cancelled => f.write_str("cancelled"),
            Self::Transferred => f.write_str("transferred"),
            Self::Other(other) => f.write_str(other),
        }
    }
}

/// A ticket references its event either by id or embedded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventRef {
    Embedded(Event),
    Id(ResourceId),
}

impl EventRef {
    #[must_use]
    pub fn id(&self) -> &ResourceId {
        match self {
            Self::Embedded(event) => &event.id,
            Self::Id(id) => id,
        }
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Embedded(event) => Some(event.title.as_str()),
            Self::Id(_) => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    #[serde(default, alias = "fullName")]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    #[serde(default)]
    pub ticket_number: String,
    pub status: TicketStatus,
    #[serde(default, alias = "exhibition")]
    pub event: Option<EventRef>,
    #[serde(default, alias = "user", alias = "owner")]
    pub attendee: Option<Attendee>,
    #[serde(default, alias = "createdAt")]
    pub purchase_date: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub recipient_email: String,
}

/// Response to transfer and cancel requests.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TicketActionResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub ticket: Option<Ticket>,
}
