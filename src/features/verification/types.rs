//! Wire types for ticket verification. Requests use one canonical shape; the
//! response is normalized from the several shapes the backend has emitted.

use crate::features::tickets::{Attendee, Ticket};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

pub const VERIFICATION_FAILED: &str = "Ticket verification failed";
pub const VERIFICATION_SUCCEEDED: &str = "Ticket verified";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub ticket_number: String,
    pub qr_data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
}

impl VerifyRequest {
    /// Builds a request from a decoded QR payload. Payloads that are JSON
    /// objects carrying a ticket number contribute that number; anything else
    /// is treated as the ticket number itself. The raw payload is always sent
    /// as `qrData`.
    #[must_use]
    pub fn from_payload(payload: &str, event_id: Option<&str>) -> Option<Self> {
        let payload = payload.trim();
        if payload.is_empty() {
            return None;
        }

        let ticket_number = serde_json::from_str::<Value>(payload)
            .ok()
            .and_then(|value| {
                ["ticketNumber", "ticket_number", "ticketId"]
                    .iter()
                    .find_map(|key| value.get(*key).and_then(Value::as_str).map(str::to_string))
            })
            .unwrap_or_else(|| payload.to_string());

        Some(Self {
            ticket_number,
            qr_data: payload.to_string(),
            event_id: event_id
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string),
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusInfo {
    pub can_be_used: Option<bool>,
    #[serde(alias = "reason")]
    pub message: Option<String>,
}

/// Raw verification response. Nested payloads stay untyped until
/// normalization so a malformed optional part does not sink the whole result.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VerifyResponse {
    pub valid: Option<bool>,
    pub success: Option<bool>,
    pub status: Option<Value>,
    pub message: Option<String>,
    pub ticket: Option<Value>,
    pub attendee: Option<Value>,
    pub data: Option<Value>,
    pub status_info: Option<StatusInfo>,
    pub can_be_used: Option<bool>,
}

/// What the verification view renders for a successful lookup.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VerificationDetails {
    pub ticket: Option<Ticket>,
    pub attendee: Option<Attendee>,
    pub can_be_used: Option<bool>,
    pub status_message: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum VerificationResult {
    Success {
        message: String,
        details: VerificationDetails,
    },
    Error {
        message: String,
    },
}

impl VerificationResult {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success { message, .. } | Self::Error { message } => message,
        }
    }

    #[must_use]
    pub const fn details(&self) -> Option<&VerificationDetails> {
        match self {
            Self::Success { details, .. } => Some(details),
            Self::Error { .. } => None,
        }
    }
}

impl VerifyResponse {
    /// A response is ok unless it reports `status: "error"`, `valid: false`,
    /// or `success: false`.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        let error_status = self
            .status
            .as_ref()
            .and_then(Value::as_str)
            .is_some_and(|status| status.eq_ignore_ascii_case("error"));
        !(error_status || self.valid == Some(false) || self.success == Some(false))
    }

    #[must_use]
    pub fn into_result(self) -> VerificationResult {
        if !self.is_ok() {
            return VerificationResult::Error {
                message: non_blank(self.message).unwrap_or_else(|| VERIFICATION_FAILED.to_string()),
            };
        }

        let message = non_blank(self.message.clone())
            .unwrap_or_else(|| VERIFICATION_SUCCEEDED.to_string());
        VerificationResult::Success {
            message,
            details: self.into_details(),
        }
    }

    fn into_details(self) -> VerificationDetails {
        let nested = self.data.as_ref().filter(|data| {
            ["ticket", "attendee", "statusInfo", "canBeUsed"]
                .iter()
                .any(|key| data.get(*key).is_some())
        });

        let ticket = self
            .ticket
            .as_ref()
            .and_then(typed::<Ticket>)
            .or_else(|| nested.and_then(|data| data.get("ticket")).and_then(typed::<Ticket>))
            .or_else(|| {
                self.data
                    .as_ref()
                    .filter(|_| nested.is_none())
                    .and_then(typed::<Ticket>)
            });

        let nested_status: Option<StatusInfo> = nested
            .and_then(|data| data.get("statusInfo"))
            .and_then(typed::<StatusInfo>);

        let attendee = self
            .attendee
            .as_ref()
            .and_then(typed::<Attendee>)
            .or_else(|| nested.and_then(|data| data.get("attendee")).and_then(typed::<Attendee>))
            .or_else(|| ticket.as_ref().and_then(|t| t.attendee.clone()));

        let can_be_used = self
            .status_info
            .as_ref()
            .and_then(|info| info.can_be_used)
            .or(self.can_be_used)
            .or_else(|| nested_status.as_ref().and_then(|info| info.can_be_used))
            .or_else(|| {
                nested
                    .and_then(|data| data.get("canBeUsed"))
                    .and_then(Value::as_bool)
            });

        let status_message = self
            .status_info
            .and_then(|info| info.message)
            .or_else(|| nested_status.and_then(|info| info.message))
            .and_then(|message| non_blank(Some(message)));

        VerificationDetails {
            ticket,
            attendee,
            can_be_used,
            status_message,
        }
    }
}

fn typed<T: DeserializeOwned>(value: &Value) -> Option<T> {
    serde_json::from_value(value.clone()).ok()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
