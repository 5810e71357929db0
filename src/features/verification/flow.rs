//! Verification state machine. The flow owns no I/O except the optional
//! ticket refresh; the driver feeds it scanner events and network results.

use crate::{
    api::ApiClient,
    errors::AppError,
    features::{
        auth::has_role,
        tickets::{client as tickets, Ticket},
        users::User,
        verification::types::{
            VerificationDetails, VerificationResult, VerifyRequest, VerifyResponse,
            VERIFICATION_FAILED,
        },
    },
    navigation::Route,
};
use tracing::{debug, info, warn};

#[derive(Clone, Debug, Default, PartialEq)]
pub enum FlowState {
    #[default]
    Idle,
    Scanning,
    Verifying(VerifyRequest),
    Resolved(VerificationResult),
    AccessDenied,
}

/// User-visible feedback for verification outcomes.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn failure(&self, message: &str);

    /// Called after every resolution with the full result.
    fn resolved(&self, _result: &VerificationResult) {}

    fn scan_error(&self, message: &str) {
        warn!("Scanner error: {message}");
    }
}

/// Notifier that only logs.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        info!("{message}");
    }

    fn failure(&self, message: &str) {
        warn!("{message}");
    }
}

#[derive(Clone, Debug, Default)]
pub struct VerificationFlow {
    state: FlowState,
    event_id: Option<String>,
}

impl VerificationFlow {
    #[must_use]
    pub fn new(event_id: Option<&str>) -> Self {
        Self {
            state: FlowState::Idle,
            event_id: event_id
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &FlowState {
        &self.state
    }

    #[must_use]
    pub fn event_id(&self) -> Option<&str> {
        self.event_id.as_deref()
    }

    #[must_use]
    pub const fn result(&self) -> Option<&VerificationResult> {
        match &self.state {
            FlowState::Resolved(result) => Some(result),
            _ => None,
        }
    }

    /// Whether a decoded payload would currently start a verification.
    #[must_use]
    pub const fn accepts_scans(&self) -> bool {
        matches!(self.state, FlowState::Scanning | FlowState::Resolved(_))
    }

    /// Enables scanning for staff and admin sessions.
    ///
    /// # Errors
    /// Returns `AppError::AccessDenied` for any other session; the flow then
    /// stays denied and never issues a verification call.
    pub fn start(&mut self, user: Option<&User>) -> Result<(), AppError> {
        if !has_role(user, Route::Scan.required_roles()) {
            self.state = FlowState::AccessDenied;
            return Err(AppError::AccessDenied(
                "Ticket scanning requires a staff or admin account.".to_string(),
            ));
        }
        if matches!(self.state, FlowState::Idle | FlowState::AccessDenied) {
            self.state = FlowState::Scanning;
        }
        Ok(())
    }

    /// Moves to `Verifying` and returns the request to send, or `None` when
    /// the payload is blank or a verification is already outstanding.
    pub fn on_decoded(&mut self, payload: &str) -> Option<VerifyRequest> {
        if !self.accepts_scans() {
            debug!(state = ?self.state, "decode ignored");
            return None;
        }
        let request = VerifyRequest::from_payload(payload, self.event_id.as_deref())?;
        self.state = FlowState::Verifying(request.clone());
        Some(request)
    }

    /// Resolves the outstanding verification and notifies the user. Results
    /// arriving outside `Verifying` are dropped.
    ///
    /// A rejected credential ends the flow: the session is already gone, so
    /// the flow returns to `Idle` and accepts no further scans until it is
    /// started again.
    pub fn on_verified(
        &mut self,
        outcome: Result<VerifyResponse, AppError>,
        notifier: &dyn Notifier,
    ) -> Option<&VerificationResult> {
        if !matches!(self.state, FlowState::Verifying(_)) {
            debug!(state = ?self.state, "verification result ignored");
            return None;
        }

        if let Err(AppError::Unauthorized(message)) = &outcome {
            info!("Session ended during verification");
            notifier.failure(message);
            self.state = FlowState::Idle;
            return None;
        }

        let result = match outcome {
            Ok(response) => response.into_result(),
            Err(err) => {
                let message = err.user_message();
                VerificationResult::Error {
                    message: if message.trim().is_empty() {
                        VERIFICATION_FAILED.to_string()
                    } else {
                        message
                    },
                }
            }
        };

        if result.is_success() {
            notifier.success(result.message());
        } else {
            notifier.failure(result.message());
        }
        notifier.resolved(&result);

        self.state = FlowState::Resolved(result);
        self.result()
    }

    /// Re-fetches the ticket after the backend has consumed it and replaces
    /// the displayed copy. The status shown is whatever the backend returns.
    ///
    /// # Errors
    /// Returns the gateway error when the refresh fails; the displayed result
    /// is left unchanged.
    pub async fn mark_as_used(&mut self, api: &ApiClient, ticket_id: &str) -> Result<Ticket, AppError> {
        let ticket = tickets::get_ticket(api, ticket_id).await?;

        if let FlowState::Resolved(VerificationResult::Success { details, .. }) = &mut self.state {
            details.ticket = Some(ticket.clone());
        } else {
            self.state = FlowState::Resolved(VerificationResult::Success {
                message: format!("Ticket {} is {}", ticket.ticket_number, ticket.status),
                details: VerificationDetails {
                    attendee: ticket.attendee.clone(),
                    ticket: Some(ticket.clone()),
                    ..VerificationDetails::default()
                },
            });
        }

        Ok(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::users::{Role, UserStatus};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<(bool, String)>>,
    }

    impl Notifier for Recorder {
        fn success(&self, message: &str) {
            self.events
                .lock()
                .expect("lock")
                .push((true, message.to_string()));
        }

        fn failure(&self, message: &str) {
            self.events
                .lock()
                .expect("lock")
                .push((false, message.to_string()));
        }
    }

    fn user(role: Role) -> User {
        User {
            id: "1".into(),
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            role,
            status: UserStatus::Active,
            profile_image: None,
        }
    }

    fn scanning_flow() -> VerificationFlow {
        let mut flow = VerificationFlow::new(Some("E1"));
        flow.start(Some(&user(Role::Staff))).expect("staff may scan");
        flow
    }

    #[test]
    fn start_requires_staff_or_admin() {
        let mut flow = VerificationFlow::new(Some("E1"));
        assert!(matches!(
            flow.start(Some(&user(Role::User))),
            Err(AppError::AccessDenied(_))
        ));
        assert_eq!(flow.state(), &FlowState::AccessDenied);
        assert_eq!(flow.on_decoded("TICKET-123"), None);

        let mut anonymous = VerificationFlow::new(None);
        assert!(anonymous.start(None).is_err());

        let mut admin = VerificationFlow::new(None);
        assert!(admin.start(Some(&user(Role::Admin))).is_ok());
        assert_eq!(admin.state(), &FlowState::Scanning);
    }

    #[test]
    fn decode_moves_to_verifying_and_blocks_further_decodes() {
        let mut flow = scanning_flow();
        let request = flow.on_decoded("TICKET-123").expect("request");
        assert_eq!(request.ticket_number, "TICKET-123");
        assert_eq!(request.event_id.as_deref(), Some("E1"));
        assert!(matches!(flow.state(), FlowState::Verifying(_)));
        assert_eq!(flow.on_decoded("TICKET-456"), None);
    }

    #[test]
    fn blank_decode_is_ignored() {
        let mut flow = scanning_flow();
        assert_eq!(flow.on_decoded("  "), None);
        assert_eq!(flow.state(), &FlowState::Scanning);
    }

    #[test]
    fn error_response_resolves_to_error_and_reenables_scanning() {
        let notifier = Recorder::default();
        let mut flow = scanning_flow();
        flow.on_decoded("TICKET-123");

        let response: VerifyResponse =
            serde_json::from_str(r#"{"status":"error","message":"Ticket already used"}"#)
                .expect("Failed to deserialize");
        let result = flow.on_verified(Ok(response), &notifier).cloned();

        assert_eq!(
            result,
            Some(VerificationResult::Error {
                message: "Ticket already used".to_string()
            })
        );
        assert!(flow.accepts_scans());
        assert_eq!(
            *notifier.events.lock().expect("lock"),
            vec![(false, "Ticket already used".to_string())]
        );
        assert!(flow.on_decoded("TICKET-456").is_some());
    }

    #[test]
    fn rejected_credential_ends_the_flow() {
        let notifier = Recorder::default();
        let mut flow = scanning_flow();
        flow.on_decoded("TICKET-123");

        let result = flow.on_verified(
            Err(AppError::Unauthorized("jwt expired".to_string())),
            &notifier,
        );

        assert_eq!(result, None);
        assert_eq!(flow.state(), &FlowState::Idle);
        assert!(!flow.accepts_scans());
        assert_eq!(flow.on_decoded("TICKET-456"), None);
        assert_eq!(
            *notifier.events.lock().expect("lock"),
            vec![(false, "jwt expired".to_string())]
        );
    }

    #[test]
    fn http_error_uses_server_message() {
        let notifier = Recorder::default();
        let mut flow = scanning_flow();
        flow.on_decoded("TICKET-404");

        let result = flow.on_verified(
            Err(AppError::Http {
                status: 404,
                message: "Ticket not found".to_string(),
            }),
            &notifier,
        );
        assert_eq!(result.map(VerificationResult::message), Some("Ticket not found"));
    }

    #[test]
    fn success_response_notifies_success() {
        let notifier = Recorder::default();
        let mut flow = scanning_flow();
        flow.on_decoded("TICKET-1");

        let response: VerifyResponse = serde_json::from_str(
            r#"{"valid":true,"ticket":{"id":"t1","ticketNumber":"TICKET-1","status":"valid"}}"#,
        )
        .expect("Failed to deserialize");
        let result = flow.on_verified(Ok(response), &notifier).cloned();

        assert!(result.as_ref().is_some_and(VerificationResult::is_success));
        assert!(notifier.events.lock().expect("lock")[0].0);
    }

    #[test]
    fn results_outside_verifying_are_dropped() {
        let notifier = Recorder::default();
        let mut flow = scanning_flow();
        assert!(flow
            .on_verified(Ok(VerifyResponse::default()), &notifier)
            .is_none());
        assert!(notifier.events.lock().expect("lock").is_empty());
    }
}
