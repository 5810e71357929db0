//! Drives a `VerificationFlow` from scanner events. At most one verification
//! call is outstanding; decodes arriving meanwhile are dropped by the flow.

use crate::{
    api::ApiClient,
    errors::AppError,
    features::verification::{
        client,
        flow::{Notifier, VerificationFlow},
        types::VerifyResponse,
    },
    scanner::ScanEvent,
};
use std::{future::Future, pin::Pin};
use tokio::sync::mpsc;
use tracing::{debug, instrument};

type InFlight<'a> = Pin<Box<dyn Future<Output = Result<VerifyResponse, AppError>> + Send + 'a>>;

/// Runs until the event stream ends and any outstanding verification has
/// resolved, or until a resolution leaves the flow unable to scan (the
/// session was rejected).
#[instrument(skip_all, fields(event = flow.event_id()))]
pub async fn run_scan_loop(
    flow: &mut VerificationFlow,
    events: &mut mpsc::Receiver<ScanEvent>,
    api: &ApiClient,
    notifier: &dyn Notifier,
) {
    let mut in_flight: Option<InFlight<'_>> = None;
    let mut closed = false;

    while !(closed && in_flight.is_none()) {
        tokio::select! {
            event = events.recv(), if !closed => match event {
                Some(ScanEvent::Decoded(payload)) => {
                    if let Some(request) = flow.on_decoded(&payload) {
                        debug!(ticket = %request.ticket_number, "verifying");
                        in_flight = Some(Box::pin(async move {
                            client::verify_ticket(api, &request).await
                        }));
                    }
                }
                Some(ScanEvent::Error(message)) => notifier.scan_error(&message),
                None => closed = true,
            },
            outcome = async {
                match in_flight.as_mut() {
                    Some(call) => call.await,
                    None => std::future::pending().await,
                }
            }, if in_flight.is_some() => {
                in_flight = None;
                flow.on_verified(outcome, notifier);
                if !flow.accepts_scans() {
                    debug!(state = ?flow.state(), "scanning stopped");
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::AppConfig,
        features::{
            users::{Role, User, UserStatus},
            verification::flow::FlowState,
        },
        navigation::{History, Route},
        session::{MemoryStorage, SessionStore},
    };
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recorder {
        failures: Mutex<Vec<String>>,
        scan_errors: Mutex<Vec<String>>,
    }

    impl Notifier for Recorder {
        fn success(&self, _message: &str) {}

        fn failure(&self, message: &str) {
            self.failures.lock().expect("lock").push(message.to_string());
        }

        fn scan_error(&self, message: &str) {
            self.scan_errors
                .lock()
                .expect("lock")
                .push(message.to_string());
        }
    }

    fn unreachable_api() -> ApiClient {
        let config = AppConfig {
            // Nothing listens on the discard port; every call fails fast.
            api_base_url: "http://127.0.0.1:9/api".to_string(),
            ..AppConfig::default()
        };
        let session = SessionStore::new(Arc::new(MemoryStorage::default()));
        ApiClient::new(&config, session, Arc::new(History::new(Route::Scan)))
            .expect("Failed to build client")
    }

    #[tokio::test]
    async fn denied_flow_issues_no_calls_and_drains_events() {
        let api = unreachable_api();
        let notifier = Recorder::default();
        let mut flow = VerificationFlow::new(Some("E1"));
        let customer = User {
            id: "2".into(),
            name: "Cy".to_string(),
            email: "cy@example.com".to_string(),
            role: Role::User,
            status: UserStatus::Active,
            profile_image: None,
        };
        assert!(flow.start(Some(&customer)).is_err());

        let (tx, mut rx) = mpsc::channel(4);
        tx.send(ScanEvent::Decoded("TICKET-123".to_string()))
            .await
            .expect("send");
        tx.send(ScanEvent::Error("camera unavailable".to_string()))
            .await
            .expect("send");
        drop(tx);

        run_scan_loop(&mut flow, &mut rx, &api, &notifier).await;

        assert_eq!(flow.state(), &FlowState::AccessDenied);
        assert!(notifier.failures.lock().expect("lock").is_empty());
        assert_eq!(
            *notifier.scan_errors.lock().expect("lock"),
            vec!["camera unavailable".to_string()]
        );
    }

    #[tokio::test]
    async fn transport_failure_resolves_to_error() {
        let api = unreachable_api();
        let notifier = Recorder::default();
        let mut flow = VerificationFlow::new(Some("E1"));
        let staff = User {
            id: "3".into(),
            name: "Sal".to_string(),
            email: "sal@example.com".to_string(),
            role: Role::Staff,
            status: UserStatus::Active,
            profile_image: None,
        };
        flow.start(Some(&staff)).expect("staff may scan");

        let (tx, mut rx) = mpsc::channel(4);
        tx.send(ScanEvent::Decoded("TICKET-123".to_string()))
            .await
            .expect("send");
        drop(tx);

        run_scan_loop(&mut flow, &mut rx, &api, &notifier).await;

        assert!(matches!(flow.state(), FlowState::Resolved(result) if !result.is_success()));
        assert_eq!(notifier.failures.lock().expect("lock").len(), 1);
    }
}
