#![allow(clippy::unwrap_used, clippy::expect_used)]

mod support;

use serde_json::json;
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use support::{sign_in, Desk, MockBackend};
use ticketdesk::{
    features::{
        tickets::TicketStatus,
        verification::{
            client, run_scan_loop, FlowState, Notifier, VerificationFlow, VerificationResult,
        },
    },
    navigation::Route,
    scanner::{LineSource, ScanEvent, Scanner},
    session::MemoryStorage,
};
use tokio::sync::mpsc;

#[derive(Clone, Default)]
struct Recorder {
    results: Arc<Mutex<Vec<VerificationResult>>>,
    failures: Arc<Mutex<Vec<String>>>,
}

impl Notifier for Recorder {
    fn success(&self, _message: &str) {}

    fn failure(&self, message: &str) {
        self.failures.lock().expect("lock").push(message.to_string());
    }

    fn resolved(&self, result: &VerificationResult) {
        self.results.lock().expect("lock").push(result.clone());
    }
}

async fn staff_desk(mock: &MockBackend) -> Desk {
    let base = mock.serve().await;
    let desk = Desk::new(&base, MemoryStorage::default());
    sign_in(mock, &desk, "staff").await;
    desk
}

#[tokio::test]
async fn already_used_ticket_resolves_to_error_and_scanning_resumes() {
    let mock = MockBackend::default();
    mock.respond(
        "POST",
        "/tickets/verify",
        400,
        json!({ "status": "error", "message": "Ticket already used" }),
    );
    let desk = staff_desk(&mock).await;
    let notifier = Recorder::default();

    let mut flow = VerificationFlow::new(Some("E1"));
    flow.start(desk.auth.current_user().as_ref())
        .expect("staff may scan");
    let request = flow.on_decoded("TICKET-123").expect("request");
    let outcome = client::verify_ticket(desk.api(), &request).await;
    flow.on_verified(outcome, &notifier);

    assert_eq!(
        flow.result(),
        Some(&VerificationResult::Error {
            message: "Ticket already used".to_string()
        })
    );
    assert!(flow.accepts_scans());
    assert_eq!(
        *notifier.failures.lock().expect("lock"),
        vec!["Ticket already used".to_string()]
    );

    let calls = mock.calls_to("/tickets/verify");
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].body,
        json!({ "ticketNumber": "TICKET-123", "qrData": "TICKET-123", "eventId": "E1" })
    );
    assert_eq!(calls[0].authorization.as_deref(), Some("Bearer staff-token"));
    assert!(desk.auth.session().is_authenticated());
}

#[tokio::test]
async fn ok_status_with_error_body_is_never_success() {
    let mock = MockBackend::default();
    mock.respond("POST", "/tickets/verify", 200, json!({ "valid": false }));
    let desk = staff_desk(&mock).await;

    let mut flow = VerificationFlow::new(Some("E1"));
    flow.start(desk.auth.current_user().as_ref()).expect("start");
    let request = flow.on_decoded("TICKET-7").expect("request");
    flow.on_verified(
        client::verify_ticket(desk.api(), &request).await,
        &Recorder::default(),
    );

    assert_eq!(
        flow.result().map(VerificationResult::message),
        Some("Ticket verification failed")
    );
}

#[tokio::test]
async fn scan_loop_verifies_each_payload_from_the_scanner() {
    let mock = MockBackend::default();
    mock.respond(
        "POST",
        "/tickets/verify",
        200,
        json!({
            "valid": true,
            "message": "Welcome",
            "ticket": { "id": "t1", "ticketNumber": "TICKET-1", "status": "valid" },
            "attendee": { "name": "Ada" },
            "statusInfo": { "canBeUsed": true }
        }),
    );
    let desk = staff_desk(&mock).await;
    let notifier = Recorder::default();

    let mut flow = VerificationFlow::new(Some("E1"));
    flow.start(desk.auth.current_user().as_ref()).expect("start");

    let input: &[u8] = b"TICKET-1\n\nTICKET-1\n";
    let mut scanner = Scanner::spawn(LineSource::new(input), Duration::from_millis(5));
    run_scan_loop(&mut flow, scanner.events(), desk.api(), &notifier).await;

    let results = notifier.results.lock().expect("lock").clone();
    assert!(!results.is_empty());
    assert!(results.iter().all(VerificationResult::is_success));
    let details = results[0].details().expect("details");
    assert_eq!(details.can_be_used, Some(true));
    assert_eq!(details.attendee.as_ref().and_then(|a| a.name.as_deref()), Some("Ada"));
    assert_eq!(mock.calls_to("/tickets/verify").len(), results.len());
    assert!(matches!(flow.state(), FlowState::Resolved(_)));
}

#[tokio::test]
async fn decodes_while_verifying_are_dropped() {
    let mock = MockBackend::default();
    mock.respond("POST", "/tickets/verify", 200, json!({ "valid": true }));
    let desk = staff_desk(&mock).await;
    let notifier = Recorder::default();

    let mut flow = VerificationFlow::new(Some("E1"));
    flow.start(desk.auth.current_user().as_ref()).expect("start");

    let (tx, mut rx) = mpsc::channel(8);
    for payload in ["A-1", "A-2", "A-3"] {
        tx.send(ScanEvent::Decoded(payload.to_string()))
            .await
            .expect("send");
    }
    drop(tx);

    run_scan_loop(&mut flow, &mut rx, desk.api(), &notifier).await;

    let calls = mock.calls_to("/tickets/verify");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].body["ticketNumber"], "A-1");
    assert_eq!(notifier.results.lock().expect("lock").len(), calls.len());
}

#[tokio::test]
async fn rejected_session_stops_the_scan_loop() {
    let mock = MockBackend::default();
    mock.respond(
        "POST",
        "/tickets/verify",
        401,
        json!({ "message": "jwt expired" }),
    );
    let desk = staff_desk(&mock).await;
    let notifier = Recorder::default();

    let mut flow = VerificationFlow::new(Some("E1"));
    flow.start(desk.auth.current_user().as_ref()).expect("start");

    let (tx, mut rx) = mpsc::channel(4);
    let feed = async move {
        tx.send(ScanEvent::Decoded("T-1".to_string()))
            .await
            .expect("send");
        tokio::time::sleep(Duration::from_millis(300)).await;
        // The loop may already be gone; a closed channel is fine here.
        let _ = tx.send(ScanEvent::Decoded("T-2".to_string())).await;
    };
    tokio::join!(
        run_scan_loop(&mut flow, &mut rx, desk.api(), &notifier),
        feed
    );

    let calls = mock.calls_to("/tickets/verify");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].authorization.as_deref(), Some("Bearer staff-token"));
    assert_eq!(flow.state(), &FlowState::Idle);
    assert!(!flow.accepts_scans());
    assert!(!desk.auth.session().is_authenticated());
    assert_eq!(desk.location(), Some(Route::Login));
    assert_eq!(
        *notifier.failures.lock().expect("lock"),
        vec!["jwt expired".to_string()]
    );
}

#[tokio::test]
async fn non_staff_session_is_denied_without_calls() {
    let mock = MockBackend::default();
    let base = mock.serve().await;
    let desk = Desk::new(&base, MemoryStorage::default());
    sign_in(&mock, &desk, "user").await;
    let notifier = Recorder::default();

    let mut flow = VerificationFlow::new(Some("E1"));
    assert!(flow.start(desk.auth.current_user().as_ref()).is_err());
    assert_eq!(flow.state(), &FlowState::AccessDenied);

    let (tx, mut rx) = mpsc::channel(2);
    tx.send(ScanEvent::Decoded("TICKET-123".to_string()))
        .await
        .expect("send");
    drop(tx);
    run_scan_loop(&mut flow, &mut rx, desk.api(), &notifier).await;

    assert!(mock.calls_to("/tickets/verify").is_empty());
    assert!(notifier.results.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn mark_as_used_refreshes_the_displayed_ticket() {
    let mock = MockBackend::default();
    mock.respond(
        "POST",
        "/tickets/verify",
        200,
        json!({ "data": { "ticket": { "id": "t1", "ticketNumber": "TICKET-1", "status": "valid" } } }),
    );
    mock.respond(
        "GET",
        "/tickets/t1",
        200,
        json!({ "ticket": { "id": "t1", "ticketNumber": "TICKET-1", "status": "used" } }),
    );
    let desk = staff_desk(&mock).await;

    let mut flow = VerificationFlow::new(Some("E1"));
    flow.start(desk.auth.current_user().as_ref()).expect("start");
    let request = flow.on_decoded("TICKET-1").expect("request");
    flow.on_verified(
        client::verify_ticket(desk.api(), &request).await,
        &Recorder::default(),
    );

    let ticket = flow.mark_as_used(desk.api(), "t1").await.expect("refresh");

    assert_eq!(ticket.status, TicketStatus::Used);
    let shown = flow
        .result()
        .and_then(VerificationResult::details)
        .and_then(|d| d.ticket.clone())
        .expect("ticket shown");
    assert_eq!(shown.status, TicketStatus::Used);
    assert_eq!(mock.calls_to("/tickets/t1").len(), 1);
}
