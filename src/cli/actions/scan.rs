use crate::{
    cli::{
        actions::{views, Desk},
        globals::GlobalArgs,
    },
    features::verification::{
        client, run_scan_loop, Notifier, VerificationFlow, VerificationResult,
    },
    navigation::Route,
    scanner::{LineSource, Scanner},
};
use anyhow::Result;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub event: String,
}

#[derive(Debug)]
pub struct VerifyArgs {
    pub globals: GlobalArgs,
    pub ticket: String,
    pub event: String,
    pub refresh: bool,
}

/// Prints each verdict as it resolves.
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn success(&self, message: &str) {
        info!("verified: {message}");
    }

    fn failure(&self, message: &str) {
        info!("rejected: {message}");
    }

    fn resolved(&self, result: &VerificationResult) {
        views::verification(result);
    }

    fn scan_error(&self, message: &str) {
        views::failure(message);
    }
}

/// Opens the desk and a flow for `event`, or explains why scanning is not
/// available to this session.
async fn open_flow(globals: &GlobalArgs, event: &str) -> Result<Option<(Desk, VerificationFlow)>> {
    let desk = Desk::open(globals).await?;
    if !desk.enter(&Route::Scan) {
        return Ok(None);
    }

    let mut flow = VerificationFlow::new(Some(event));
    if let Err(err) = flow.start(desk.auth().current_user().as_ref()) {
        views::failure(&err.user_message());
        return Ok(None);
    }
    Ok(Some((desk, flow)))
}

/// Continuous scanning from stdin until end of input.
///
/// # Errors
/// Returns an error when the client cannot be configured.
pub async fn execute(args: Args) -> Result<()> {
    let Some((desk, mut flow)) = open_flow(&args.globals, &args.event).await? else {
        return Ok(());
    };

    views::notice("Scanner ready. Present tickets, end input to finish.");
    let mut scanner = Scanner::spawn(LineSource::stdin(), args.globals.config.scan_interval);
    run_scan_loop(&mut flow, scanner.events(), desk.api(), &TerminalNotifier).await;
    scanner.stop();

    if desk.location() == Some(Route::Login) {
        views::notice("Session expired. Run `ticketdesk login` to sign in again.");
    }

    Ok(())
}

/// One-shot verification, optionally followed by a ticket refresh.
///
/// # Errors
/// Returns an error when the client cannot be configured.
pub async fn verify(args: VerifyArgs) -> Result<()> {
    let Some((desk, mut flow)) = open_flow(&args.globals, &args.event).await? else {
        return Ok(());
    };

    let Some(request) = flow.on_decoded(&args.ticket) else {
        views::failure("Ticket number is required.");
        return Ok(());
    };

    let outcome = client::verify_ticket(desk.api(), &request).await;
    flow.on_verified(outcome, &TerminalNotifier);

    if args.refresh {
        let ticket_id = flow
            .result()
            .and_then(VerificationResult::details)
            .and_then(|details| details.ticket.as_ref())
            .map(|ticket| ticket.id.to_string());

        if let Some(id) = ticket_id {
            match flow.mark_as_used(desk.api(), &id).await {
                Ok(ticket) => {
                    views::notice("Refreshed:");
                    views::ticket(&ticket);
                }
                Err(err) => views::failure(&err.user_message()),
            }
        }
    }

    Ok(())
}
