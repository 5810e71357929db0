use crate::{
    cli::{
        actions::{views, Desk},
        globals::GlobalArgs,
    },
    features::tickets::client,
    navigation::Route,
};
use anyhow::Result;

#[derive(Debug)]
pub enum Op {
    Show { id: String },
    Transfer { id: String, recipient: String },
    Cancel { id: String },
}

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub op: Op,
}

/// Execute a ticket action.
///
/// # Errors
/// Returns an error when the client cannot be configured.
pub async fn execute(args: Args) -> Result<()> {
    let desk = Desk::open(&args.globals).await?;
    let id = match &args.op {
        Op::Show { id } | Op::Transfer { id, .. } | Op::Cancel { id } => id.clone(),
    };
    if !desk.enter(&Route::Ticket(id.clone())) {
        return Ok(());
    }

    let api = desk.api();
    match args.op {
        Op::Show { .. } => match client::get_ticket(api, &id).await {
            Ok(ticket) => views::ticket(&ticket),
            Err(err) => views::failure(&err.user_message()),
        },
        Op::Transfer { recipient, .. } => {
            match client::transfer_ticket(api, &id, &recipient).await {
                Ok(response) => {
                    views::notice(
                        response
                            .message
                            .as_deref()
                            .unwrap_or("Transfer requested."),
                    );
                    if let Some(ticket) = response.ticket {
                        views::ticket(&ticket);
                    }
                }
                Err(err) => views::failure(&err.user_message()),
            }
        }
        Op::Cancel { .. } => match client::cancel_ticket(api, &id).await {
            Ok(response) => {
                views::notice(
                    response
                        .message
                        .as_deref()
                        .unwrap_or("Cancellation requested."),
                );
                if let Some(ticket) = response.ticket {
                    views::ticket(&ticket);
                }
            }
            Err(err) => views::failure(&err.user_message()),
        },
    }

    Ok(())
}
