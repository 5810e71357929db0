use clap::{Arg, ArgAction, Command};

pub const CMD_SCAN: &str = "scan";
pub const CMD_VERIFY: &str = "verify";
pub const CMD_TICKET: &str = "ticket";
pub const CMD_SHOW: &str = "show";
pub const CMD_TRANSFER: &str = "transfer";
pub const CMD_CANCEL: &str = "cancel";

pub const ARG_EVENT: &str = "event";
pub const ARG_TICKET: &str = "ticket";
pub const ARG_REFRESH: &str = "refresh";
pub const ARG_ID: &str = "id";
pub const ARG_TO: &str = "to";

fn event_arg() -> Arg {
    Arg::new(ARG_EVENT)
        .long("event")
        .help("Event the tickets are checked against")
        .env("TICKETDESK_EVENT_ID")
        .required(true)
}

fn id_arg() -> Arg {
    Arg::new(ARG_ID).help("Ticket id").required(true)
}

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(
            Command::new(CMD_SCAN)
                .about("Verify tickets read from a scanner on stdin, one payload per line")
                .arg(event_arg()),
        )
        .subcommand(
            Command::new(CMD_VERIFY)
                .about("Verify a single ticket number or QR payload")
                .arg(Arg::new(ARG_TICKET).help("Ticket number or QR payload").required(true))
                .arg(event_arg())
                .arg(
                    Arg::new(ARG_REFRESH)
                        .long("refresh")
                        .help("Re-fetch the ticket after a successful verification")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new(CMD_TICKET)
                .about("Inspect and manage your tickets")
                .subcommand_required(true)
                .subcommand(Command::new(CMD_SHOW).about("Show a ticket").arg(id_arg()))
                .subcommand(
                    Command::new(CMD_TRANSFER)
                        .about("Transfer a ticket to another account")
                        .arg(id_arg())
                        .arg(
                            Arg::new(ARG_TO)
                                .long("to")
                                .help("Recipient email")
                                .required(true),
                        ),
                )
                .subcommand(Command::new(CMD_CANCEL).about("Cancel a ticket").arg(id_arg())),
        )
}
