pub mod admin;
pub mod auth;
pub mod events;
pub mod logging;
pub mod tickets;

use crate::config::{ENV_API_URL, ENV_SCAN_INTERVAL_MS, ENV_SESSION_FILE};
use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_SESSION_FILE: &str = "session-file";
pub const ARG_SCAN_INTERVAL_MS: &str = "scan-interval-ms";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("ticketdesk")
        .about("Ticketing and exhibition desk")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_API_URL)
                .long("api-url")
                .help("Backend API base URL, example: https://tickets.tld/api")
                .env(ENV_API_URL)
                .global(true),
        )
        .arg(
            Arg::new(ARG_SESSION_FILE)
                .long("session-file")
                .help("Where the signed-in session is kept (default: ~/.ticketdesk/session.json)")
                .env(ENV_SESSION_FILE)
                .global(true),
        )
        .arg(
            Arg::new(ARG_SCAN_INTERVAL_MS)
                .long("scan-interval-ms")
                .help("Scanner poll interval in milliseconds")
                .env(ENV_SCAN_INTERVAL_MS)
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..)),
        );

    let command = auth::with_subcommands(command);
    let command = tickets::with_subcommands(command);
    let command = events::with_subcommands(command);
    let command = admin::with_subcommands(command);
    logging::with_args(command)
}
