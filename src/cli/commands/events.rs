use clap::{Arg, Command};

pub const CMD_EVENT: &str = "event";
pub const CMD_EXHIBITIONS: &str = "exhibitions";
pub const CMD_SHOW: &str = "show";
pub const CMD_LIST: &str = "list";

pub const ARG_ID: &str = "id";

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(
            Command::new(CMD_EVENT)
                .about("Browse events")
                .subcommand_required(true)
                .subcommand(
                    Command::new(CMD_SHOW)
                        .about("Show event details")
                        .arg(Arg::new(ARG_ID).help("Event id").required(true)),
                ),
        )
        .subcommand(
            Command::new(CMD_EXHIBITIONS)
                .about("Browse exhibitions")
                .subcommand_required(true)
                .subcommand(Command::new(CMD_LIST).about("List published exhibitions"))
                .subcommand(
                    Command::new(CMD_SHOW)
                        .about("Show exhibition details")
                        .arg(Arg::new(ARG_ID).help("Exhibition id").required(true)),
                ),
        )
}
