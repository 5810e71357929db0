use clap::{Arg, Command};

pub const CMD_ADMIN: &str = "admin";
pub const CMD_STATS: &str = "stats";
pub const CMD_USERS: &str = "users";
pub const CMD_LIST: &str = "list";
pub const CMD_SHOW: &str = "show";
pub const CMD_CREATE: &str = "create";
pub const CMD_UPDATE: &str = "update";
pub const CMD_DELETE: &str = "delete";

pub const ARG_ID: &str = "id";
pub const ARG_NAME: &str = "name";
pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_ROLE: &str = "role";
pub const ARG_STATUS: &str = "status";

const ROLES: [&str; 3] = ["user", "staff", "admin"];
const STATUSES: [&str; 2] = ["active", "suspended"];

fn id_arg() -> Arg {
    Arg::new(ARG_ID).help("User id").required(true)
}

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command.subcommand(
        Command::new(CMD_ADMIN)
            .about("Administration (admin accounts only)")
            .subcommand_required(true)
            .subcommand(Command::new(CMD_STATS).about("Show dashboard counters"))
            .subcommand(
                Command::new(CMD_USERS)
                    .about("Manage user accounts")
                    .subcommand_required(true)
                    .subcommand(Command::new(CMD_LIST).about("List users"))
                    .subcommand(Command::new(CMD_SHOW).about("Show a user").arg(id_arg()))
                    .subcommand(
                        Command::new(CMD_CREATE)
                            .about("Create a user")
                            .arg(Arg::new(ARG_NAME).long("name").required(true))
                            .arg(Arg::new(ARG_EMAIL).long("email").required(true))
                            .arg(
                                Arg::new(ARG_PASSWORD)
                                    .long("password")
                                    .env("TICKETDESK_NEW_USER_PASSWORD")
                                    .hide_env_values(true)
                                    .required(true),
                            )
                            .arg(
                                Arg::new(ARG_ROLE)
                                    .long("role")
                                    .value_parser(ROLES)
                                    .default_value("user"),
                            ),
                    )
                    .subcommand(
                        Command::new(CMD_UPDATE)
                            .about("Update a user")
                            .arg(id_arg())
                            .arg(Arg::new(ARG_NAME).long("name"))
                            .arg(Arg::new(ARG_EMAIL).long("email"))
                            .arg(Arg::new(ARG_ROLE).long("role").value_parser(ROLES))
                            .arg(Arg::new(ARG_STATUS).long("status").value_parser(STATUSES)),
                    )
                    .subcommand(Command::new(CMD_DELETE).about("Delete a user").arg(id_arg())),
            ),
    )
}
