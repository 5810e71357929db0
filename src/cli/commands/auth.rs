use clap::{Arg, Command};

pub const CMD_LOGIN: &str = "login";
pub const CMD_REGISTER: &str = "register";
pub const CMD_OAUTH_URL: &str = "oauth-url";
pub const CMD_OAUTH_CALLBACK: &str = "oauth-callback";
pub const CMD_LOGOUT: &str = "logout";
pub const CMD_WHOAMI: &str = "whoami";

pub const ARG_NAME: &str = "name";
pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_CONFIRM_PASSWORD: &str = "confirm-password";
pub const ARG_PROVIDER: &str = "provider";
pub const ARG_LOCATION: &str = "location";

fn email_arg() -> Arg {
    Arg::new(ARG_EMAIL)
        .short('e')
        .long("email")
        .help("Account email")
        .env("TICKETDESK_EMAIL")
        .required(true)
}

fn password_arg() -> Arg {
    Arg::new(ARG_PASSWORD)
        .long("password")
        .help("Account password")
        .env("TICKETDESK_PASSWORD")
        .hide_env_values(true)
        .required(true)
}

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(
            Command::new(CMD_LOGIN)
                .about("Sign in with email and password")
                .arg(email_arg())
                .arg(password_arg()),
        )
        .subcommand(
            Command::new(CMD_REGISTER)
                .about("Create a customer account")
                .arg(
                    Arg::new(ARG_NAME)
                        .short('n')
                        .long("name")
                        .help("Display name")
                        .required(true),
                )
                .arg(email_arg())
                .arg(password_arg())
                .arg(
                    Arg::new(ARG_CONFIRM_PASSWORD)
                        .long("confirm-password")
                        .help("Password confirmation")
                        .env("TICKETDESK_CONFIRM_PASSWORD")
                        .hide_env_values(true)
                        .required(true),
                ),
        )
        .subcommand(
            Command::new(CMD_OAUTH_URL)
                .about("Print the URL that starts an external sign-in")
                .arg(
                    Arg::new(ARG_PROVIDER)
                        .help("Sign-in provider")
                        .default_value("google"),
                ),
        )
        .subcommand(
            Command::new(CMD_OAUTH_CALLBACK)
                .about("Complete an external sign-in")
                .arg(
                    Arg::new(ARG_LOCATION)
                        .help("Callback URL containing ?token=, or the bare token")
                        .required(true),
                ),
        )
        .subcommand(Command::new(CMD_LOGOUT).about("Sign out and forget the stored session"))
        .subcommand(Command::new(CMD_WHOAMI).about("Show the signed-in account"))
}
