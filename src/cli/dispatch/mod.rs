//! Maps validated CLI matches to an executable action.

use crate::{
    cli::{
        actions::{admin, auth, events, scan, tickets, Action},
        commands::{
            admin as admin_cmd, auth as auth_cmd, events as events_cmd, tickets as tickets_cmd,
        },
        globals::GlobalArgs,
    },
    features::{
        admin::{NewUser, UserUpdate},
        auth::RegistrationForm,
        users::{Role, UserStatus},
    },
};
use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;

fn required(matches: &ArgMatches, id: &str) -> Result<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .with_context(|| format!("missing required argument: {id}"))
}

fn optional(matches: &ArgMatches, id: &str) -> Option<String> {
    matches.get_one::<String>(id).cloned()
}

fn unknown(name: Option<&str>) -> anyhow::Error {
    anyhow!("unknown command: {}", name.unwrap_or("<none>"))
}

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if the configuration is unusable or arguments are missing.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let globals = GlobalArgs::from_matches(matches)?;

    let action = match matches.subcommand() {
        Some((auth_cmd::CMD_LOGIN, sub)) => Action::Auth(auth::Args {
            globals,
            op: auth::Op::Login {
                email: required(sub, auth_cmd::ARG_EMAIL)?,
                password: SecretString::from(required(sub, auth_cmd::ARG_PASSWORD)?),
            },
        }),
        Some((auth_cmd::CMD_REGISTER, sub)) => Action::Auth(auth::Args {
            globals,
            op: auth::Op::Register(RegistrationForm {
                name: required(sub, auth_cmd::ARG_NAME)?,
                email: required(sub, auth_cmd::ARG_EMAIL)?,
                password: required(sub, auth_cmd::ARG_PASSWORD)?,
                confirm_password: required(sub, auth_cmd::ARG_CONFIRM_PASSWORD)?,
            }),
        }),
        Some((auth_cmd::CMD_OAUTH_URL, sub)) => Action::Auth(auth::Args {
            globals,
            op: auth::Op::OAuthUrl {
                provider: required(sub, auth_cmd::ARG_PROVIDER)?,
            },
        }),
        Some((auth_cmd::CMD_OAUTH_CALLBACK, sub)) => Action::Auth(auth::Args {
            globals,
            op: auth::Op::OAuthCallback {
                location: required(sub, auth_cmd::ARG_LOCATION)?,
            },
        }),
        Some((auth_cmd::CMD_LOGOUT, _)) => Action::Auth(auth::Args {
            globals,
            op: auth::Op::Logout,
        }),
        Some((auth_cmd::CMD_WHOAMI, _)) => Action::Auth(auth::Args {
            globals,
            op: auth::Op::WhoAmI,
        }),
        Some((tickets_cmd::CMD_SCAN, sub)) => Action::Scan(scan::Args {
            globals,
            event: required(sub, tickets_cmd::ARG_EVENT)?,
        }),
        Some((tickets_cmd::CMD_VERIFY, sub)) => Action::Verify(scan::VerifyArgs {
            globals,
            ticket: required(sub, tickets_cmd::ARG_TICKET)?,
            event: required(sub, tickets_cmd::ARG_EVENT)?,
            refresh: sub.get_flag(tickets_cmd::ARG_REFRESH),
        }),
        Some((tickets_cmd::CMD_TICKET, sub)) => Action::Tickets(tickets::Args {
            globals,
            op: ticket_op(sub)?,
        }),
        Some((events_cmd::CMD_EVENT, sub)) => match sub.subcommand() {
            Some((events_cmd::CMD_SHOW, show)) => Action::Events(events::Args {
                globals,
                op: events::Op::ShowEvent {
                    id: required(show, events_cmd::ARG_ID)?,
                },
            }),
            other => return Err(unknown(other.map(|(name, _)| name))),
        },
        Some((events_cmd::CMD_EXHIBITIONS, sub)) => Action::Events(events::Args {
            globals,
            op: match sub.subcommand() {
                Some((events_cmd::CMD_LIST, _)) => events::Op::ListExhibitions,
                Some((events_cmd::CMD_SHOW, show)) => events::Op::ShowExhibition {
                    id: required(show, events_cmd::ARG_ID)?,
                },
                other => return Err(unknown(other.map(|(name, _)| name))),
            },
        }),
        Some((admin_cmd::CMD_ADMIN, sub)) => Action::Admin(admin::Args {
            globals,
            op: admin_op(sub)?,
        }),
        other => return Err(unknown(other.map(|(name, _)| name))),
    };

    Ok(action)
}

fn ticket_op(matches: &ArgMatches) -> Result<tickets::Op> {
    match matches.subcommand() {
        Some((tickets_cmd::CMD_SHOW, sub)) => Ok(tickets::Op::Show {
            id: required(sub, tickets_cmd::ARG_ID)?,
        }),
        Some((tickets_cmd::CMD_TRANSFER, sub)) => Ok(tickets::Op::Transfer {
            id: required(sub, tickets_cmd::ARG_ID)?,
            recipient: required(sub, tickets_cmd::ARG_TO)?,
        }),
        Some((tickets_cmd::CMD_CANCEL, sub)) => Ok(tickets::Op::Cancel {
            id: required(sub, tickets_cmd::ARG_ID)?,
        }),
        other => Err(unknown(other.map(|(name, _)| name))),
    }
}

fn admin_op(matches: &ArgMatches) -> Result<admin::Op> {
    match matches.subcommand() {
        Some((admin_cmd::CMD_STATS, _)) => Ok(admin::Op::Stats),
        Some((admin_cmd::CMD_USERS, users)) => match users.subcommand() {
            Some((admin_cmd::CMD_LIST, _)) => Ok(admin::Op::ListUsers),
            Some((admin_cmd::CMD_SHOW, sub)) => Ok(admin::Op::ShowUser {
                id: required(sub, admin_cmd::ARG_ID)?,
            }),
            Some((admin_cmd::CMD_CREATE, sub)) => Ok(admin::Op::CreateUser(NewUser {
                name: required(sub, admin_cmd::ARG_NAME)?,
                email: required(sub, admin_cmd::ARG_EMAIL)?,
                password: required(sub, admin_cmd::ARG_PASSWORD)?,
                role: Role::from(required(sub, admin_cmd::ARG_ROLE)?),
            })),
            Some((admin_cmd::CMD_UPDATE, sub)) => Ok(admin::Op::UpdateUser {
                id: required(sub, admin_cmd::ARG_ID)?,
                update: UserUpdate {
                    name: optional(sub, admin_cmd::ARG_NAME),
                    email: optional(sub, admin_cmd::ARG_EMAIL),
                    role: optional(sub, admin_cmd::ARG_ROLE).map(Role::from),
                    status: optional(sub, admin_cmd::ARG_STATUS).map(UserStatus::from),
                },
            }),
            Some((admin_cmd::CMD_DELETE, sub)) => Ok(admin::Op::DeleteUser {
                id: required(sub, admin_cmd::ARG_ID)?,
            }),
            other => Err(unknown(other.map(|(name, _)| name))),
        },
        other => Err(unknown(other.map(|(name, _)| name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;
    use secrecy::ExposeSecret;

    fn action(args: &[&str]) -> Action {
        temp_env::with_vars(
            [
                ("TICKETDESK_API_URL", None::<&str>),
                ("TICKETDESK_PASSWORD", None),
                ("TICKETDESK_EVENT_ID", None),
            ],
            || {
                let matches = commands::new().get_matches_from(args.iter().copied());
                handler(&matches).expect("action")
            },
        )
    }

    #[test]
    fn login_keeps_password_secret() {
        let Action::Auth(args) = action(&[
            "ticketdesk",
            "login",
            "--email",
            "a@b.com",
            "--password",
            "secret1",
        ]) else {
            panic!("expected auth action");
        };
        assert!(!format!("{args:?}").contains("secret1"));
        match args.op {
            auth::Op::Login { email, password } => {
                assert_eq!(email, "a@b.com");
                assert_eq!(password.expose_secret(), "secret1");
            }
            other => panic!("unexpected op: {other:?}"),
        }
    }

    #[test]
    fn verify_with_refresh() {
        let Action::Verify(args) = action(&[
            "ticketdesk",
            "verify",
            "TICKET-123",
            "--event",
            "E1",
            "--refresh",
        ]) else {
            panic!("expected verify action");
        };
        assert_eq!(args.ticket, "TICKET-123");
        assert_eq!(args.event, "E1");
        assert!(args.refresh);
    }

    #[test]
    fn admin_update_collects_only_given_fields() {
        let Action::Admin(args) = action(&[
            "ticketdesk",
            "admin",
            "users",
            "update",
            "7",
            "--role",
            "staff",
        ]) else {
            panic!("expected admin action");
        };
        match args.op {
            admin::Op::UpdateUser { id, update } => {
                assert_eq!(id, "7");
                assert_eq!(update.role, Some(Role::Staff));
                assert!(update.name.is_none() && update.status.is_none());
            }
            other => panic!("unexpected op: {other:?}"),
        }
    }

    #[test]
    fn exhibitions_show() {
        let Action::Events(args) = action(&["ticketdesk", "exhibitions", "show", "x1"]) else {
            panic!("expected events action");
        };
        assert!(matches!(args.op, events::Op::ShowExhibition { ref id } if id == "x1"));
    }

    #[test]
    fn invalid_api_url_fails_dispatch() {
        temp_env::with_vars([("TICKETDESK_API_URL", Some("mailto:desk@tld"))], || {
            let matches = commands::new().get_matches_from(vec!["ticketdesk", "whoami"]);
            assert!(handler(&matches).is_err());
        });
    }
}
