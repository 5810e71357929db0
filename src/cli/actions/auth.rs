use crate::{
    cli::{
        actions::{views, Desk},
        globals::GlobalArgs,
    },
    features::auth::{token_from_callback_url, AuthOutcome, RegistrationForm},
    navigation::Route,
};
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};

#[derive(Debug)]
pub enum Op {
    Login {
        email: String,
        password: SecretString,
    },
    Register(RegistrationForm),
    OAuthUrl {
        provider: String,
    },
    OAuthCallback {
        location: String,
    },
    Logout,
    WhoAmI,
}

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub op: Op,
}

/// Execute an account action.
///
/// # Errors
/// Returns an error when the client cannot be configured.
pub async fn execute(args: Args) -> Result<()> {
    let desk = Desk::open(&args.globals).await?;
    let auth = desk.auth();

    match args.op {
        Op::Login { email, password } => {
            if !desk.enter(&Route::Login) {
                return Ok(());
            }
            let outcome = auth.login(&email, password.expose_secret()).await;
            report(&desk, &outcome);
        }
        Op::Register(form) => {
            if !desk.enter(&Route::Register) {
                return Ok(());
            }
            let outcome = auth.register(&form).await;
            if outcome.success {
                views::notice("Account created. Sign in with `ticketdesk login`.");
            } else {
                report(&desk, &outcome);
            }
        }
        Op::OAuthUrl { provider } => match auth.oauth_start_url(&provider) {
            Ok(url) => println!("{url}"),
            Err(err) => views::failure(&err.user_message()),
        },
        Op::OAuthCallback { location } => {
            if !desk.enter(&Route::OAuthCallback) {
                return Ok(());
            }
            let token = callback_token(&location);
            let outcome = auth.process_oauth_callback(token.as_deref()).await;
            report(&desk, &outcome);
        }
        Op::Logout => {
            auth.logout();
            views::notice("Signed out.");
        }
        Op::WhoAmI => match auth.current_user() {
            Some(user) => views::user(&user),
            None => views::notice("Not signed in."),
        },
    }

    Ok(())
}

fn report(desk: &Desk, outcome: &AuthOutcome) {
    if outcome.success {
        if let Some(user) = desk.auth().current_user() {
            let landing = desk.location().unwrap_or(Route::Dashboard);
            views::notice(&format!(
                "Signed in as {} ({}). Continue at {landing}.",
                user.display_name(),
                user.role
            ));
        }
    } else {
        views::failure(outcome.error.as_deref().unwrap_or("Sign-in failed."));
    }
}

/// Accepts either a callback location carrying `token=` or the bare token.
fn callback_token(location: &str) -> Option<String> {
    token_from_callback_url(location).or_else(|| {
        let raw = location.trim();
        (!raw.is_empty() && !raw.contains(['?', '=', '/'])).then(|| raw.to_string())
    })
}
