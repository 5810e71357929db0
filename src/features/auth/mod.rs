//! Authentication feature: credential login, registration, external sign-in
//! callbacks, start-up session hydration, and route guarding. This module
//! handles bearer tokens and passwords and must never log them.
//!
//! Flow overview: login posts credentials and stores the returned token and
//! user; the OAuth callback attaches an externally issued token and resolves
//! the user through `/auth/me`; start-up hydration does the same with the
//! persisted token and silently downgrades to anonymous on failure.

pub mod client;
pub mod guards;
pub mod manager;
pub mod types;
pub mod validation;

pub use guards::{guard, has_role, GuardDecision};
pub use manager::{token_from_callback_url, AuthManager};
pub use types::{AuthOutcome, RegistrationForm};
