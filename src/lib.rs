//! # ticketdesk
//!
//! Native client for the ticketing and exhibition backend. All business rules
//! (ticket validity, payment, QR semantics, authorization) live behind the
//! REST API; this crate authenticates, calls it, and presents the results.
//!
//! ## Session
//!
//! A single `SessionStore` holds the bearer credential and the signed-in user.
//! The `AuthManager` is the only component that establishes a session. The
//! `ApiClient` attaches the credential to every request and clears the session
//! on any `401`, sending the user back to the login view.
//!
//! ## Verification
//!
//! The `scanner` polls a decoding source and forwards payloads to a
//! `VerificationFlow`, which allows one verification call at a time and
//! normalizes the backend's verdict into a success or error result.

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod features;
pub mod navigation;
pub mod scanner;
pub mod session;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
