pub mod admin;
pub mod auth;
pub mod common;
pub mod events;
pub mod tickets;
pub mod users;
pub mod verification;
