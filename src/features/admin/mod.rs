pub mod client;
pub mod types;

pub use types::{AdminStats, NewUser, UserUpdate};
