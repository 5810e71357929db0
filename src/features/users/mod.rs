pub mod types;

pub use types::{Role, User, UserStatus};
