pub mod client;
pub mod types;

pub use types::{Attendee, EventRef, Ticket, TicketStatus};
