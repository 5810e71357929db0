//! Ticket verification: decoded QR payload plus event id in, normalized
//! verdict out. Validity rules live on the backend.

pub mod client;
pub mod driver;
pub mod flow;
pub mod types;

pub use driver::run_scan_loop;
pub use flow::{FlowState, LogNotifier, Notifier, VerificationFlow};
pub use types::{VerificationDetails, VerificationResult, VerifyRequest, VerifyResponse};
