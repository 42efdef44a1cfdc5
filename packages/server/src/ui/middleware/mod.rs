//! Request pipeline stages.
//!
//! Order, outermost first: `authenticate` → `log_request` → `restrict_by_time`.

mod auth;
mod request_log;
mod time_gate;

pub use auth::authenticate;
pub use request_log::{format_log_entry, log_request};
pub use time_gate::restrict_by_time;
