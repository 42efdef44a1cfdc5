//! Kaiwa messaging server.
//!
//! A REST API for conversations and messages between registered users,
//! with a per-request access log and a time-of-day access gate.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use ui::{build_app, run as run_server};
