//! Shared utilities for the Kaiwa messaging server.

pub mod logger;
pub mod time;
