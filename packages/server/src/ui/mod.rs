//! HTTP server: routing, middleware and request handlers.

pub mod error;
pub mod extractor;
mod handler;
pub mod middleware;
mod router;
mod runner;
mod signal;
pub mod state;

pub use router::create_router;
pub use runner::{build_app, run};
