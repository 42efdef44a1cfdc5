//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence. Without it, the binary's own crate logs at
/// `default_level` and tower-http request traces at `debug`.
///
/// # Arguments
///
/// * `bin_name` - Name of the running binary (e.g. `env!("CARGO_BIN_NAME")`)
/// * `default_level` - Level used when `RUST_LOG` is not set
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let crate_target = bin_name.replace('-', "_");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{crate_target}={default_level},tower_http=debug,axum::rejection=trace"
        ))
    });

    // ignore the error if a subscriber is already installed (e.g. in tests)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}
