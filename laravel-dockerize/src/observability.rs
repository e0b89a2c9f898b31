//! Logging setup
//!
//! Diagnostic logs go to stderr so stdout carries only the per-file report.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for a `-v` count
#[must_use]
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "warn,laravel_dockerize=info",
        2 => "info,laravel_dockerize=debug",
        _ => "debug,laravel_dockerize=trace",
    }
}

/// Initialize the tracing subscriber
///
/// `RUST_LOG` takes precedence over the verbosity flag.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(verbosity: u8) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbosity > 1)
                .without_time()
                .compact(),
        )
        .try_init()?;

    Ok(())
}
