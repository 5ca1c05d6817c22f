use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log to stderr so report output on stdout stays clean.
/// Verbosity comes from `CASHBOOK_LOG` (an env-filter directive), default `warn`.
pub(crate) fn setup_logging() {
    let filter = EnvFilter::try_from_env("CASHBOOK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_level(true)
        .with_target(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .init();
}
