use tracing_subscriber::{fmt, EnvFilter};

/// Install the fmt subscriber. `RUST_LOG` overrides the default, which
/// keeps the interactive menu free of anything below warnings.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,masterblog_cli=warn"));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
