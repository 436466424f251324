use tracing_subscriber::EnvFilter;

/// Diagnostics go to stderr so stdout stays the conversation with the user.
/// `RUST_LOG` wins when set; otherwise `--debug` selects `debug`, else `warn`.
pub fn init(debug: bool) {
    let fallback = if debug { "chikki=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
