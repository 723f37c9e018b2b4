use tracing_subscriber::EnvFilter;

/// Log to stderr so stdout carries only the report.
///
/// `RUST_LOG` overrides the default `relink=warn`.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("relink=warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
