use tracing::subscriber::SetGlobalDefaultError;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "warn,gridiron_engine=info";

/// Install the global `fmt` subscriber. Output goes to stderr so stdout stays
/// clean for play-by-play text.
pub fn init_logging() -> Result<(), SetGlobalDefaultError> {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}
