use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// RUST_LOG takes precedence; otherwise `-v` flags pick the level
/// (info by default, -v debug, -vv trace). Output goes to stderr so
/// command output on stdout stays clean for piping.
pub fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .compact()
        .init();
}
