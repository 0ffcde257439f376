use tracing_subscriber::{fmt, EnvFilter};

/// Log to stderr; stdout carries workflow commands and dry-run output.
/// `RUST_LOG` overrides the level picked from `-v`.
pub fn init(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
