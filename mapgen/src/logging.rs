//! Diagnostic logging on stderr.
//!
//! Only warnings are shown unless `RUST_LOG` asks for more, so the progress
//! lines stay the only regular stderr output.

use tracing_subscriber::EnvFilter;

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
