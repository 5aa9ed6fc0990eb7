use tracing_subscriber::EnvFilter;

mod args;
pub mod config;
pub mod download;
pub mod extract;

pub use args::{Args, Commands, DownloadArgs, TableArgs};

/// Log to stderr, level from `RUST_LOG`, `info` by default.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
