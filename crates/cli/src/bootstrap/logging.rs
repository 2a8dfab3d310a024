use adns_domain::Config;
use tracing::info;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

/// Logs go to stderr; stdout carries lookup responses. `RUST_LOG`, when set,
/// takes precedence over the configured level.
pub fn init_logging(config: &Config) {
    let log_level = config.logging.level.parse().unwrap_or(tracing::Level::INFO);

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(log_level).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .init();

    info!("Logging initialized at level: {}", config.logging.level);
}
