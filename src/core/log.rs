use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Level used when `RUST_LOG` is unset. Only the server logs by default;
/// the one-shot commands keep stdout for their tables.
pub fn default_level(verbose: bool, serving: bool) -> LevelFilter {
    match (verbose, serving) {
        (true, _) => LevelFilter::DEBUG,
        (false, true) => LevelFilter::INFO,
        (false, false) => LevelFilter::OFF,
    }
}

pub fn init_logging(level: LevelFilter) {
    let app_filter = Targets::new().with_target("brlfx", level);
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(app_filter)
        .with(env_filter)
        .init();
}
