use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

fn verbosity(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::OFF
    }
}

/// Crate events follow `verbose`; the HTTP client never goes below INFO.
fn app_targets(verbose: bool) -> Targets {
    let level = verbosity(verbose);
    Targets::new()
        .with_target(env!("CARGO_CRATE_NAME"), level)
        .with_target("reqwest", level.min(LevelFilter::INFO))
}

/// Installs the global subscriber. Logs go to stderr so the tables printed on
/// stdout can be piped. `RUST_LOG` still applies on top.
pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity(verbose).to_string()));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(app_targets(verbose))
        .with(env_filter)
        .init();
}
