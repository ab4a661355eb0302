use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Overrides `-v` with a full filter directive, e.g. `pathmark=trace`.
const LOG_ENV: &str = "PATHMARK_LOG";

pub(super) fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Installs a stderr subscriber. Stdout stays reserved for command output.
pub(super) fn setup_logging(verbosity: u8) {
    let level = level_for(verbosity);
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    // No-op when a subscriber is already installed.
    let _ = tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .try_init();

    tracing::debug!(?level, "logging initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_for(0), LevelFilter::WARN);
        assert_eq!(level_for(1), LevelFilter::INFO);
        assert_eq!(level_for(2), LevelFilter::DEBUG);
        assert_eq!(level_for(3), LevelFilter::TRACE);
        assert_eq!(level_for(9), LevelFilter::TRACE);
    }
}
