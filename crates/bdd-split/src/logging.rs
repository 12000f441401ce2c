//! Diagnostics on stderr.
//!
//! Stdout carries the per-report summaries, so every log line goes to stderr.
//! Events are filtered by [`SplitConfig::log_level`] alone; `RUST_LOG` is not
//! consulted because `BDD_SPLIT_LOG_LEVEL` and `--log-level` already feed the
//! configured level.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

use crate::config::SplitConfig;

fn filter_from_config(config: &SplitConfig) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from(config.log_level).into())
        .parse_lossy("")
}

fn subscriber<W>(
    config: &SplitConfig,
    writer: W,
) -> impl tracing::Subscriber + Send + Sync + use<W>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter_from_config(config))
        .with_writer(writer)
        .with_target(false)
        .without_time()
        .finish()
}

/// Install a compact stderr subscriber at the configured level.
///
/// Called once by the binary before any report is read. Later calls, and
/// calls made after a test harness installed its own subscriber, leave the
/// existing subscriber in place.
pub fn init_logging(config: &SplitConfig) {
    let _ = tracing::subscriber::set_global_default(subscriber(config, std::io::stderr));
}
