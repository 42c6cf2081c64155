use std::io;

use tracing::subscriber;
use tracing_log::LogTracer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Routes both `log` records and `tracing` events to stderr.
///
/// `RUST_LOG` takes precedence over `default_filter`.
pub fn init(default_filter: &str) -> anyhow::Result<()> {
    LogTracer::init()?;

    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_filter))?;
    let collector = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr));
    subscriber::set_global_default(collector)?;
    Ok(())
}
