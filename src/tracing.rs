use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::Error;
use crate::config::{LogFormat, TracingConfig};

/// Installs the global tracing subscriber.
///
/// Log lines are written to stderr so they don't mix with the host's output. The filter is read
/// from `RUST_LOG`, defaulting to `hilight=info`.
///
/// # Errors
///
/// Returns [`Error::Tracing`] if a global subscriber has already been installed.
pub fn try_init(tracing: &TracingConfig) -> Result<(), Error> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "hilight=info".into());
    let base = tracing_subscriber::registry().with(filter);
    let stdout_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let result = match tracing.format {
        LogFormat::Json => base.with(stdout_layer.json()).try_init(),
        LogFormat::Pretty => base.with(stdout_layer.pretty()).try_init(),
        LogFormat::Compact => base.with(stdout_layer.compact()).try_init(),
    };

    result.map_err(Error::Tracing)?;

    info!("tracing initialized");

    Ok(())
}
