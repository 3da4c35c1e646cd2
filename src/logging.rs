//! Tracing subscriber setup driven by [`LoggingConfig`]

use anyhow::{Result, anyhow};
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;

/// Build the filter: `RUST_LOG` wins, otherwise the configured level with
/// noisy HTTP internals capped at `warn`.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let filter = EnvFilter::try_new(&config.level)?
        .add_directive("hyper_util=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);
    Ok(filter)
}

/// Formatter selected by `format`: `json` for one object per line,
/// anything else multi-line pretty output.
pub fn subscriber(config: &LoggingConfig) -> Result<Box<dyn Subscriber + Send + Sync>> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let subscriber: Box<dyn Subscriber + Send + Sync> = match config.format.as_str() {
        "json" => Box::new(builder.json().finish()),
        _ => Box::new(builder.pretty().finish()),
    };
    Ok(subscriber)
}

/// Install the global subscriber. Fails if one is already set.
pub fn init(config: &LoggingConfig) -> Result<()> {
    subscriber(config)?
        .try_init()
        .map_err(|e| anyhow!("Failed to initialise logging: {e}"))
}
