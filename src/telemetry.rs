//! Log output setup

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::Result;
use crate::config::LoggingConfig;
use crate::error::ForecastError;

/// Install the global subscriber. `RUST_LOG` takes precedence over the
/// configured level.
pub fn init(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .map_err(|e| ForecastError::config(format!("Invalid log filter: {e}")))?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = if logging.format == "json" {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    };

    result.map_err(|e| ForecastError::config(format!("Logging already initialised: {e}")))
}
