use std::sync::Arc;

use anyhow::{Context, Result};
use downland_forecast::{
    AppConfig, DataPointClient, ForecastService, JsonDump, telemetry,
    web::{self, AppState, Clock},
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    telemetry::init(&config.logging).context("Failed to initialise logging")?;

    let client =
        DataPointClient::new(&config.datapoint).context("Failed to create DataPoint client")?;
    let mut forecasts = ForecastService::new(
        Arc::new(client),
        config.credentials()?,
        config.freshness(),
    );

    if config.debug.dump_responses {
        tracing::info!("Writing raw forecasts to {}", config.debug.dump_path.display());
        let dump = JsonDump::new(config.debug.dump_path.clone());
        forecasts = forecasts.with_observer(Arc::new(dump));
    }

    let state = AppState {
        forecasts,
        clock: Clock::System(config.timezone()?),
    };

    web::run(state, config.server.port, &config.server.static_dir)
        .await
        .context("Web server failed")?;
    Ok(())
}
