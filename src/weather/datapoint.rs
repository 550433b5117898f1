//! HTTP client for the DataPoint `wxfcs` forecast endpoint

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::{Credentials, ForecastSource};
use crate::Result;
use crate::config::DataPointConfig;
use crate::error::ForecastError;

/// Resolution requested from DataPoint
const RESOLUTION: &str = "3hourly";

/// DataPoint forecast client. Requests are bounded by the configured timeout
/// and are never retried.
#[derive(Debug, Clone)]
pub struct DataPointClient {
    client: Client,
    base_url: String,
}

impl DataPointClient {
    /// Create a new client from configuration
    pub fn new(config: &DataPointConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("downland-forecast/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ForecastError::fetch_with_source("Failed to create HTTP client", e))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn forecast_url(&self, location_id: &str) -> String {
        format!("{}/{}", self.base_url, location_id)
    }
}

#[async_trait]
impl ForecastSource for DataPointClient {
    #[instrument(skip(self, credentials), fields(location_id = %credentials.location_id))]
    async fn fetch(&self, credentials: &Credentials) -> Result<Value> {
        let url = self.forecast_url(&credentials.location_id);
        debug!("DataPoint request URL: {}", url);
        let start_time = Instant::now();

        // The key travels in the query string, so strip URLs from errors
        let response = self
            .client
            .get(&url)
            .query(&[("res", RESOLUTION), ("key", credentials.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                let message = if e.is_timeout() {
                    "DataPoint request timed out"
                } else {
                    "DataPoint request failed"
                };
                ForecastError::fetch_with_source(message, e.without_url())
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForecastError::fetch(format!(
                "DataPoint returned status {status}"
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| {
                ForecastError::parse(format!("Forecast body is not JSON: {}", e.without_url()))
            })?;

        let elapsed = start_time.elapsed();
        debug!("DataPoint responded in {:.3}s", elapsed.as_secs_f64());
        if elapsed.as_secs() > 5 {
            warn!("Slow DataPoint response: {:.3}s", elapsed.as_secs_f64());
        }

        Ok(payload)
    }
}
