//! Forecast retrieval from the Met Office DataPoint service
//!
//! [`ForecastSource`] is the seam between the processor and the network;
//! [`DataPointClient`] is the real implementation. A [`ResponseObserver`] may
//! be attached to see every raw payload (used for the debug dump).

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::Result;
use crate::models::RawForecastResponse;

pub mod datapoint;
pub mod dump;

pub use datapoint::DataPointClient;
pub use dump::JsonDump;

/// API key and location the forecast is requested for
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub location_id: String,
}

impl Credentials {
    #[must_use]
    pub fn new(api_key: impl Into<String>, location_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            location_id: location_id.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("location_id", &self.location_id)
            .finish()
    }
}

/// Something that can produce the raw 3-hourly forecast document
#[async_trait]
pub trait ForecastSource: Send + Sync {
    /// Fetch the forecast as decoded JSON. Any transport failure, non-success
    /// status or undecodable body is an error.
    async fn fetch(&self, credentials: &Credentials) -> Result<Value>;
}

/// Sees each raw payload. Runs on its own task, so it can neither delay nor
/// fail the fetch.
#[async_trait]
pub trait ResponseObserver: Send + Sync {
    async fn observe(&self, payload: &Value);
}

/// Fetch, hand the raw payload to the observer if any, then parse it
#[instrument(skip(source, observer), fields(location_id = %credentials.location_id))]
pub async fn fetch_forecast(
    source: &dyn ForecastSource,
    credentials: &Credentials,
    observer: Option<Arc<dyn ResponseObserver>>,
) -> Result<RawForecastResponse> {
    let payload = source.fetch(credentials).await?;

    if let Some(observer) = observer {
        debug!("Passing raw forecast to observer");
        let raw = payload.clone();
        tokio::spawn(async move {
            observer.observe(&raw).await;
        });
    }

    let forecast = RawForecastResponse::from_value(payload)?;
    info!(
        periods = forecast.periods().len(),
        location = forecast.location_name().unwrap_or("unknown"),
        "Fetched forecast"
    );
    Ok(forecast)
}
