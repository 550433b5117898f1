//! Cached forecast and the refresh-then-serve cycle
//!
//! The whole pruned forecast is one cache entry. It is refetched when older
//! than the freshness window at the moment a page asks for it; there is no
//! background refresh.
//!
//! Cache age is measured between UTC instants. Local wall-clock time is only
//! used for pruning and day labels, so a clock change never stretches or
//! shortens the freshness window.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument};

use crate::Result;
use crate::models::RawForecastResponse;
use crate::paragliding::{Moment, prune_stale};
use crate::view::ForecastView;
use crate::weather::{Credentials, ForecastSource, ResponseObserver, fetch_forecast};

/// Last fetched forecast plus what it was fetched with
#[derive(Debug, Clone)]
pub struct ForecastState {
    credentials: Credentials,
    last_refresh: DateTime<Utc>,
    data: Option<RawForecastResponse>,
}

impl ForecastState {
    /// A state that has never been fetched; it is stale at any real "now"
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            last_refresh: DateTime::<Utc>::UNIX_EPOCH,
            data: None,
        }
    }

    #[must_use]
    pub fn is_stale(&self, now: DateTime<Utc>, freshness: Duration) -> bool {
        self.last_refresh < now - freshness
    }

    /// Swap in a new forecast fetched at `fetched_at`
    pub fn replace(&mut self, forecast: RawForecastResponse, fetched_at: DateTime<Utc>) {
        self.data = Some(forecast);
        self.last_refresh = fetched_at;
    }

    #[must_use]
    pub fn forecast(&self) -> Option<&RawForecastResponse> {
        self.data.as_ref()
    }

    /// `None` until the first successful fetch
    #[must_use]
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.data.as_ref().map(|_| self.last_refresh)
    }

    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Shared handle owned by the serving layer
#[derive(Clone)]
pub struct ForecastService {
    state: Arc<RwLock<ForecastState>>,
    source: Arc<dyn ForecastSource>,
    observer: Option<Arc<dyn ResponseObserver>>,
    freshness: Duration,
}

impl ForecastService {
    pub fn new(
        source: Arc<dyn ForecastSource>,
        credentials: Credentials,
        freshness: Duration,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(ForecastState::new(credentials))),
            source,
            observer: None,
            freshness,
        }
    }

    /// Attach a raw-payload observer (debug dump)
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn ResponseObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Fetch and prune if the cache is older than the freshness window.
    /// Returns whether a fetch happened.
    ///
    /// Concurrent callers that all see a stale cache each fetch; the last one
    /// to finish wins.
    pub async fn refresh_if_stale(&self, now: DateTime<Tz>) -> Result<bool> {
        let instant = now.with_timezone(&Utc);
        if !self.state.read().await.is_stale(instant, self.freshness) {
            debug!("Serving cached forecast");
            return Ok(false);
        }

        self.refresh(now).await?;
        Ok(true)
    }

    /// Unconditionally fetch, prune against `now` and replace the cache.
    /// On failure the cache is left untouched.
    #[instrument(skip(self))]
    pub async fn refresh(&self, now: DateTime<Tz>) -> Result<()> {
        let credentials = self.state.read().await.credentials().clone();
        let observer = self.observer.clone();

        let mut forecast = fetch_forecast(self.source.as_ref(), &credentials, observer)
            .await
            .inspect_err(|e| error!("Forecast refresh failed: {}", e))?;

        prune_stale(&mut forecast, Moment::from_datetime(now.naive_local()));

        self.state.write().await.replace(forecast, now.with_timezone(&Utc));
        info!("Forecast cache refreshed");
        Ok(())
    }

    /// Copy of the cached, pruned forecast
    pub async fn snapshot(&self) -> Option<RawForecastResponse> {
        self.state.read().await.forecast().cloned()
    }

    pub async fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.state.read().await.last_refresh()
    }

    /// Refresh if stale, then build the page view for `now`
    pub async fn view(&self, now: DateTime<Tz>) -> Result<ForecastView> {
        self.refresh_if_stale(now).await?;

        let state = self.state.read().await;
        match state.forecast() {
            Some(forecast) => {
                ForecastView::build(forecast, now.date_naive(), state.last_refresh())
            }
            None => Ok(ForecastView::empty()),
        }
    }
}
