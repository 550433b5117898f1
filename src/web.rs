use std::path::Path;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::error::ForecastError;
use crate::forecast::ForecastService;
use crate::view::ForecastView;

/// Where handlers get "now" from
#[derive(Debug, Clone, Copy)]
pub enum Clock {
    /// Wall clock in the forecast location's time zone
    System(Tz),
    Fixed(DateTime<Tz>),
}

impl Clock {
    #[must_use]
    pub fn now(&self) -> DateTime<Tz> {
        match self {
            Clock::System(tz) => Utc::now().with_timezone(tz),
            Clock::Fixed(now) => *now,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub forecasts: ForecastService,
    pub clock: Clock,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

/// Handler error, rendered as a JSON body
#[derive(Debug)]
pub struct ApiError(ForecastError);

impl From<ForecastError> for ApiError {
    fn from(err: ForecastError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = if self.0.is_fetch_failure() {
            (StatusCode::BAD_GATEWAY, "FETCH_FAILED")
        } else {
            (StatusCode::INTERNAL_SERVER_ERROR, "FORECAST_ERROR")
        };
        tracing::warn!(%status, "Forecast request failed: {}", self.0);

        let body = ErrorBody {
            code,
            message: self.0.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(state: AppState, static_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/get-forecast", get(get_forecast))
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
        .with_state(state)
}

async fn get_forecast(State(state): State<AppState>) -> Result<Json<ForecastView>, ApiError> {
    let view = state.forecasts.view(state.clock.now()).await?;
    Ok(Json(view))
}

pub async fn run(state: AppState, port: u16, static_dir: &Path) -> crate::Result<()> {
    let app = router(state, static_dir);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server running at http://localhost:{}", port);
    axum::serve(listener, app).await?;
    Ok(())
}
