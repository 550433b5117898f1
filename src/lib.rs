//! `downland-forecast` - paragliding forecast for the Sussex Downs
//!
//! This library fetches the Met Office 3-hourly forecast for one location,
//! prunes what is no longer relevant, and rates each remaining daylight slot
//! for flying, with the sites that work in its wind.

pub mod config;
pub mod error;
pub mod forecast;
pub mod models;
pub mod paragliding;
pub mod telemetry;
pub mod view;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::AppConfig;
pub use error::ForecastError;
pub use forecast::{ForecastService, ForecastState};
pub use models::{CompassPoint, Period, RawForecastResponse, Report, TimeSlot, WeatherType};
pub use paragliding::{Moment, Rating, Site};
pub use view::ForecastView;
pub use weather::{Credentials, DataPointClient, ForecastSource, JsonDump, ResponseObserver};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ForecastError>;
