//! Data models for the forecast processor
//!
//! - Datapoint: the provider payload (periods and 3-hourly reports)
//! - Codes: closed enumerations for time slots, weather types and compass points

pub mod codes;
pub mod datapoint;

// Re-export all public types for convenient access
pub use codes::{CompassPoint, TimeSlot, WeatherType};
pub use datapoint::{Period, RawForecastResponse, Report};
