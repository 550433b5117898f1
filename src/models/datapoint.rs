//! Met Office DataPoint 3-hourly forecast payload
//!
//! Only the parts of the payload the processor reads are modelled; the rest is
//! ignored on deserialization. Every attribute value arrives as a string.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ForecastError;
use crate::models::codes::{CompassPoint, TimeSlot, WeatherType};
use crate::Result;

/// Top-level `{"SiteRep": ...}` document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawForecastResponse {
    #[serde(rename = "SiteRep")]
    pub site_rep: SiteRep,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRep {
    #[serde(rename = "DV")]
    pub data_value: DataValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataValue {
    /// When the Met Office issued this forecast
    #[serde(rename = "dataDate", default)]
    pub data_date: Option<String>,
    #[serde(rename = "Location")]
    pub location: ForecastLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastLocation {
    #[serde(rename = "i", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub lat: Option<String>,
    #[serde(default)]
    pub lon: Option<String>,
    #[serde(default)]
    pub elevation: Option<String>,
    #[serde(rename = "Period", deserialize_with = "one_or_many", default)]
    pub periods: Vec<Period>,
}

/// One calendar date and its reports, in provider order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    #[serde(rename = "value", with = "provider_date")]
    pub date: NaiveDate,
    #[serde(rename = "Rep", deserialize_with = "one_or_many", default)]
    pub reports: Vec<Report>,
}

/// A single 3-hour report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Minutes since midnight marking the start of the window
    #[serde(rename = "$")]
    pub time_code: String,
    #[serde(rename = "D")]
    pub wind_direction: String,
    #[serde(rename = "S")]
    pub wind_speed: String,
    #[serde(rename = "G")]
    pub wind_gust: String,
    #[serde(rename = "Pp")]
    pub precipitation_probability: String,
    #[serde(rename = "W")]
    pub weather_type: String,
    #[serde(rename = "T", default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<String>,
    #[serde(rename = "F", default, skip_serializing_if = "Option::is_none")]
    pub feels_like: Option<String>,
    #[serde(rename = "H", default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<String>,
    #[serde(rename = "V", default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(rename = "U", default, skip_serializing_if = "Option::is_none")]
    pub uv_index: Option<String>,
}

impl RawForecastResponse {
    /// Parse an already-decoded JSON document
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| ForecastError::parse(format!("Unexpected forecast shape: {e}")))
    }

    #[must_use]
    pub fn periods(&self) -> &[Period] {
        &self.site_rep.data_value.location.periods
    }

    pub fn periods_mut(&mut self) -> &mut Vec<Period> {
        &mut self.site_rep.data_value.location.periods
    }

    #[must_use]
    pub fn location_name(&self) -> Option<&str> {
        self.site_rep.data_value.location.name.as_deref()
    }
}

impl Report {
    /// Daylight slot for this report, `None` for night-time codes
    #[must_use]
    pub fn slot(&self) -> Option<TimeSlot> {
        TimeSlot::from_code(&self.time_code)
    }

    pub fn compass_point(&self) -> Result<CompassPoint> {
        self.wind_direction.parse()
    }

    pub fn weather(&self) -> Result<WeatherType> {
        self.weather_type.parse()
    }

    pub fn wind_speed_mph(&self) -> Result<u32> {
        parse_number("wind_speed", &self.wind_speed)
    }

    pub fn wind_gust_mph(&self) -> Result<u32> {
        parse_number("gust_strength", &self.wind_gust)
    }

    /// Gust minus sustained speed; negative when the provider reports a
    /// gust below the mean speed
    pub fn gust_difference(&self) -> Result<i64> {
        Ok(i64::from(self.wind_gust_mph()?) - i64::from(self.wind_speed_mph()?))
    }

    pub fn precipitation_percent(&self) -> Result<u32> {
        parse_number("precipitation_probability", &self.precipitation_probability)
    }
}

fn parse_number(attribute: &str, value: &str) -> Result<u32> {
    value
        .trim()
        .parse()
        .map_err(|_| ForecastError::invalid_value(attribute, value))
}

/// DataPoint collapses single-element arrays into a bare object
fn one_or_many<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        Many(Vec<T>),
        One(T),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(items) => items,
        OneOrMany::One(item) => vec![item],
    })
}

/// Dates are sent as `2024-04-03Z`
mod provider_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%Y-%m-%dZ";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, FORMAT)
            .map_err(|e| D::Error::custom(format!("invalid period date '{raw}': {e}")))
    }
}
