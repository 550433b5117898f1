//! Binary flyability rating per forecast attribute
//!
//! Thresholds are in the units DataPoint reports (mph for speeds).

use std::fmt;

use serde::Serialize;

use crate::Result;
use crate::error::ForecastError;
use crate::models::{CompassPoint, WeatherType};

pub const MIN_WIND_SPEED: u32 = 4;
pub const MAX_WIND_SPEED: u32 = 13;
pub const MAX_GUST_STRENGTH: u32 = 15;
pub const MAX_GUST_DIFFERENCE: i64 = 5;
/// Highest weather type code that is not precipitation (overcast)
pub const MAX_DRY_WEATHER_CODE: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Positive,
    Negative,
}

impl Rating {
    #[must_use]
    pub fn from_flag(favourable: bool) -> Self {
        if favourable {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes that have a rating rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    WindDirection,
    WindSpeed,
    GustStrength,
    GustDifference,
    Conditions,
}

impl Attribute {
    /// `None` means no rule exists for this name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "wind_direction" => Some(Self::WindDirection),
            "wind_speed" => Some(Self::WindSpeed),
            "gust_strength" => Some(Self::GustStrength),
            "gust_difference" => Some(Self::GustDifference),
            "conditions" => Some(Self::Conditions),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::WindDirection => "wind_direction",
            Self::WindSpeed => "wind_speed",
            Self::GustStrength => "gust_strength",
            Self::GustDifference => "gust_difference",
            Self::Conditions => "conditions",
        }
    }

    /// Read a raw provider value as this attribute
    pub fn reading(self, value: &str) -> Result<Reading> {
        let invalid = || ForecastError::invalid_value(self.name(), value);
        let reading = match self {
            Self::WindDirection => Reading::WindDirection(value.parse()?),
            Self::WindSpeed => Reading::WindSpeed(value.trim().parse().map_err(|_| invalid())?),
            Self::GustStrength => {
                Reading::GustStrength(value.trim().parse().map_err(|_| invalid())?)
            }
            Self::GustDifference => {
                Reading::GustDifference(value.trim().parse().map_err(|_| invalid())?)
            }
            Self::Conditions => Reading::Conditions(value.parse()?),
        };
        Ok(reading)
    }
}

/// An attribute together with its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    WindDirection(CompassPoint),
    WindSpeed(u32),
    GustStrength(u32),
    GustDifference(i64),
    Conditions(WeatherType),
}

impl Reading {
    #[must_use]
    pub fn attribute(self) -> Attribute {
        match self {
            Self::WindDirection(_) => Attribute::WindDirection,
            Self::WindSpeed(_) => Attribute::WindSpeed,
            Self::GustStrength(_) => Attribute::GustStrength,
            Self::GustDifference(_) => Attribute::GustDifference,
            Self::Conditions(_) => Attribute::Conditions,
        }
    }
}

/// Rate a single reading
#[must_use]
pub fn classify(reading: Reading) -> Rating {
    let favourable = match reading {
        Reading::WindDirection(direction) => {
            !matches!(direction, CompassPoint::W | CompassPoint::WSW)
        }
        Reading::WindSpeed(speed) => (MIN_WIND_SPEED..=MAX_WIND_SPEED).contains(&speed),
        Reading::GustStrength(gust) => gust <= MAX_GUST_STRENGTH,
        Reading::GustDifference(difference) => difference <= MAX_GUST_DIFFERENCE,
        // "NA" cannot be shown to be dry
        Reading::Conditions(weather) => weather
            .code()
            .is_some_and(|code| code <= MAX_DRY_WEATHER_CODE),
    };
    Rating::from_flag(favourable)
}

/// Rate a raw `(attribute, value)` pair.
///
/// Returns `Ok(None)` for an attribute name with no rule, which is distinct
/// from a negative rating. A value that cannot be read is an error.
pub fn classify_named(attribute: &str, value: &str) -> Result<Option<Rating>> {
    match Attribute::from_name(attribute) {
        Some(attribute) => Ok(Some(classify(attribute.reading(value)?))),
        None => Ok(None),
    }
}
