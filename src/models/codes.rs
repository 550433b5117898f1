//! Closed enumerations for the codes DataPoint sends as strings
//!
//! Parsing happens once at the boundary; everything downstream matches
//! exhaustively on these types.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ForecastError;

/// One of the five daylight 3-hour windows, keyed by its start minute
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TimeSlot {
    SixToNine,
    NineToTwelve,
    TwelveToThree,
    ThreeToSix,
    SixToNinePm,
}

impl TimeSlot {
    /// Minutes in a slot, minus one: a slot starting at 360 ends at minute 539.
    const LAST_MINUTE_OFFSET: u32 = 179;

    /// Parse the provider's string code, `None` for anything outside daylight.
    /// Codes are matched exactly as sent.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "360" => Some(Self::SixToNine),
            "540" => Some(Self::NineToTwelve),
            "720" => Some(Self::TwelveToThree),
            "900" => Some(Self::ThreeToSix),
            "1080" => Some(Self::SixToNinePm),
            _ => None,
        }
    }

    #[must_use]
    pub fn start_minute(self) -> u32 {
        match self {
            Self::SixToNine => 360,
            Self::NineToTwelve => 540,
            Self::TwelveToThree => 720,
            Self::ThreeToSix => 900,
            Self::SixToNinePm => 1080,
        }
    }

    /// Last minute of the day still covered by this slot
    #[must_use]
    pub fn end_minute(self) -> u32 {
        self.start_minute() + Self::LAST_MINUTE_OFFSET
    }

    /// Human-readable range shown on the page
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SixToNine => "6-9am",
            Self::NineToTwelve => "9-12pm",
            Self::TwelveToThree => "12-3pm",
            Self::ThreeToSix => "3-6pm",
            Self::SixToNinePm => "6-9pm",
        }
    }
}

impl FromStr for TimeSlot {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| ForecastError::UnknownTimeCode(s.to_string()))
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Met Office significant weather code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WeatherType {
    NotAvailable,
    ClearNight,
    SunnyDay,
    PartlyCloudyNight,
    PartlyCloudyDay,
    NotUsed,
    Mist,
    Fog,
    Cloudy,
    Overcast,
    LightRainShowerNight,
    LightRainShowerDay,
    Drizzle,
    LightRain,
    HeavyRainShowerNight,
    HeavyRainShowerDay,
    HeavyRain,
    SleetShowerNight,
    SleetShowerDay,
    Sleet,
    HailShowerNight,
    HailShowerDay,
    Hail,
    LightSnowShowerNight,
    LightSnowShowerDay,
    LightSnow,
    HeavySnowShowerNight,
    HeavySnowShowerDay,
    HeavySnow,
    ThunderShowerNight,
    ThunderShowerDay,
    Thunder,
}

impl WeatherType {
    /// Numeric code, `None` for "NA"
    #[must_use]
    pub fn code(self) -> Option<u8> {
        let code = match self {
            Self::NotAvailable => return None,
            Self::ClearNight => 0,
            Self::SunnyDay => 1,
            Self::PartlyCloudyNight => 2,
            Self::PartlyCloudyDay => 3,
            Self::NotUsed => 4,
            Self::Mist => 5,
            Self::Fog => 6,
            Self::Cloudy => 7,
            Self::Overcast => 8,
            Self::LightRainShowerNight => 9,
            Self::LightRainShowerDay => 10,
            Self::Drizzle => 11,
            Self::LightRain => 12,
            Self::HeavyRainShowerNight => 13,
            Self::HeavyRainShowerDay => 14,
            Self::HeavyRain => 15,
            Self::SleetShowerNight => 16,
            Self::SleetShowerDay => 17,
            Self::Sleet => 18,
            Self::HailShowerNight => 19,
            Self::HailShowerDay => 20,
            Self::Hail => 21,
            Self::LightSnowShowerNight => 22,
            Self::LightSnowShowerDay => 23,
            Self::LightSnow => 24,
            Self::HeavySnowShowerNight => 25,
            Self::HeavySnowShowerDay => 26,
            Self::HeavySnow => 27,
            Self::ThunderShowerNight => 28,
            Self::ThunderShowerDay => 29,
            Self::Thunder => 30,
        };
        Some(code)
    }

    /// Exact provider code, including "NA"
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let weather = match code {
            "NA" => Self::NotAvailable,
            "0" => Self::ClearNight,
            "1" => Self::SunnyDay,
            "2" => Self::PartlyCloudyNight,
            "3" => Self::PartlyCloudyDay,
            "4" => Self::NotUsed,
            "5" => Self::Mist,
            "6" => Self::Fog,
            "7" => Self::Cloudy,
            "8" => Self::Overcast,
            "9" => Self::LightRainShowerNight,
            "10" => Self::LightRainShowerDay,
            "11" => Self::Drizzle,
            "12" => Self::LightRain,
            "13" => Self::HeavyRainShowerNight,
            "14" => Self::HeavyRainShowerDay,
            "15" => Self::HeavyRain,
            "16" => Self::SleetShowerNight,
            "17" => Self::SleetShowerDay,
            "18" => Self::Sleet,
            "19" => Self::HailShowerNight,
            "20" => Self::HailShowerDay,
            "21" => Self::Hail,
            "22" => Self::LightSnowShowerNight,
            "23" => Self::LightSnowShowerDay,
            "24" => Self::LightSnow,
            "25" => Self::HeavySnowShowerNight,
            "26" => Self::HeavySnowShowerDay,
            "27" => Self::HeavySnow,
            "28" => Self::ThunderShowerNight,
            "29" => Self::ThunderShowerDay,
            "30" => Self::Thunder,
            _ => return None,
        };
        Some(weather)
    }

    /// English description shown on the page
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::NotAvailable => "Not available",
            Self::ClearNight => "Clear night",
            Self::SunnyDay => "Sunny day",
            Self::PartlyCloudyNight | Self::PartlyCloudyDay => "Partly cloudy",
            Self::NotUsed => "Not used",
            Self::Mist => "Mist",
            Self::Fog => "Fog",
            Self::Cloudy => "Cloudy",
            Self::Overcast => "Overcast",
            Self::LightRainShowerNight | Self::LightRainShowerDay => "Light rain shower",
            Self::Drizzle => "Drizzle",
            Self::LightRain => "Light rain",
            Self::HeavyRainShowerNight | Self::HeavyRainShowerDay => "Heavy rain shower",
            Self::HeavyRain => "Heavy rain",
            Self::SleetShowerNight | Self::SleetShowerDay => "Sleet shower",
            Self::Sleet => "Sleet",
            Self::HailShowerNight | Self::HailShowerDay => "Hail shower",
            Self::Hail => "Hail",
            Self::LightSnowShowerNight | Self::LightSnowShowerDay => "Light snow shower",
            Self::LightSnow => "Light snow",
            Self::HeavySnowShowerNight | Self::HeavySnowShowerDay => "Heavy snow shower",
            Self::HeavySnow => "Heavy snow",
            Self::ThunderShowerNight | Self::ThunderShowerDay => "Thunder shower",
            Self::Thunder => "Thunder",
        }
    }
}

impl FromStr for WeatherType {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| ForecastError::UnknownWeatherType(s.to_string()))
    }
}

impl fmt::Display for WeatherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// 16-point compass label used by DataPoint for wind direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CompassPoint {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

impl CompassPoint {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::N => "N",
            Self::NNE => "NNE",
            Self::NE => "NE",
            Self::ENE => "ENE",
            Self::E => "E",
            Self::ESE => "ESE",
            Self::SE => "SE",
            Self::SSE => "SSE",
            Self::S => "S",
            Self::SSW => "SSW",
            Self::SW => "SW",
            Self::WSW => "WSW",
            Self::W => "W",
            Self::WNW => "WNW",
            Self::NW => "NW",
            Self::NNW => "NNW",
        }
    }
}

impl FromStr for CompassPoint {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let point = match s {
            "N" => Self::N,
            "NNE" => Self::NNE,
            "NE" => Self::NE,
            "ENE" => Self::ENE,
            "E" => Self::E,
            "ESE" => Self::ESE,
            "SE" => Self::SE,
            "SSE" => Self::SSE,
            "S" => Self::S,
            "SSW" => Self::SSW,
            "SW" => Self::SW,
            "WSW" => Self::WSW,
            "W" => Self::W,
            "WNW" => Self::WNW,
            "NW" => Self::NW,
            "NNW" => Self::NNW,
            _ => return Err(ForecastError::UnknownCompassPoint(s.to_string())),
        };
        Ok(point)
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
