//! Display-ready forecast, one entry per remaining day and slot
//!
//! Building a view runs every formatter and classifier over the pruned
//! forecast. Unknown weather or time codes fail the whole build rather than
//! being shown with a made-up label.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::Result;
use crate::models::{CompassPoint, Period, RawForecastResponse, Report};
use crate::paragliding::{
    Rating, Reading, classify, day_label, display, ordinal_date, recommend_sites,
};

/// A value with its flyability rating
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rated<T> {
    pub value: T,
    pub rating: Rating,
}

impl<T> Rated<T> {
    fn new(value: T, reading: Reading) -> Self {
        Self {
            value,
            rating: classify(reading),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotView {
    pub time: &'static str,
    pub conditions: Rated<&'static str>,
    pub wind_direction: Rated<CompassPoint>,
    pub wind_speed: Rated<u32>,
    pub gust_strength: Rated<u32>,
    pub gust_difference: Rated<i64>,
    pub precipitation_probability: u32,
    pub temperature: Option<String>,
    pub feels_like: Option<String>,
    pub humidity: Option<String>,
    pub visibility: Option<String>,
    pub uv_index: Option<String>,
    /// Sites that work in this slot's wind direction
    pub sites: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayView {
    pub date: NaiveDate,
    pub day: &'static str,
    pub ordinal_date: String,
    pub slots: Vec<SlotView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastView {
    pub location: Option<String>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub days: Vec<DayView>,
}

impl SlotView {
    pub fn from_report(report: &Report) -> Result<Self> {
        let time = display::format_time(&report.time_code)?;
        let weather = report.weather()?;
        let direction = report.compass_point()?;
        let speed = report.wind_speed_mph()?;
        let gust = report.wind_gust_mph()?;
        let difference = report.gust_difference()?;

        Ok(Self {
            time,
            conditions: Rated::new(weather.description(), Reading::Conditions(weather)),
            wind_direction: Rated::new(direction, Reading::WindDirection(direction)),
            wind_speed: Rated::new(speed, Reading::WindSpeed(speed)),
            gust_strength: Rated::new(gust, Reading::GustStrength(gust)),
            gust_difference: Rated::new(difference, Reading::GustDifference(difference)),
            precipitation_probability: report.precipitation_percent()?,
            temperature: report.temperature.clone(),
            feels_like: report.feels_like.clone(),
            humidity: report.humidity.clone(),
            visibility: report.visibility.clone(),
            uv_index: report.uv_index.clone(),
            sites: recommend_sites(direction)
                .into_iter()
                .map(|site| site.name)
                .collect(),
        })
    }
}

impl DayView {
    pub fn from_period(period: &Period, today: NaiveDate) -> Result<Self> {
        Ok(Self {
            date: period.date,
            day: day_label(period.date, today),
            ordinal_date: ordinal_date(period.date),
            slots: period
                .reports
                .iter()
                .map(SlotView::from_report)
                .collect::<Result<_>>()?,
        })
    }
}

impl ForecastView {
    /// Render an already-pruned forecast
    pub fn build(
        forecast: &RawForecastResponse,
        today: NaiveDate,
        fetched_at: Option<DateTime<Utc>>,
    ) -> Result<Self> {
        Ok(Self {
            location: forecast.location_name().map(str::to_string),
            fetched_at,
            days: forecast
                .periods()
                .iter()
                .map(|period| DayView::from_period(period, today))
                .collect::<Result<_>>()?,
        })
    }

    /// Nothing fetched yet
    #[must_use]
    pub fn empty() -> Self {
        Self {
            location: None,
            fetched_at: None,
            days: Vec::new(),
        }
    }
}
