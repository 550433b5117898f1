//! Presentation helpers for the forecast page
//!
//! All functions are pure; "today" is always passed in by the caller.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::Result;
use crate::models::{TimeSlot, WeatherType};

/// "Today" for the current date, otherwise the full weekday name
#[must_use]
pub fn day_label(date: NaiveDate, today: NaiveDate) -> &'static str {
    if date == today {
        return "Today";
    }
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// English ordinal suffix; 11th to 13th are irregular
#[must_use]
pub fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

#[must_use]
pub fn ordinal(day: u32) -> String {
    format!("{day}{}", ordinal_suffix(day))
}

/// e.g. "3rd April"
#[must_use]
pub fn ordinal_date(date: NaiveDate) -> String {
    format!("{} {}", ordinal(date.day()), date.format("%B"))
}

/// Human range for a provider time code; anything outside daylight is an error
pub fn format_time(time_code: &str) -> Result<&'static str> {
    Ok(time_code.parse::<TimeSlot>()?.label())
}

/// Description for a provider weather type code; unknown codes are an error
pub fn condition(code: &str) -> Result<&'static str> {
    Ok(code.parse::<WeatherType>()?.description())
}
