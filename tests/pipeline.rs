//! End-to-end pruning, formatting and rating of a fixed three-day forecast

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone};
use chrono_tz::{Europe::London, Tz};
use downland_forecast::paragliding::{
    Rating, classify_named, prune_stale, recommend_sites_for_label,
};
use downland_forecast::{
    Credentials, ForecastService, ForecastSource, Moment, RawForecastResponse, Result,
};
use serde_json::{Value, json};

fn rep(code: &str, direction: &str, speed: &str, gust: &str, weather: &str) -> Value {
    json!({"$": code, "D": direction, "S": speed, "G": gust, "Pp": "5", "W": weather, "T": "12"})
}

/// Yesterday, today and tomorrow, each with night and daylight reports
fn fixture() -> Value {
    json!({"SiteRep": {
        "Wx": {"Param": []},
        "DV": {"dataDate": "2024-04-03T09:00:00Z", "type": "Forecast", "Location": {
            "i": "351611", "name": "LEWES", "lat": "50.873", "lon": "0.0097", "elevation": "5.0",
            "Period": [
                {"type": "Day", "value": "2024-04-02Z", "Rep": [
                    rep("540", "N", "8", "12", "1"),
                    rep("720", "N", "9", "13", "1")
                ]},
                {"type": "Day", "value": "2024-04-03Z", "Rep": [
                    rep("0", "NE", "5", "9", "0"),
                    rep("180", "NE", "5", "9", "0"),
                    rep("360", "NE", "6", "10", "2"),
                    rep("540", "E", "7", "11", "3"),
                    rep("720", "SE", "9", "13", "7"),
                    rep("900", "SSW", "12", "19", "12"),
                    rep("1080", "W", "15", "24", "15"),
                    rep("1260", "W", "14", "22", "2")
                ]},
                {"type": "Day", "value": "2024-04-04Z", "Rep": [
                    rep("0", "N", "4", "7", "0"),
                    rep("360", "N", "4", "7", "1"),
                    rep("720", "NNE", "10", "14", "1"),
                    rep("1260", "N", "6", "9", "0")
                ]}
            ]
        }}
    }})
}

fn now() -> DateTime<Tz> {
    // 13:30, inside the 12-3pm slot
    London.with_ymd_and_hms(2024, 4, 3, 13, 30, 0).unwrap()
}

fn moment() -> Moment {
    Moment::from_datetime(now().naive_local())
}

fn kept(forecast: &RawForecastResponse) -> Vec<(String, Vec<String>)> {
    forecast
        .periods()
        .iter()
        .map(|period| {
            (
                period.date.to_string(),
                period.reports.iter().map(|r| r.time_code.clone()).collect(),
            )
        })
        .collect()
}

fn expected() -> Vec<(String, Vec<String>)> {
    vec![
        (
            "2024-04-03".to_string(),
            vec!["720".to_string(), "900".to_string(), "1080".to_string()],
        ),
        ("2024-04-04".to_string(), vec!["360".to_string(), "720".to_string()]),
    ]
}

#[test]
fn test_prune_keeps_only_remaining_daylight_slots() {
    let mut forecast = RawForecastResponse::from_value(fixture()).unwrap();
    let summary = prune_stale(&mut forecast, moment());

    assert_eq!(kept(&forecast), expected());
    assert_eq!(summary.periods_removed, 1);
    assert_eq!(summary.reports_removed, 9);
}

#[test]
fn test_prune_is_idempotent_for_fixed_moment() {
    let mut forecast = RawForecastResponse::from_value(fixture()).unwrap();
    prune_stale(&mut forecast, moment());
    let once = forecast.clone();

    let summary = prune_stale(&mut forecast, moment());
    assert_eq!(forecast, once);
    assert_eq!(summary.periods_removed, 0);
    assert_eq!(summary.reports_removed, 0);
}

#[test]
fn test_retained_reports_rate_as_expected() {
    let mut forecast = RawForecastResponse::from_value(fixture()).unwrap();
    prune_stale(&mut forecast, moment());

    let afternoon = &forecast.periods()[0].reports[1];
    assert_eq!(afternoon.time_code, "900");
    let rate = |attribute: &str, value: &str| classify_named(attribute, value).unwrap();
    assert_eq!(rate("wind_direction", &afternoon.wind_direction), Some(Rating::Positive));
    assert_eq!(rate("gust_strength", &afternoon.wind_gust), Some(Rating::Negative));
    assert_eq!(rate("conditions", &afternoon.weather_type), Some(Rating::Negative));
    assert_eq!(classify_named("cloud_base", "3000").unwrap(), None);

    let names: Vec<&str> = recommend_sites_for_label(&afternoon.wind_direction)
        .unwrap()
        .into_iter()
        .map(|site| site.name)
        .collect();
    assert_eq!(names, vec!["Caburn", "Newhaven Cliffs"]);
}

struct FixtureSource;

#[async_trait]
impl ForecastSource for FixtureSource {
    async fn fetch(&self, _credentials: &Credentials) -> Result<Value> {
        Ok(fixture())
    }
}

#[tokio::test]
async fn test_service_serves_pruned_view() {
    let service = ForecastService::new(
        Arc::new(FixtureSource),
        Credentials::new("test-key", "351611"),
        chrono::Duration::minutes(30),
    );

    let view = service.view(now()).await.unwrap();

    assert_eq!(view.location.as_deref(), Some("LEWES"));
    let days: Vec<(&str, &str)> = view
        .days
        .iter()
        .map(|day| (day.day, day.ordinal_date.as_str()))
        .collect();
    assert_eq!(days, vec![("Today", "3rd April"), ("Thursday", "4th April")]);

    let times: Vec<&str> = view.days[0].slots.iter().map(|slot| slot.time).collect();
    assert_eq!(times, vec!["12-3pm", "3-6pm", "6-9pm"]);

    let evening = &view.days[0].slots[2];
    assert_eq!(evening.conditions.value, "Heavy rain");
    assert_eq!(evening.wind_direction.rating, Rating::Negative);
    assert!(evening.sites.is_empty());

    let morning = &view.days[1].slots[0];
    assert_eq!(morning.wind_speed.rating, Rating::Positive);
    assert_eq!(morning.sites, vec!["Devils Dyke", "Ditchling", "Firle", "Truleigh"]);
}
