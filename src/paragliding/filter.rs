//! Pruning of elapsed and night-time forecast entries
//!
//! The provider returns a rolling multi-day window that includes slots which
//! have already passed. Only daylight slots still ahead (or on a later day)
//! are kept, and days left without any slot are dropped.

use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::models::{Period, RawForecastResponse, Report, TimeSlot};

/// The "now" every date/time decision is made against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moment {
    pub today: NaiveDate,
    /// Minutes elapsed since local midnight (0..1440)
    pub minute_of_day: u32,
}

impl Moment {
    #[must_use]
    pub fn new(today: NaiveDate, minute_of_day: u32) -> Self {
        Self {
            today,
            minute_of_day,
        }
    }

    #[must_use]
    pub fn from_datetime(now: NaiveDateTime) -> Self {
        Self {
            today: now.date(),
            minute_of_day: now.hour() * 60 + now.minute(),
        }
    }
}

/// Counts of what a pruning pass removed
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PruneSummary {
    pub periods_removed: usize,
    pub reports_removed: usize,
}

#[must_use]
pub fn is_not_past_date(date: NaiveDate, moment: Moment) -> bool {
    date >= moment.today
}

/// Whether `slot` on `date` has not fully elapsed
#[must_use]
pub fn is_not_past_time(date: NaiveDate, slot: TimeSlot, moment: Moment) -> bool {
    if date > moment.today {
        return true;
    }
    slot.end_minute() > moment.minute_of_day
}

fn keep_report(report: &Report, date: NaiveDate, moment: Moment) -> bool {
    report
        .slot()
        .is_some_and(|slot| is_not_past_time(date, slot, moment))
}

/// Prune a period list in place, preserving provider order
pub fn prune_periods(periods: &mut Vec<Period>, moment: Moment) -> PruneSummary {
    let mut summary = PruneSummary::default();

    periods.retain_mut(|period| {
        if !is_not_past_date(period.date, moment) {
            summary.periods_removed += 1;
            summary.reports_removed += period.reports.len();
            return false;
        }

        let date = period.date;
        let before = period.reports.len();
        period.reports.retain(|report| keep_report(report, date, moment));
        summary.reports_removed += before - period.reports.len();

        if period.reports.is_empty() {
            summary.periods_removed += 1;
            false
        } else {
            true
        }
    });

    summary
}

/// Prune the cached forecast in place
pub fn prune_stale(forecast: &mut RawForecastResponse, moment: Moment) -> PruneSummary {
    let summary = prune_periods(forecast.periods_mut(), moment);
    tracing::debug!(
        periods_removed = summary.periods_removed,
        reports_removed = summary.reports_removed,
        remaining = forecast.periods().len(),
        "Pruned stale forecast entries"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rstest::rstest;

    const ALL_CODES: [&str; 8] = ["0", "180", "360", "540", "720", "900", "1080", "1260"];

    fn report(code: &str) -> Report {
        Report {
            time_code: code.to_string(),
            wind_direction: "N".to_string(),
            wind_speed: "8".to_string(),
            wind_gust: "12".to_string(),
            precipitation_probability: "5".to_string(),
            weather_type: "1".to_string(),
            temperature: None,
            feels_like: None,
            humidity: None,
            visibility: None,
            uv_index: None,
        }
    }

    fn period(date: NaiveDate, codes: &[&str]) -> Period {
        Period {
            date,
            reports: codes.iter().map(|c| report(c)).collect(),
        }
    }

    fn codes(period: &Period) -> Vec<&str> {
        period.reports.iter().map(|r| r.time_code.as_str()).collect()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 3).unwrap()
    }

    #[test]
    fn test_moment_from_datetime() {
        let now = today().and_hms_opt(13, 45, 59).unwrap();
        let moment = Moment::from_datetime(now);
        assert_eq!(moment.today, today());
        assert_eq!(moment.minute_of_day, 825);
    }

    #[test]
    fn test_past_periods_are_removed() {
        let moment = Moment::new(today(), 0);
        for days_back in 1..=10 {
            let mut periods = vec![period(today() - Duration::days(days_back), &ALL_CODES)];
            prune_periods(&mut periods, moment);
            assert!(periods.is_empty(), "{days_back} days back should be dropped");
        }
    }

    #[test]
    fn test_night_reports_are_removed_on_every_day() {
        let moment = Moment::new(today(), 0);
        for days_ahead in 0..5 {
            let date = today() + Duration::days(days_ahead);
            let mut periods = vec![period(date, &["0", "180", "1260"])];
            prune_periods(&mut periods, moment);
            assert!(periods.is_empty());
        }
    }

    #[test]
    fn test_future_periods_keep_all_daylight_reports() {
        let moment = Moment::new(today(), 1439);
        let mut periods = vec![period(today() + Duration::days(1), &ALL_CODES)];
        prune_periods(&mut periods, moment);
        assert_eq!(codes(&periods[0]), vec!["360", "540", "720", "900", "1080"]);
    }

    #[rstest]
    #[case(360, 538, true)]
    #[case(360, 539, false)]
    #[case(720, 0, true)]
    #[case(720, 898, true)]
    #[case(720, 899, false)]
    #[case(1080, 1258, true)]
    #[case(1080, 1259, false)]
    fn test_today_slot_retained_until_window_ends(
        #[case] start: u32,
        #[case] minute: u32,
        #[case] kept: bool,
    ) {
        let moment = Moment::new(today(), minute);
        let code = start.to_string();
        let mut periods = vec![period(today(), &[code.as_str()])];
        prune_periods(&mut periods, moment);
        assert_eq!(!periods.is_empty(), kept);
    }

    #[test]
    fn test_today_keeps_only_remaining_slots_in_order() {
        // 13:00
        let moment = Moment::new(today(), 780);
        let mut periods = vec![period(today(), &ALL_CODES)];
        let summary = prune_periods(&mut periods, moment);
        assert_eq!(codes(&periods[0]), vec!["720", "900", "1080"]);
        assert_eq!(summary.reports_removed, 5);
        assert_eq!(summary.periods_removed, 0);
    }

    #[test]
    fn test_pruning_is_idempotent() {
        let moment = Moment::new(today(), 600);
        let mut periods = vec![
            period(today() - Duration::days(1), &ALL_CODES),
            period(today(), &ALL_CODES),
            period(today() + Duration::days(1), &ALL_CODES),
        ];
        prune_periods(&mut periods, moment);
        let once = periods.clone();

        let summary = prune_periods(&mut periods, moment);
        assert_eq!(periods, once);
        assert_eq!(summary, PruneSummary::default());
    }

    #[test]
    fn test_day_with_only_elapsed_slots_is_dropped() {
        // 21:30, every daylight window for today is over
        let moment = Moment::new(today(), 1290);
        let mut periods = vec![
            period(today(), &ALL_CODES),
            period(today() + Duration::days(1), &["540"]),
        ];
        let summary = prune_periods(&mut periods, moment);
        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].date, today() + Duration::days(1));
        assert_eq!(summary.periods_removed, 1);
    }
}
