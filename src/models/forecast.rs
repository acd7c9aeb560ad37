//! Weather snapshot model: current reading plus hourly and daily series

use super::{HourlyReading, Reading};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Daily aggregate from the forecast source
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    /// Maximum temperature in Celsius
    pub temperature_max: Option<f64>,
    /// Minimum temperature in Celsius
    pub temperature_min: Option<f64>,
    /// Maximum precipitation probability (0-100)
    pub precipitation_probability_max: Option<f64>,
    /// Maximum wind speed in km/h
    pub wind_speed_max: Option<f64>,
    /// Maximum UV index
    pub uv_index_max: Option<f64>,
    /// WMO weather code
    pub weather_code: Option<u8>,
    /// Sunrise, when it could be computed for the location
    pub sunrise: Option<DateTime<Utc>>,
    /// Sunset, when it could be computed for the location
    pub sunset: Option<DateTime<Utc>>,
}

/// Normalized forecast for one location
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherSnapshot {
    /// Reading at the hourly index nearest to retrieval time
    pub current: Option<Reading>,
    /// Timestamp of the hour `current` was taken from
    pub current_time: Option<DateTime<Utc>>,
    /// Hourly series, sorted by timestamp
    pub hourly: Vec<HourlyReading>,
    /// Daily series, sorted by date
    pub daily: Vec<DailyAggregate>,
    /// When this snapshot was built
    pub retrieved_at: DateTime<Utc>,
    /// Offset of the location's local time from UTC; daily dates are local
    #[serde(default)]
    pub utc_offset_seconds: i64,
}

impl WeatherSnapshot {
    /// Build a snapshot, taking `current` from the hour nearest to `now`
    #[must_use]
    pub fn from_series(
        mut hourly: Vec<HourlyReading>,
        mut daily: Vec<DailyAggregate>,
        now: DateTime<Utc>,
    ) -> Self {
        hourly.sort_by_key(|h| h.timestamp);
        daily.sort_by_key(|d| d.date);

        let nearest = hourly
            .iter()
            .min_by_key(|h| (h.timestamp - now).num_seconds().abs());

        Self {
            current: nearest.map(|h| h.reading.clone()),
            current_time: nearest.map(|h| h.timestamp),
            hourly,
            daily,
            retrieved_at: now,
            utc_offset_seconds: 0,
        }
    }

    /// Set the location's offset from UTC
    #[must_use]
    pub fn with_utc_offset(mut self, seconds: i64) -> Self {
        self.utc_offset_seconds = seconds;
        self
    }

    /// Wall-clock time at the location
    #[must_use]
    pub fn local_time(&self, time: DateTime<Utc>) -> NaiveDateTime {
        (time + Duration::seconds(self.utc_offset_seconds)).naive_utc()
    }

    /// Calendar date at the location
    #[must_use]
    pub fn local_date(&self, time: DateTime<Utc>) -> NaiveDate {
        self.local_time(time).date()
    }

    /// Current reading, or an empty one when the hourly series was empty
    #[must_use]
    pub fn current_or_default(&self) -> Reading {
        self.current.clone().unwrap_or_default()
    }

    /// The next `count` hours starting at the current hour
    #[must_use]
    pub fn upcoming_hours(&self, now: DateTime<Utc>, count: usize) -> Vec<&HourlyReading> {
        let start = now - Duration::minutes(30);
        self.hourly
            .iter()
            .filter(|h| h.timestamp >= start)
            .take(count)
            .collect()
    }

    /// Hourly readings between sunrise and sunset of `date`.
    ///
    /// Falls back to 06:00-20:00 local time when no solar times are known for the day.
    #[must_use]
    pub fn daylight_hours(&self, date: NaiveDate) -> Vec<&HourlyReading> {
        let day = self.daily.iter().find(|d| d.date == date);
        let window = day.and_then(|d| d.sunrise.zip(d.sunset));

        match window {
            Some((sunrise, sunset)) => self
                .hourly
                .iter()
                .filter(|h| h.timestamp >= sunrise && h.timestamp <= sunset)
                .collect(),
            None => self
                .hourly
                .iter()
                .filter(|h| {
                    let local = self.local_time(h.timestamp);
                    local.date() == date && (6..=20).contains(&local.hour())
                })
                .collect(),
        }
    }
}
