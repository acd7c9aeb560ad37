//! `OpenMeteo` API response structures and conversion utilities

use super::sun_times;
use crate::models::{DailyAggregate, HourlyReading, Reading, WeatherSnapshot};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use tracing::warn;

/// Parameter set for one forecast request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastParams {
    pub hourly: &'static str,
    pub daily: &'static str,
}

/// Everything the advisor can use
pub const FULL_PARAMS: ForecastParams = ForecastParams {
    hourly: "temperature_2m,relative_humidity_2m,wind_speed_10m,wind_direction_10m,precipitation,precipitation_probability,weather_code,visibility,cloud_cover,uv_index",
    daily: "weather_code,temperature_2m_max,temperature_2m_min,precipitation_probability_max,wind_speed_10m_max,uv_index_max",
};

/// Fallback when the full request is rejected
pub const REDUCED_PARAMS: ForecastParams = ForecastParams {
    hourly: "temperature_2m,relative_humidity_2m,wind_speed_10m,wind_direction_10m,precipitation,weather_code",
    daily: "weather_code,temperature_2m_max,temperature_2m_min",
};

pub const PAST_DAYS: u8 = 2;
pub const FORECAST_DAYS: u8 = 7;

/// Forecast response from `OpenMeteo`
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub latitude: f64,
    pub longitude: f64,
    /// Offset of the local times in `hourly.time` and `daily.time`
    #[serde(default)]
    pub utc_offset_seconds: i64,
    pub hourly: Option<HourlyData>,
    pub daily: Option<DailyData>,
}

/// Hourly series. A series missing from the request is an empty vector.
#[derive(Debug, Deserialize, Default)]
pub struct HourlyData {
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m", default)]
    pub temperature: Vec<Option<f64>>,
    #[serde(rename = "relative_humidity_2m", default)]
    pub humidity: Vec<Option<f64>>,
    #[serde(rename = "wind_speed_10m", default)]
    pub wind_speed: Vec<Option<f64>>,
    #[serde(rename = "wind_direction_10m", default)]
    pub wind_direction: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_probability: Vec<Option<f64>>,
    #[serde(default)]
    pub weather_code: Vec<Option<u8>>,
    #[serde(default)]
    pub visibility: Vec<Option<f64>>,
    #[serde(default)]
    pub cloud_cover: Vec<Option<f64>>,
    #[serde(default)]
    pub uv_index: Vec<Option<f64>>,
}

/// Daily series
#[derive(Debug, Deserialize, Default)]
pub struct DailyData {
    pub time: Vec<String>,
    #[serde(default)]
    pub weather_code: Vec<Option<u8>>,
    #[serde(rename = "temperature_2m_max", default)]
    pub temperature_max: Vec<Option<f64>>,
    #[serde(rename = "temperature_2m_min", default)]
    pub temperature_min: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_probability_max: Vec<Option<f64>>,
    #[serde(rename = "wind_speed_10m_max", default)]
    pub wind_speed_max: Vec<Option<f64>>,
    #[serde(default)]
    pub uv_index_max: Vec<Option<f64>>,
}

fn at<T: Copy>(series: &[Option<T>], i: usize) -> Option<T> {
    series.get(i).copied().flatten()
}

impl HourlyData {
    fn readings(&self, utc_offset: Duration) -> Vec<HourlyReading> {
        self.time
            .iter()
            .enumerate()
            .filter_map(|(i, time)| {
                let local = match NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M") {
                    Ok(local) => local,
                    Err(e) => {
                        warn!("Skipping hourly entry with bad timestamp '{}': {}", time, e);
                        return None;
                    }
                };

                Some(HourlyReading {
                    timestamp: (local - utc_offset).and_utc(),
                    reading: Reading {
                        temperature: at(&self.temperature, i),
                        humidity: at(&self.humidity, i),
                        wind_speed_kmh: at(&self.wind_speed, i),
                        wind_direction: at(&self.wind_direction, i),
                        precipitation: at(&self.precipitation, i),
                        precipitation_probability: at(&self.precipitation_probability, i),
                        visibility_m: at(&self.visibility, i),
                        cloud_cover: at(&self.cloud_cover, i),
                        uv_index: at(&self.uv_index, i),
                        weather_code: at(&self.weather_code, i),
                    },
                })
            })
            .collect()
    }
}

impl DailyData {
    fn aggregates(&self, latitude: f64, longitude: f64) -> Vec<DailyAggregate> {
        self.time
            .iter()
            .enumerate()
            .filter_map(|(i, time)| {
                let date = match NaiveDate::parse_from_str(time, "%Y-%m-%d") {
                    Ok(date) => date,
                    Err(e) => {
                        warn!("Skipping daily entry with bad date '{}': {}", time, e);
                        return None;
                    }
                };
                let sun = sun_times(latitude, longitude, date);

                Some(DailyAggregate {
                    date,
                    temperature_max: at(&self.temperature_max, i),
                    temperature_min: at(&self.temperature_min, i),
                    precipitation_probability_max: at(&self.precipitation_probability_max, i),
                    wind_speed_max: at(&self.wind_speed_max, i),
                    uv_index_max: at(&self.uv_index_max, i),
                    weather_code: at(&self.weather_code, i),
                    sunrise: sun.map(|(rise, _)| rise),
                    sunset: sun.map(|(_, set)| set),
                })
            })
            .collect()
    }
}

impl ForecastResponse {
    /// Normalize into a snapshot whose current reading is the hour nearest `now`
    #[must_use]
    pub fn into_snapshot(self, now: DateTime<Utc>) -> WeatherSnapshot {
        let offset = Duration::seconds(self.utc_offset_seconds);
        let hourly = self
            .hourly
            .map(|h| h.readings(offset))
            .unwrap_or_default();
        let daily = self
            .daily
            .map(|d| d.aggregates(self.latitude, self.longitude))
            .unwrap_or_default();

        WeatherSnapshot::from_series(hourly, daily, now)
            .with_utc_offset(self.utc_offset_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SAMPLE: &str = r#"{
        "latitude": 41.98,
        "longitude": 2.82,
        "utc_offset_seconds": 7200,
        "hourly": {
            "time": ["2024-06-01T10:00", "2024-06-01T11:00", "not-a-time", "2024-06-01T12:00"],
            "temperature_2m": [18.5, 20.1, 0.0, null],
            "relative_humidity_2m": [55, 50, 0, 48],
            "wind_speed_10m": [8.2, 12.0, 0.0, 14.5],
            "wind_direction_10m": [180, 190, 0, 200],
            "precipitation": [0.0, 0.0, 0.0, 0.1],
            "weather_code": [1, 2, 0, 61]
        },
        "daily": {
            "time": ["2024-06-01"],
            "weather_code": [61],
            "temperature_2m_max": [24.0],
            "temperature_2m_min": [14.0]
        }
    }"#;

    #[test]
    fn test_convert_sample_response() {
        let response: ForecastResponse = serde_json::from_str(SAMPLE).unwrap();
        // 09:10 UTC is 11:10 local
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 9, 10, 0).unwrap();

        let snapshot = response.into_snapshot(now);

        assert_eq!(snapshot.hourly.len(), 3);
        assert_eq!(snapshot.utc_offset_seconds, 7200);
        assert_eq!(
            snapshot.hourly[0].timestamp,
            Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
        );

        let current = snapshot.current.unwrap();
        assert_eq!(current.temperature, Some(20.1));
        assert_eq!(current.humidity, Some(50.0));
        assert_eq!(current.weather_code, Some(2));
        assert_eq!(current.uv_index, None);
        assert_eq!(current.visibility_m, None);

        assert_eq!(snapshot.hourly[2].reading.temperature, None);
        assert_eq!(snapshot.hourly[2].reading.precipitation, Some(0.1));
    }

    #[test]
    fn test_daily_aggregates_have_sun_times() {
        let response: ForecastResponse = serde_json::from_str(SAMPLE).unwrap();
        let snapshot = response.into_snapshot(Utc::now());

        assert_eq!(snapshot.daily.len(), 1);
        let day = &snapshot.daily[0];
        assert_eq!(day.temperature_max, Some(24.0));
        assert_eq!(day.uv_index_max, None);
        assert!(day.sunrise.is_some());
        assert!(day.sunset.is_some());
    }

    #[test]
    fn test_missing_series_yield_empty_snapshot() {
        let response: ForecastResponse =
            serde_json::from_str(r#"{"latitude": 0.0, "longitude": 0.0}"#).unwrap();
        let snapshot = response.into_snapshot(Utc::now());

        assert!(snapshot.hourly.is_empty());
        assert!(snapshot.daily.is_empty());
        assert!(snapshot.current.is_none());
    }
}
