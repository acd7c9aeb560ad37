//! Weather reading model and display helpers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single normalized weather reading.
///
/// Every field is optional: the forecast source may omit any series, and
/// consumers substitute their own neutral default.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Reading {
    /// Temperature in Celsius
    pub temperature: Option<f64>,
    /// Relative humidity percentage (0-100)
    pub humidity: Option<f64>,
    /// Wind speed in km/h
    pub wind_speed_kmh: Option<f64>,
    /// Direction the wind blows from, degrees (0-359, where 0 is North)
    pub wind_direction: Option<f64>,
    /// Precipitation amount in mm
    pub precipitation: Option<f64>,
    /// Precipitation probability percentage (0-100)
    pub precipitation_probability: Option<f64>,
    /// Visibility in meters
    pub visibility_m: Option<f64>,
    /// Cloud cover percentage (0-100)
    pub cloud_cover: Option<f64>,
    /// UV index
    pub uv_index: Option<f64>,
    /// WMO weather code
    pub weather_code: Option<u8>,
}

/// One hour of the hourly series
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HourlyReading {
    pub timestamp: DateTime<Utc>,
    pub reading: Reading,
}

impl Reading {
    /// Visibility in kilometers, `None` when unknown
    #[must_use]
    pub fn visibility_km(&self) -> Option<f64> {
        self.visibility_m.map(|m| m / 1000.0)
    }

    /// Human-readable description of the weather code
    #[must_use]
    pub fn description(&self) -> &'static str {
        self.weather_code
            .map_or("Unknown", weather_code_to_description)
    }

    /// Convert wind direction from degrees to cardinal direction
    #[must_use]
    pub fn wind_direction_to_cardinal(degrees: f64) -> &'static str {
        let degrees = degrees.rem_euclid(360.0).round() as u16;
        match degrees {
            0..=11 | 349..=360 => "N",
            12..=33 => "NNE",
            34..=56 => "NE",
            57..=78 => "ENE",
            79..=101 => "E",
            102..=123 => "ESE",
            124..=146 => "SE",
            147..=168 => "SSE",
            169..=191 => "S",
            192..=213 => "SSW",
            214..=236 => "SW",
            237..=258 => "WSW",
            259..=281 => "W",
            282..=303 => "WNW",
            304..=326 => "NW",
            327..=348 => "NNW",
            _ => "Unknown",
        }
    }
}

/// Convert WMO weather code to human-readable description
#[must_use]
pub fn weather_code_to_description(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wind_direction_to_cardinal() {
        assert_eq!(Reading::wind_direction_to_cardinal(0.0), "N");
        assert_eq!(Reading::wind_direction_to_cardinal(90.0), "E");
        assert_eq!(Reading::wind_direction_to_cardinal(180.0), "S");
        assert_eq!(Reading::wind_direction_to_cardinal(270.0), "W");
        assert_eq!(Reading::wind_direction_to_cardinal(45.0), "NE");
        assert_eq!(Reading::wind_direction_to_cardinal(-90.0), "W");
        assert_eq!(Reading::wind_direction_to_cardinal(359.7), "N");
    }

    #[test]
    fn test_visibility_km() {
        let reading = Reading {
            visibility_m: Some(12_500.0),
            ..Reading::default()
        };
        assert_eq!(reading.visibility_km(), Some(12.5));
        assert_eq!(Reading::default().visibility_km(), None);
    }

    #[test]
    fn test_description() {
        let reading = Reading {
            weather_code: Some(63),
            ..Reading::default()
        };
        assert_eq!(reading.description(), "Moderate rain");
        assert_eq!(Reading::default().description(), "Unknown");
    }
}
