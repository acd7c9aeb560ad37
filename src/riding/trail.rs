//! Recent rainfall, gravel mud factor and mountain bike trail readiness

use crate::models::{HourlyReading, WeatherSnapshot};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Window used for the gravel mud factor
pub const MUD_WINDOW_HOURS: i64 = 48;
/// Window used for mountain bike trail readiness
pub const TRAIL_WINDOW_HOURS: i64 = 72;

/// Total precipitation (mm) in the hours `(now - window, now]`.
///
/// Hours with no usable precipitation value are skipped.
#[must_use]
pub fn recent_precipitation(hourly: &[HourlyReading], now: DateTime<Utc>, window: Duration) -> f64 {
    let start = now - window;
    hourly
        .iter()
        .filter(|h| h.timestamp > start && h.timestamp <= now)
        .filter_map(|h| h.reading.precipitation)
        .filter(|p| p.is_finite())
        .sum()
}

/// 0 (dry) to 3 (very muddy) from the recent rainfall total
#[must_use]
pub fn mud_factor(precipitation_mm: f64) -> u8 {
    match precipitation_mm {
        p if p < 3.0 => 0,
        p if p < 10.0 => 1,
        p if p < 20.0 => 2,
        _ => 3,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrailCondition {
    /// readiness >= 80
    Prime,
    /// readiness >= 60
    Good,
    /// readiness >= 40
    Soft,
    /// readiness < 40
    Muddy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailReadiness {
    /// 0 to 100
    pub readiness: u8,
    pub condition: TrailCondition,
    /// Rainfall over the trail window, mm
    pub recent_precipitation_mm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MudReport {
    pub mud_factor: u8,
    /// Rainfall over the mud window, mm
    pub recent_precipitation_mm: f64,
}

/// Gravel mud factor from the last 48 hours of rain
#[must_use]
pub fn mud_report(snapshot: &WeatherSnapshot, now: DateTime<Utc>) -> MudReport {
    let rain = recent_precipitation(&snapshot.hourly, now, Duration::hours(MUD_WINDOW_HOURS));
    MudReport {
        mud_factor: mud_factor(rain),
        recent_precipitation_mm: rain,
    }
}

/// Trail readiness from the last 72 hours of rain plus current humidity and wind
#[must_use]
pub fn trail_readiness(snapshot: &WeatherSnapshot, now: DateTime<Utc>) -> TrailReadiness {
    let rain = recent_precipitation(&snapshot.hourly, now, Duration::hours(TRAIL_WINDOW_HOURS));
    let current = snapshot.current_or_default();

    let rain_penalty = match rain {
        r if r > 30.0 => 60,
        r if r > 15.0 => 40,
        r if r > 5.0 => 20,
        _ => 0,
    };
    let humidity_penalty = if current.humidity.is_some_and(|h| h > 80.0) { 10 } else { 0 };
    let wind_penalty = if current.wind_speed_kmh.is_some_and(|w| w > 30.0) { 10 } else { 0 };

    let readiness = 100u8.saturating_sub(rain_penalty + humidity_penalty + wind_penalty);

    TrailReadiness {
        readiness,
        condition: TrailCondition::from_readiness(readiness),
        recent_precipitation_mm: rain,
    }
}

impl TrailCondition {
    #[must_use]
    pub fn from_readiness(readiness: u8) -> Self {
        match readiness {
            80.. => TrailCondition::Prime,
            60..=79 => TrailCondition::Good,
            40..=59 => TrailCondition::Soft,
            _ => TrailCondition::Muddy,
        }
    }
}

impl fmt::Display for TrailCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrailCondition::Prime => write!(f, "Prime, trails should be fast and dry"),
            TrailCondition::Good => write!(f, "Good, a few damp sections"),
            TrailCondition::Soft => write!(f, "Soft, expect mud in shaded spots"),
            TrailCondition::Muddy => write!(f, "Muddy, consider letting the trails dry"),
        }
    }
}
