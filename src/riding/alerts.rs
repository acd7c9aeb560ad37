//! Safety alerts for the current conditions, independent of activity

use crate::models::{Reading, WeatherSnapshot};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Wind,
    Visibility,
    Wet,
    Cold,
    Heat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Moderate,
    High,
}

/// Only `Serialize`: messages are static advisory texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub message: &'static str,
}

const WIND_ALERT_KMH: f64 = 25.0;
const WIND_HIGH_KMH: f64 = 40.0;
const LOW_VISIBILITY_M: f64 = 2000.0;
const WET_PROBABILITY_PCT: f64 = 60.0;
const FREEZING_C: f64 = 0.0;
const HEAT_C: f64 = 35.0;

/// Alerts for the snapshot's current reading
#[must_use]
pub fn alerts_for(snapshot: &WeatherSnapshot) -> Vec<Alert> {
    snapshot
        .current
        .as_ref()
        .map(alerts_for_reading)
        .unwrap_or_default()
}

/// Alerts for a single reading, in wind, visibility, wet, cold, heat order.
///
/// A missing field never raises its alert.
#[must_use]
pub fn alerts_for_reading(reading: &Reading) -> Vec<Alert> {
    [
        wind_alert(reading),
        visibility_alert(reading),
        wet_alert(reading),
        cold_alert(reading),
        heat_alert(reading),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn wind_alert(reading: &Reading) -> Option<Alert> {
    let wind = reading.wind_speed_kmh.filter(|w| *w >= WIND_ALERT_KMH)?;
    let severity = if wind >= WIND_HIGH_KMH {
        AlertSeverity::High
    } else {
        AlertSeverity::Moderate
    };
    Some(Alert {
        kind: AlertKind::Wind,
        severity,
        message: "Strong winds. Expect gusts and difficult handling.",
    })
}

fn visibility_alert(reading: &Reading) -> Option<Alert> {
    reading.visibility_m.filter(|v| *v < LOW_VISIBILITY_M)?;
    Some(Alert {
        kind: AlertKind::Visibility,
        severity: AlertSeverity::Moderate,
        message: "Low visibility. Use front and rear lights.",
    })
}

fn wet_alert(reading: &Reading) -> Option<Alert> {
    let raining = reading.precipitation.is_some_and(|p| p > 0.0);
    let likely = reading
        .precipitation_probability
        .is_some_and(|p| p > WET_PROBABILITY_PCT);
    if !(raining || likely) {
        return None;
    }
    Some(Alert {
        kind: AlertKind::Wet,
        severity: AlertSeverity::Moderate,
        message: "Wet roads likely. Brake early and watch for slick surfaces.",
    })
}

fn cold_alert(reading: &Reading) -> Option<Alert> {
    reading.temperature.filter(|t| *t <= FREEZING_C)?;
    Some(Alert {
        kind: AlertKind::Cold,
        severity: AlertSeverity::High,
        message: "Freezing temperatures. Watch for ice and dress in layers.",
    })
}

fn heat_alert(reading: &Reading) -> Option<Alert> {
    reading.temperature.filter(|t| *t >= HEAT_C)?;
    Some(Alert {
        kind: AlertKind::Heat,
        severity: AlertSeverity::High,
        message: "Extreme heat. Risk of heat exhaustion, hydrate and avoid midday.",
    })
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSeverity::Moderate => write!(f, "moderate"),
            AlertSeverity::High => write!(f, "high"),
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertKind::Wind => write!(f, "wind"),
            AlertKind::Visibility => write!(f, "visibility"),
            AlertKind::Wet => write!(f, "wet"),
            AlertKind::Cold => write!(f, "cold"),
            AlertKind::Heat => write!(f, "heat"),
        }
    }
}
