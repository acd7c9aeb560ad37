//! Display-only unit conversions. Scoring always works in metric.

use crate::RideError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// The other unit system
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            UnitSystem::Metric => UnitSystem::Imperial,
            UnitSystem::Imperial => UnitSystem::Metric,
        }
    }

    #[must_use]
    pub fn format_temperature(self, celsius: Option<f64>) -> String {
        match (self, celsius) {
            (_, None) => "--".to_string(),
            (UnitSystem::Metric, Some(c)) => format!("{c:.0}°C"),
            (UnitSystem::Imperial, Some(c)) => format!("{:.0}°F", c * 9.0 / 5.0 + 32.0),
        }
    }

    #[must_use]
    pub fn format_speed(self, kmh: Option<f64>) -> String {
        match (self, kmh) {
            (_, None) => "--".to_string(),
            (UnitSystem::Metric, Some(v)) => format!("{v:.0} km/h"),
            (UnitSystem::Imperial, Some(v)) => format!("{:.0} mph", v * 0.621_371),
        }
    }

    /// Format a visibility given in meters
    #[must_use]
    pub fn format_distance(self, meters: Option<f64>) -> String {
        match (self, meters) {
            (_, None) => "--".to_string(),
            (UnitSystem::Metric, Some(m)) => format!("{:.1} km", m / 1000.0),
            (UnitSystem::Imperial, Some(m)) => format!("{:.1} mi", m / 1609.344),
        }
    }

    #[must_use]
    pub fn format_precipitation(self, mm: Option<f64>) -> String {
        match (self, mm) {
            (_, None) => "--".to_string(),
            (UnitSystem::Metric, Some(v)) => format!("{v:.1} mm"),
            (UnitSystem::Imperial, Some(v)) => format!("{:.2} in", v / 25.4),
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Metric => write!(f, "metric"),
            UnitSystem::Imperial => write!(f, "imperial"),
        }
    }
}

impl FromStr for UnitSystem {
    type Err = RideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "si" => Ok(UnitSystem::Metric),
            "imperial" | "us" => Ok(UnitSystem::Imperial),
            other => Err(RideError::validation(format!(
                "Unknown unit system '{other}'. Must be one of: metric, imperial"
            ))),
        }
    }
}
