//! Ride activities and the per-activity scoring parameters

use crate::RideError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Kind of ride being planned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    #[default]
    Road,
    Gravel,
    #[serde(alias = "mountain")]
    Mtb,
}

/// Angle between the prevailing wind and the direction of travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindRelation {
    Headwind,
    Tailwind,
    #[default]
    Crosswind,
}

/// How wind speed turns into a penalty for an activity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindModifier {
    /// Multiplier depends on the rider's wind relation
    Directional,
    /// Same multiplier whatever the direction
    Flat(f64),
}

/// Penalties for the two hot temperature bands
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatPenalties {
    /// Above 30°C up to 35°C
    pub hot: f64,
    /// Above 35°C
    pub extreme: f64,
}

/// Parameters that distinguish one activity's score from another's
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivityProfile {
    pub wind: WindModifier,
    pub heat: HeatPenalties,
    /// Score ceiling applied when humidity reaches 90%
    pub humidity_cap: f64,
}

impl Activity {
    pub const ALL: [Activity; 3] = [Activity::Road, Activity::Gravel, Activity::Mtb];

    #[must_use]
    pub fn profile(self) -> ActivityProfile {
        match self {
            Activity::Road => ActivityProfile {
                wind: WindModifier::Directional,
                heat: HeatPenalties {
                    hot: 3.0,
                    extreme: 6.0,
                },
                humidity_cap: 4.0,
            },
            Activity::Gravel => ActivityProfile {
                wind: WindModifier::Flat(1.5),
                heat: HeatPenalties {
                    hot: 4.0,
                    extreme: 7.0,
                },
                humidity_cap: 3.5,
            },
            Activity::Mtb => ActivityProfile {
                wind: WindModifier::Flat(1.0),
                heat: HeatPenalties {
                    hot: 4.0,
                    extreme: 7.0,
                },
                humidity_cap: 3.5,
            },
        }
    }

    /// Whether the wind relation changes this activity's score
    #[must_use]
    pub fn uses_wind_relation(self) -> bool {
        matches!(self.profile().wind, WindModifier::Directional)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Activity::Road => "Road cycling",
            Activity::Gravel => "Gravel riding",
            Activity::Mtb => "Mountain biking",
        }
    }
}

impl WindRelation {
    /// Multiplier applied to the base wind penalty on directional activities
    #[must_use]
    pub fn multiplier(self) -> f64 {
        match self {
            WindRelation::Headwind => 1.3,
            WindRelation::Tailwind => 0.7,
            WindRelation::Crosswind => 1.0,
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activity::Road => write!(f, "road"),
            Activity::Gravel => write!(f, "gravel"),
            Activity::Mtb => write!(f, "mtb"),
        }
    }
}

impl fmt::Display for WindRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindRelation::Headwind => write!(f, "headwind"),
            WindRelation::Tailwind => write!(f, "tailwind"),
            WindRelation::Crosswind => write!(f, "crosswind"),
        }
    }
}

impl FromStr for Activity {
    type Err = RideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "road" => Ok(Activity::Road),
            "gravel" => Ok(Activity::Gravel),
            "mtb" | "mountain" | "mountain-bike" => Ok(Activity::Mtb),
            other => Err(RideError::validation(format!(
                "Unknown activity '{other}'. Must be one of: road, gravel, mtb"
            ))),
        }
    }
}

impl FromStr for WindRelation {
    type Err = RideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "headwind" | "head" => Ok(WindRelation::Headwind),
            "tailwind" | "tail" => Ok(WindRelation::Tailwind),
            "crosswind" | "cross" => Ok(WindRelation::Crosswind),
            other => Err(RideError::validation(format!(
                "Unknown wind relation '{other}'. Must be one of: headwind, tailwind, crosswind"
            ))),
        }
    }
}
