//! Ride quality scoring
//!
//! Turns one weather reading into a 1-10 suitability score for an activity.
//! Every factor subtracts a penalty from a starting value of 10. Saturated
//! humidity caps the running total before visibility and UV are taken off,
//! and extreme heat caps the final result.

use super::activity::{Activity, ActivityProfile, HeatPenalties, WindModifier, WindRelation};
use crate::models::Reading;
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_SCORE: f64 = 10.0;
const MIN_SCORE: f64 = 1.0;
const SATURATED_HUMIDITY: f64 = 90.0;
const EXTREME_HEAT_C: f64 = 35.0;
const EXTREME_HEAT_CAP: f64 = 2.0;
const UV_ADVISORY_INDEX: f64 = 7.0;

/// Metric inputs to the scoring function, with absent values already defaulted
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoringInputs {
    pub wind_speed_kmh: f64,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub visibility_km: f64,
    pub uv_index: f64,
}

impl ScoringInputs {
    /// Absent or non-finite fields become 0
    #[must_use]
    pub fn from_reading(reading: &Reading) -> Self {
        Self {
            wind_speed_kmh: or_zero(reading.wind_speed_kmh),
            temperature_c: or_zero(reading.temperature),
            humidity_pct: or_zero(reading.humidity),
            visibility_km: or_zero(reading.visibility_km()),
            uv_index: or_zero(reading.uv_index),
        }
    }
}

fn or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Amount subtracted from 10 for each factor
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PenaltyBreakdown {
    pub wind_penalty: f64,
    pub temperature_penalty: f64,
    pub humidity_penalty: f64,
    pub visibility_penalty: f64,
    pub uv_penalty: f64,
}

impl PenaltyBreakdown {
    fn rounded(self) -> Self {
        Self {
            wind_penalty: round1(self.wind_penalty),
            temperature_penalty: round1(self.temperature_penalty),
            humidity_penalty: round1(self.humidity_penalty),
            visibility_penalty: round1(self.visibility_penalty),
            uv_penalty: round1(self.uv_penalty),
        }
    }
}

/// Score band used to pick the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RideRating {
    /// score >= 8
    Excellent,
    /// score >= 6
    Good,
    /// score >= 4
    Decent,
    /// score >= 3
    Challenging,
    /// score < 3
    Poor,
}

impl RideRating {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 8.0 => RideRating::Excellent,
            s if s >= 6.0 => RideRating::Good,
            s if s >= 4.0 => RideRating::Decent,
            s if s >= 3.0 => RideRating::Challenging,
            _ => RideRating::Poor,
        }
    }
}

impl fmt::Display for RideRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RideRating::Excellent => write!(f, "Excellent"),
            RideRating::Good => write!(f, "Good"),
            RideRating::Decent => write!(f, "Decent"),
            RideRating::Challenging => write!(f, "Challenging"),
            RideRating::Poor => write!(f, "Poor"),
        }
    }
}

/// Outcome of scoring one reading for one activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub activity: Activity,
    /// 1.0 to 10.0, one decimal
    pub score: f64,
    pub rating: RideRating,
    pub message: String,
    pub breakdown: PenaltyBreakdown,
}

/// Score a weather reading for an activity.
///
/// `wind_relation` only matters for road cycling and defaults to crosswind.
#[must_use]
pub fn score_for_activity(
    activity: Activity,
    reading: &Reading,
    wind_relation: Option<WindRelation>,
) -> ScoreResult {
    score_inputs(activity, &ScoringInputs::from_reading(reading), wind_relation)
}

/// Score already-normalized metric inputs
#[must_use]
pub fn score_inputs(
    activity: Activity,
    inputs: &ScoringInputs,
    wind_relation: Option<WindRelation>,
) -> ScoreResult {
    let profile = activity.profile();
    let relation = wind_relation.unwrap_or_default();

    let breakdown = PenaltyBreakdown {
        wind_penalty: wind_penalty(&profile, inputs.wind_speed_kmh, relation),
        temperature_penalty: temperature_penalty(inputs.temperature_c, &profile.heat),
        humidity_penalty: humidity_penalty(inputs.humidity_pct),
        visibility_penalty: visibility_penalty(inputs.visibility_km),
        uv_penalty: uv_penalty(inputs.uv_index),
    };

    let mut total = MAX_SCORE
        - breakdown.wind_penalty
        - breakdown.temperature_penalty
        - breakdown.humidity_penalty;

    // Visibility and UV still count against a humidity-capped score
    if inputs.humidity_pct >= SATURATED_HUMIDITY {
        total = total.min(profile.humidity_cap);
    }
    total -= breakdown.visibility_penalty + breakdown.uv_penalty;

    if inputs.temperature_c > EXTREME_HEAT_C {
        total = total.min(EXTREME_HEAT_CAP);
    }

    let score = round1(total).clamp(MIN_SCORE, MAX_SCORE);
    let rating = RideRating::from_score(score);

    let mut message = rating_message(activity, rating).to_string();
    if inputs.uv_index >= UV_ADVISORY_INDEX {
        message.push_str(" UV is high: wear sunscreen and cover exposed skin.");
    }

    ScoreResult {
        activity,
        score,
        rating,
        message,
        breakdown: breakdown.rounded(),
    }
}

/// Base wind penalty before any activity multiplier
#[must_use]
pub fn wind_base_penalty(wind_speed_kmh: f64) -> f64 {
    match wind_speed_kmh {
        w if w <= 10.0 => 0.0,
        w if w <= 20.0 => 1.0,
        w if w <= 30.0 => 2.0,
        w if w <= 40.0 => 3.0,
        _ => 4.0,
    }
}

fn wind_penalty(profile: &ActivityProfile, wind_speed_kmh: f64, relation: WindRelation) -> f64 {
    let multiplier = match profile.wind {
        WindModifier::Directional => relation.multiplier(),
        WindModifier::Flat(multiplier) => multiplier,
    };
    wind_base_penalty(wind_speed_kmh) * multiplier
}

#[must_use]
pub fn temperature_penalty(temperature_c: f64, heat: &HeatPenalties) -> f64 {
    match temperature_c {
        t if t > 35.0 => heat.extreme,
        t if t > 30.0 => heat.hot,
        t if t > 25.0 => 1.0,
        t if t >= 15.0 => 0.0,
        t if t >= 10.0 => 1.0,
        t if t >= 5.0 => 2.0,
        _ => 3.0,
    }
}

#[must_use]
pub fn humidity_penalty(humidity_pct: f64) -> f64 {
    match humidity_pct {
        h if h <= 60.0 => 0.0,
        h if h <= 80.0 => 1.0,
        _ => 2.0,
    }
}

#[must_use]
pub fn visibility_penalty(visibility_km: f64) -> f64 {
    match visibility_km {
        v if v >= 10.0 => 0.0,
        v if v >= 5.0 => 1.0,
        v if v >= 2.0 => 2.0,
        _ => 3.0,
    }
}

#[must_use]
pub fn uv_penalty(uv_index: f64) -> f64 {
    match uv_index {
        u if u <= 5.0 => 0.0,
        u if u <= 7.0 => 0.5,
        u if u <= 9.0 => 1.0,
        _ => 1.5,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn rating_message(activity: Activity, rating: RideRating) -> &'static str {
    match (activity, rating) {
        (Activity::Road, RideRating::Excellent) => {
            "Perfect conditions for a road ride! Get out there and enjoy it."
        }
        (Activity::Road, RideRating::Good) => "Good conditions for road cycling.",
        (Activity::Road, RideRating::Decent) => {
            "Decent conditions for road cycling, manageable with the right gear."
        }
        (Activity::Road, RideRating::Challenging) => {
            "Challenging conditions for road cycling. Ride with care."
        }
        (Activity::Road, RideRating::Poor) => {
            "Poor conditions. Road cycling is not recommended right now."
        }
        (Activity::Gravel, RideRating::Excellent) => {
            "Excellent gravel conditions! A great day to explore."
        }
        (Activity::Gravel, RideRating::Good) => "Good conditions for gravel riding.",
        (Activity::Gravel, RideRating::Decent) => {
            "Manageable gravel conditions. Expect some discomfort."
        }
        (Activity::Gravel, RideRating::Challenging) => {
            "Challenging gravel conditions. Consider a shorter loop."
        }
        (Activity::Gravel, RideRating::Poor) => {
            "Poor conditions. Gravel riding is not recommended right now."
        }
        (Activity::Mtb, RideRating::Excellent) => {
            "Excellent trail weather! Time to hit the singletrack."
        }
        (Activity::Mtb, RideRating::Good) => "Good conditions for mountain biking.",
        (Activity::Mtb, RideRating::Decent) => {
            "Decent trail weather, manageable with the right kit."
        }
        (Activity::Mtb, RideRating::Challenging) => {
            "Challenging trail conditions. Stick to terrain you know."
        }
        (Activity::Mtb, RideRating::Poor) => {
            "Poor conditions. Mountain biking is not recommended right now."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn reading(temperature: f64, wind: f64, humidity: f64, visibility_km: f64, uv: f64) -> Reading {
        Reading {
            temperature: Some(temperature),
            humidity: Some(humidity),
            wind_speed_kmh: Some(wind),
            visibility_m: Some(visibility_km * 1000.0),
            uv_index: Some(uv),
            ..Reading::default()
        }
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(10.0, 0.0)]
    #[case(10.1, 1.0)]
    #[case(20.0, 1.0)]
    #[case(30.0, 2.0)]
    #[case(40.0, 3.0)]
    #[case(40.1, 4.0)]
    #[case(90.0, 4.0)]
    fn test_wind_base_penalty(#[case] speed: f64, #[case] expected: f64) {
        assert_eq!(wind_base_penalty(speed), expected);
    }

    #[rstest]
    #[case(-10.0, 3.0, 3.0)]
    #[case(4.9, 3.0, 3.0)]
    #[case(5.0, 2.0, 2.0)]
    #[case(9.9, 2.0, 2.0)]
    #[case(10.0, 1.0, 1.0)]
    #[case(14.9, 1.0, 1.0)]
    #[case(15.0, 0.0, 0.0)]
    #[case(25.0, 0.0, 0.0)]
    #[case(25.5, 1.0, 1.0)]
    #[case(30.0, 1.0, 1.0)]
    #[case(32.0, 3.0, 4.0)]
    #[case(35.0, 3.0, 4.0)]
    #[case(36.0, 6.0, 7.0)]
    fn test_temperature_penalty(#[case] temperature: f64, #[case] road: f64, #[case] offroad: f64) {
        assert_eq!(
            temperature_penalty(temperature, &Activity::Road.profile().heat),
            road
        );
        assert_eq!(
            temperature_penalty(temperature, &Activity::Gravel.profile().heat),
            offroad
        );
        assert_eq!(
            temperature_penalty(temperature, &Activity::Mtb.profile().heat),
            offroad
        );
    }

    #[rstest]
    #[case(60.0, 0.0)]
    #[case(61.0, 1.0)]
    #[case(80.0, 1.0)]
    #[case(81.0, 2.0)]
    fn test_humidity_penalty(#[case] humidity: f64, #[case] expected: f64) {
        assert_eq!(humidity_penalty(humidity), expected);
    }

    #[rstest]
    #[case(15.0, 0.0)]
    #[case(10.0, 0.0)]
    #[case(9.9, 1.0)]
    #[case(5.0, 1.0)]
    #[case(2.0, 2.0)]
    #[case(1.9, 3.0)]
    #[case(0.0, 3.0)]
    fn test_visibility_penalty(#[case] visibility_km: f64, #[case] expected: f64) {
        assert_eq!(visibility_penalty(visibility_km), expected);
    }

    #[rstest]
    #[case(5.0, 0.0)]
    #[case(6.0, 0.5)]
    #[case(7.0, 0.5)]
    #[case(8.0, 1.0)]
    #[case(9.0, 1.0)]
    #[case(11.0, 1.5)]
    fn test_uv_penalty(#[case] uv: f64, #[case] expected: f64) {
        assert_eq!(uv_penalty(uv), expected);
    }

    #[test]
    fn test_perfect_road_conditions() {
        let result = score_for_activity(Activity::Road, &reading(20.0, 5.0, 50.0, 15.0, 3.0), None);

        assert_eq!(result.score, 10.0);
        assert_eq!(result.rating, RideRating::Excellent);
        assert!(result.message.starts_with("Perfect conditions"));
        assert!(!result.message.contains("UV"));
        assert_eq!(result.breakdown, PenaltyBreakdown::default());
    }

    #[test]
    fn test_extreme_heat_caps_every_activity() {
        let hot = reading(38.0, 10.0, 80.0, 15.0, 8.0);

        let road = score_for_activity(Activity::Road, &hot, None);
        assert_eq!(road.score, 2.0);
        assert_eq!(road.breakdown.temperature_penalty, 6.0);
        assert_eq!(road.breakdown.humidity_penalty, 1.0);
        assert_eq!(road.breakdown.uv_penalty, 1.0);
        assert!(road.message.contains("UV is high"));

        for activity in [Activity::Gravel, Activity::Mtb] {
            let result = score_for_activity(activity, &hot, None);
            assert_eq!(result.score, 1.0);
            assert!(result.message.contains("UV is high"));
        }
    }

    #[test]
    fn test_saturated_humidity_caps_score() {
        let muggy = reading(20.0, 5.0, 95.0, 15.0, 1.0);

        assert_eq!(score_for_activity(Activity::Road, &muggy, None).score, 4.0);
        assert_eq!(score_for_activity(Activity::Gravel, &muggy, None).score, 3.5);
        assert_eq!(score_for_activity(Activity::Mtb, &muggy, None).score, 3.5);
    }

    #[rstest]
    #[case::fog_on_road(Activity::Road, reading(20.0, 5.0, 95.0, 1.0, 3.0), 1.0)]
    #[case::hazy_road(Activity::Road, reading(20.0, 5.0, 95.0, 6.0, 3.0), 3.0)]
    #[case::strong_sun_on_gravel(Activity::Gravel, reading(20.0, 5.0, 95.0, 15.0, 10.0), 2.0)]
    #[case::strong_sun_on_trails(Activity::Mtb, reading(20.0, 5.0, 95.0, 15.0, 8.0), 2.5)]
    fn test_penalties_after_humidity_cap(
        #[case] activity: Activity,
        #[case] reading: Reading,
        #[case] expected: f64,
    ) {
        let result = score_for_activity(activity, &reading, None);
        assert_eq!(result.score, expected);
        assert_eq!(result.breakdown.humidity_penalty, 2.0);
    }

    #[test]
    fn test_road_wind_relation_multipliers() {
        let windy = reading(20.0, 25.0, 50.0, 15.0, 3.0);

        let head = score_for_activity(Activity::Road, &windy, Some(WindRelation::Headwind));
        let cross = score_for_activity(Activity::Road, &windy, Some(WindRelation::Crosswind));
        let tail = score_for_activity(Activity::Road, &windy, Some(WindRelation::Tailwind));

        assert_eq!(head.breakdown.wind_penalty, 2.6);
        assert_eq!(cross.breakdown.wind_penalty, 2.0);
        assert_eq!(tail.breakdown.wind_penalty, 1.4);
        assert_eq!(head.score, 7.4);
        assert_eq!(tail.score, 8.6);
    }

    #[test]
    fn test_gravel_ignores_wind_relation() {
        let windy = reading(20.0, 25.0, 50.0, 15.0, 3.0);

        let head = score_for_activity(Activity::Gravel, &windy, Some(WindRelation::Headwind));
        let tail = score_for_activity(Activity::Gravel, &windy, Some(WindRelation::Tailwind));

        assert_eq!(head.breakdown.wind_penalty, 3.0);
        assert_eq!(head, tail);

        let mtb = score_for_activity(Activity::Mtb, &windy, Some(WindRelation::Headwind));
        assert_eq!(mtb.breakdown.wind_penalty, 2.0);
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let result = score_for_activity(Activity::Road, &Reading::default(), None);

        // 0°C costs 3 and 0 km visibility costs 3
        assert_eq!(result.breakdown.temperature_penalty, 3.0);
        assert_eq!(result.breakdown.visibility_penalty, 3.0);
        assert_eq!(result.breakdown.wind_penalty, 0.0);
        assert_eq!(result.score, 4.0);
    }

    #[test]
    fn test_non_finite_values_are_neutralized() {
        let broken = Reading {
            temperature: Some(f64::NAN),
            humidity: Some(f64::INFINITY),
            ..reading(20.0, 5.0, 50.0, 15.0, 3.0)
        };
        let inputs = ScoringInputs::from_reading(&broken);

        assert_eq!(inputs.temperature_c, 0.0);
        assert_eq!(inputs.humidity_pct, 0.0);
        assert_eq!(inputs.visibility_km, 15.0);
    }

    #[test]
    fn test_score_floor_is_one() {
        let awful = reading(-15.0, 80.0, 100.0, 0.1, 12.0);
        for activity in Activity::ALL {
            let result = score_for_activity(activity, &awful, Some(WindRelation::Headwind));
            assert_eq!(result.score, 1.0);
            assert_eq!(result.rating, RideRating::Poor);
        }
    }

    #[rstest]
    #[case(8.0, RideRating::Excellent)]
    #[case(7.9, RideRating::Good)]
    #[case(6.0, RideRating::Good)]
    #[case(4.0, RideRating::Decent)]
    #[case(3.0, RideRating::Challenging)]
    #[case(2.9, RideRating::Poor)]
    fn test_rating_bands(#[case] score: f64, #[case] expected: RideRating) {
        assert_eq!(RideRating::from_score(score), expected);
    }
}
