//! Property tests for the scoring and alerting engine

use proptest::prelude::*;
use ridecast::riding::score::wind_base_penalty;
use ridecast::riding::{AlertKind, AlertSeverity, alerts_for_reading};
use ridecast::{Activity, Reading, WindRelation, score_for_activity};

fn activity() -> impl Strategy<Value = Activity> {
    prop_oneof![
        Just(Activity::Road),
        Just(Activity::Gravel),
        Just(Activity::Mtb)
    ]
}

fn relation() -> impl Strategy<Value = Option<WindRelation>> {
    prop_oneof![
        Just(None),
        Just(Some(WindRelation::Headwind)),
        Just(Some(WindRelation::Tailwind)),
        Just(Some(WindRelation::Crosswind)),
    ]
}

fn reading(
    temperature: f64,
    humidity: f64,
    wind_speed_kmh: f64,
    visibility_m: f64,
    uv_index: f64,
) -> Reading {
    Reading {
        temperature: Some(temperature),
        humidity: Some(humidity),
        wind_speed_kmh: Some(wind_speed_kmh),
        visibility_m: Some(visibility_m),
        uv_index: Some(uv_index),
        ..Reading::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn score_stays_in_range(
        activity in activity(),
        relation in relation(),
        temperature in -30.0f64..50.0,
        humidity in 0.0f64..100.0,
        wind in 0.0f64..120.0,
        visibility in 0.0f64..50_000.0,
        uv in 0.0f64..14.0,
    ) {
        let result = score_for_activity(
            activity,
            &reading(temperature, humidity, wind, visibility, uv),
            relation,
        );
        prop_assert!((1.0..=10.0).contains(&result.score), "score {}", result.score);
        prop_assert!(result.breakdown.wind_penalty >= 0.0);
        prop_assert!(result.breakdown.uv_penalty >= 0.0);
    }

    #[test]
    fn missing_fields_never_panic(
        activity in activity(),
        temperature in proptest::option::of(-30.0f64..50.0),
        wind in proptest::option::of(0.0f64..120.0),
    ) {
        let reading = Reading {
            temperature,
            wind_speed_kmh: wind,
            ..Reading::default()
        };
        let result = score_for_activity(activity, &reading, None);
        prop_assert!((1.0..=10.0).contains(&result.score));
    }

    #[test]
    fn extreme_heat_caps_score(
        activity in activity(),
        relation in relation(),
        temperature in 35.01f64..50.0,
        humidity in 0.0f64..100.0,
        wind in 0.0f64..60.0,
    ) {
        let result = score_for_activity(
            activity,
            &reading(temperature, humidity, wind, 15_000.0, 3.0),
            relation,
        );
        prop_assert!(result.score <= 2.0, "score {}", result.score);
    }

    #[test]
    fn saturated_humidity_caps_score(
        activity in activity(),
        humidity in 90.0f64..=100.0,
        temperature in 15.0f64..25.0,
    ) {
        let result = score_for_activity(
            activity,
            &reading(temperature, humidity, 0.0, 15_000.0, 0.0),
            None,
        );
        let cap = if activity == Activity::Road { 4.0 } else { 3.5 };
        prop_assert!(result.score <= cap, "score {} over cap {}", result.score, cap);
    }

    #[test]
    fn wind_penalty_is_monotone(a in 0.0f64..100.0, b in 0.0f64..100.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(wind_base_penalty(low) <= wind_base_penalty(high));
    }

    #[test]
    fn more_wind_never_scores_higher(
        activity in activity(),
        a in 0.0f64..100.0,
        b in 0.0f64..100.0,
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let calm = score_for_activity(activity, &reading(20.0, 50.0, low, 15_000.0, 3.0), None);
        let windy = score_for_activity(activity, &reading(20.0, 50.0, high, 15_000.0, 3.0), None);
        prop_assert!(calm.score >= windy.score);
    }

    #[test]
    fn headwind_hurts_most(wind in 0.0f64..100.0) {
        let penalty = |relation| {
            score_for_activity(
                Activity::Road,
                &reading(20.0, 50.0, wind, 15_000.0, 3.0),
                Some(relation),
            )
            .breakdown
            .wind_penalty
        };
        let head = penalty(WindRelation::Headwind);
        let cross = penalty(WindRelation::Crosswind);
        let tail = penalty(WindRelation::Tailwind);
        prop_assert!(head >= cross && cross >= tail, "{} {} {}", head, cross, tail);
    }

    #[test]
    fn wind_alert_severity(wind in 0.0f64..120.0) {
        let reading = Reading {
            wind_speed_kmh: Some(wind),
            ..Reading::default()
        };
        let wind_alert = alerts_for_reading(&reading)
            .into_iter()
            .find(|alert| alert.kind == AlertKind::Wind);

        match wind_alert {
            Some(alert) if wind >= 40.0 => {
                prop_assert_eq!(alert.severity, AlertSeverity::High);
            }
            Some(alert) => {
                prop_assert!(wind >= 25.0);
                prop_assert_eq!(alert.severity, AlertSeverity::Moderate);
            }
            None => {
                prop_assert!(wind < 25.0);
            }
        }
    }
}
