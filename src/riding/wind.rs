//! Wind relation relative to a direction of travel

use super::activity::WindRelation;

/// Calculate angular difference between two directions (0-180°)
#[must_use]
pub fn angular_difference(a_deg: f64, b_deg: f64) -> f64 {
    let diff = (a_deg - b_deg).rem_euclid(360.0);
    diff.min(360.0 - diff)
}

/// Classify wind against a rider heading.
///
/// `wind_from_deg` is the meteorological direction (where the wind comes
/// from). Riding straight into it is a headwind.
#[must_use]
pub fn wind_relation_for_heading(wind_from_deg: f64, heading_deg: f64) -> WindRelation {
    match angular_difference(wind_from_deg, heading_deg) {
        d if d <= 45.0 => WindRelation::Headwind,
        d if d >= 135.0 => WindRelation::Tailwind,
        _ => WindRelation::Crosswind,
    }
}
