use chrono::{DateTime, NaiveDate, Utc};
use sunrise::{Coordinates, SolarDay, SolarEvent};

pub mod open_meteo;

/// Sunrise and sunset for a location and date.
///
/// `None` for invalid coordinates or days without a sunrise or sunset
/// (polar day and night).
#[must_use]
pub fn sun_times(
    latitude: f64,
    longitude: f64,
    date: NaiveDate,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let coordinates = Coordinates::new(latitude, longitude)?;
    let solar_day = SolarDay::new(coordinates, date);

    let sunrise = solar_day.event_time(SolarEvent::Sunrise)?;
    let sunset = solar_day.event_time(SolarEvent::Sunset)?;

    Some((sunrise, sunset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sun_times_mid_latitude() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        let (sunrise, sunset) = sun_times(47.37, 8.54, date).unwrap();

        assert!(sunrise < sunset);
        assert!((sunset - sunrise).num_hours() >= 15);
    }

    #[test]
    fn test_sun_times_invalid_coordinates() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        assert!(sun_times(123.0, 8.54, date).is_none());
    }
}
