//! Application state and the advice derived from it
//!
//! [`AppState`] changes only through [`AppState::apply`]. [`Advice`] is a
//! pure projection of a state at a point in time, recomputed for every view.

use crate::models::{DailyAggregate, HourlyReading, Location, Reading, UnitSystem, WeatherSnapshot};
use crate::riding::{
    Activity, Alert, MudReport, RideRating, ScoreResult, TrailReadiness, WindRelation, alerts_for,
    mud_report, score_for_activity, trail_readiness, wind_relation_for_heading,
};
use crate::{Result, RideError};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use serde::Serialize;

/// Number of days in the daily view
pub const DAILY_DAYS: usize = 7;

/// Everything the views are computed from
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub location: Option<Location>,
    pub snapshot: Option<WeatherSnapshot>,
    pub activity: Activity,
    /// Used for road rides when no heading is set
    pub wind_relation: WindRelation,
    /// Travel heading in degrees; derives the wind relation per hour
    pub heading: Option<f64>,
    pub units: UnitSystem,
    /// Length of the hourly view
    pub hourly_hours: usize,
}

/// The events that change the state
#[derive(Debug, Clone, PartialEq)]
pub enum StateUpdate {
    /// A new location was picked; the old forecast no longer applies
    LocationChanged(Location),
    ForecastLoaded(WeatherSnapshot),
    ActivityChanged(Activity),
    WindRelationChanged(WindRelation),
    HeadingChanged(Option<f64>),
    UnitsChanged(UnitSystem),
    UnitsToggled,
}

impl AppState {
    #[must_use]
    pub fn new(activity: Activity, units: UnitSystem, hourly_hours: usize) -> Self {
        Self {
            location: None,
            snapshot: None,
            activity,
            wind_relation: WindRelation::default(),
            heading: None,
            units,
            hourly_hours,
        }
    }

    /// Apply one update and return the new state
    #[must_use]
    pub fn apply(mut self, update: StateUpdate) -> Self {
        match update {
            StateUpdate::LocationChanged(location) => {
                self.location = Some(location);
                self.snapshot = None;
            }
            StateUpdate::ForecastLoaded(snapshot) => self.snapshot = Some(snapshot),
            StateUpdate::ActivityChanged(activity) => self.activity = activity,
            StateUpdate::WindRelationChanged(relation) => self.wind_relation = relation,
            StateUpdate::HeadingChanged(heading) => {
                self.heading = heading.filter(|h| h.is_finite()).map(|h| h.rem_euclid(360.0));
            }
            StateUpdate::UnitsChanged(units) => self.units = units,
            StateUpdate::UnitsToggled => self.units = self.units.toggled(),
        }
        self
    }

    /// Wind relation for one reading. Only road rides use it.
    #[must_use]
    pub fn wind_relation_for(&self, reading: &Reading) -> Option<WindRelation> {
        if !self.activity.uses_wind_relation() {
            return None;
        }
        match (self.heading, reading.wind_direction) {
            (Some(heading), Some(wind_from)) => Some(wind_relation_for_heading(wind_from, heading)),
            _ => Some(self.wind_relation),
        }
    }

    fn score(&self, reading: &Reading) -> ScoreResult {
        score_for_activity(self.activity, reading, self.wind_relation_for(reading))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentAdvice {
    /// Timestamp of the hour used as "now"
    pub time: Option<DateTime<Utc>>,
    pub reading: Reading,
    pub description: &'static str,
    pub wind_relation: Option<WindRelation>,
    pub score: ScoreResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct HourlyScore {
    pub time: DateTime<Utc>,
    pub reading: Reading,
    pub score: f64,
    pub rating: RideRating,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyScore {
    pub date: NaiveDate,
    /// "Today", "Tomorrow" or the weekday name
    pub day_name: String,
    pub aggregate: DailyAggregate,
    /// Best hourly score during daylight, if any daylight hour is known
    pub best_score: Option<f64>,
    pub best_rating: Option<RideRating>,
    pub best_hour: Option<DateTime<Utc>>,
}

/// Complete advice for one location and activity
#[derive(Debug, Clone, Serialize)]
pub struct Advice {
    pub location: Location,
    pub activity: Activity,
    pub units: UnitSystem,
    pub generated_at: DateTime<Utc>,
    pub current: CurrentAdvice,
    pub alerts: Vec<Alert>,
    pub hourly: Vec<HourlyScore>,
    pub daily: Vec<DailyScore>,
    /// Mountain biking only
    pub trail: Option<TrailReadiness>,
    /// Gravel only
    pub mud: Option<MudReport>,
}

impl Advice {
    /// Project a state into advice. Needs a location and a loaded forecast.
    pub fn from_state(state: &AppState, now: DateTime<Utc>) -> Result<Self> {
        let location = state
            .location
            .clone()
            .ok_or_else(|| RideError::general("No location selected"))?;
        let snapshot = state
            .snapshot
            .as_ref()
            .ok_or_else(|| RideError::general("No forecast loaded"))?;

        let reading = snapshot.current_or_default();
        let current = CurrentAdvice {
            time: snapshot.current_time,
            description: reading.description(),
            wind_relation: state.wind_relation_for(&reading),
            score: state.score(&reading),
            reading,
        };

        let hourly = snapshot
            .upcoming_hours(now, state.hourly_hours)
            .into_iter()
            .map(|hour| {
                let result = state.score(&hour.reading);
                HourlyScore {
                    time: hour.timestamp,
                    reading: hour.reading.clone(),
                    score: result.score,
                    rating: result.rating,
                }
            })
            .collect();

        let today = snapshot.local_date(now);
        let daily = snapshot
            .daily
            .iter()
            .filter(|day| day.date >= today)
            .take(DAILY_DAYS)
            .map(|day| daily_score(state, snapshot, day, today))
            .collect();

        Ok(Self {
            location,
            activity: state.activity,
            units: state.units,
            generated_at: now,
            current,
            alerts: alerts_for(snapshot),
            hourly,
            daily,
            trail: (state.activity == Activity::Mtb).then(|| trail_readiness(snapshot, now)),
            mud: (state.activity == Activity::Gravel).then(|| mud_report(snapshot, now)),
        })
    }
}

fn daily_score(
    state: &AppState,
    snapshot: &WeatherSnapshot,
    day: &DailyAggregate,
    today: NaiveDate,
) -> DailyScore {
    let best = best_hour(state, snapshot.daylight_hours(day.date));

    DailyScore {
        date: day.date,
        day_name: day_name(day.date, today),
        aggregate: day.clone(),
        best_score: best.as_ref().map(|(_, result)| result.score),
        best_rating: best.as_ref().map(|(_, result)| result.rating),
        best_hour: best.map(|(hour, _)| hour.timestamp),
    }
}

/// Highest scoring hour; the earliest one wins a tie
fn best_hour<'a>(
    state: &AppState,
    hours: Vec<&'a HourlyReading>,
) -> Option<(&'a HourlyReading, ScoreResult)> {
    hours
        .into_iter()
        .map(|hour| (hour, state.score(&hour.reading)))
        .fold(None, |best, candidate| match best {
            Some(current) if current.1.score >= candidate.1.score => Some(current),
            _ => Some(candidate),
        })
}

fn day_name(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if date == today + Duration::days(1) {
        "Tomorrow".to_string()
    } else {
        match date.weekday() {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
        .to_string()
    }
}
