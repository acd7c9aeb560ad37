//! Text and JSON views of an [`Advice`]
//!
//! The unit system only changes how values are formatted.

use crate::app::Advice;
use crate::models::{Location, Reading, UnitSystem};
use crate::riding::{AlertSeverity, MudReport, TrailReadiness};
use anyhow::{Context, Result};
use std::fmt;

/// Pretty-printed JSON of the whole advice
pub fn render_json(advice: &Advice) -> Result<String> {
    serde_json::to_string_pretty(advice).context("Failed to serialize advice")
}

/// Human readable report
#[must_use]
pub fn render_text(advice: &Advice) -> String {
    TextReport(advice).to_string()
}

struct TextReport<'a>(&'a Advice);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let advice = self.0;
        let units = advice.units;

        writeln!(
            f,
            "{} ({})",
            advice.location.display_name(),
            advice.location.format_coordinates()
        )?;
        writeln!(f, "Activity: {}", advice.activity.label())?;
        writeln!(f)?;

        let current = &advice.current;
        writeln!(
            f,
            "Now: {} {}",
            current.description,
            units.format_temperature(current.reading.temperature)
        )?;
        writeln!(f, "  {}", reading_line(&current.reading, units))?;
        if let Some(relation) = current.wind_relation {
            writeln!(f, "  Wind relation: {relation}")?;
        }
        writeln!(
            f,
            "Ride score: {:.1}/10 ({})",
            current.score.score, current.score.rating
        )?;
        writeln!(f, "  {}", current.score.message)?;

        let breakdown = &current.score.breakdown;
        writeln!(
            f,
            "  Penalties: wind {:.1}, temperature {:.1}, humidity {:.1}, visibility {:.1}, UV {:.1}",
            breakdown.wind_penalty,
            breakdown.temperature_penalty,
            breakdown.humidity_penalty,
            breakdown.visibility_penalty,
            breakdown.uv_penalty
        )?;

        if let Some(trail) = &advice.trail {
            writeln!(f, "{}", trail_line(trail, units))?;
        }
        if let Some(mud) = &advice.mud {
            writeln!(f, "{}", mud_line(mud, units))?;
        }

        if !advice.alerts.is_empty() {
            writeln!(f)?;
            writeln!(f, "Alerts:")?;
            for alert in &advice.alerts {
                let marker = match alert.severity {
                    AlertSeverity::High => "!!",
                    AlertSeverity::Moderate => "! ",
                };
                writeln!(f, "  {marker} [{}] {}", alert.kind, alert.message)?;
            }
        }

        if !advice.hourly.is_empty() {
            writeln!(f)?;
            writeln!(f, "Next hours (UTC):")?;
            for hour in &advice.hourly {
                writeln!(
                    f,
                    "  {}  {:>4.1}  {:<11} {:>6}  {}",
                    hour.time.format("%a %H:%M"),
                    hour.score,
                    hour.rating.to_string(),
                    units.format_temperature(hour.reading.temperature),
                    units.format_speed(hour.reading.wind_speed_kmh)
                )?;
            }
        }

        if !advice.daily.is_empty() {
            writeln!(f)?;
            writeln!(f, "Next days:")?;
            for day in &advice.daily {
                let best = match (day.best_score, day.best_hour) {
                    (Some(score), Some(hour)) => {
                        format!("best {:.1} at {} UTC", score, hour.format("%H:%M"))
                    }
                    _ => "no daylight data".to_string(),
                };
                writeln!(
                    f,
                    "  {:<9} {}  {} / {}  {}",
                    day.day_name,
                    day.date.format("%d.%m"),
                    units.format_temperature(day.aggregate.temperature_max),
                    units.format_temperature(day.aggregate.temperature_min),
                    best
                )?;
            }
        }

        Ok(())
    }
}

fn reading_line(reading: &Reading, units: UnitSystem) -> String {
    let direction = reading
        .wind_direction
        .map(Reading::wind_direction_to_cardinal)
        .unwrap_or("--");
    format!(
        "Wind {} {}, humidity {}, visibility {}, rain {}, UV {}",
        units.format_speed(reading.wind_speed_kmh),
        direction,
        reading
            .humidity
            .map_or_else(|| "--".to_string(), |h| format!("{h:.0}%")),
        units.format_distance(reading.visibility_m),
        units.format_precipitation(reading.precipitation),
        reading
            .uv_index
            .map_or_else(|| "--".to_string(), |uv| format!("{uv:.0}"))
    )
}

fn trail_line(trail: &TrailReadiness, units: UnitSystem) -> String {
    format!(
        "Trail readiness: {}/100 ({}), {} of rain in the last 72h",
        trail.readiness,
        trail.condition,
        units.format_precipitation(Some(trail.recent_precipitation_mm))
    )
}

fn mud_line(mud: &MudReport, units: UnitSystem) -> String {
    format!(
        "Mud factor: {}/3, {} of rain in the last 48h",
        mud.mud_factor,
        units.format_precipitation(Some(mud.recent_precipitation_mm))
    )
}

/// One line per location, numbered from 1
#[must_use]
pub fn render_locations(locations: &[Location]) -> String {
    locations
        .iter()
        .enumerate()
        .map(|(i, location)| {
            format!(
                "{:>2}. {} ({})\n",
                i + 1,
                location.display_name(),
                location.format_coordinates()
            )
        })
        .collect()
}
