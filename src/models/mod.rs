//! Data models for the RideCast application
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates and metadata
//! - Weather: Single normalized readings
//! - Forecast: The snapshot of current, hourly and daily data
//! - Units: Metric/imperial display conversions

pub mod forecast;
pub mod location;
pub mod units;
pub mod weather;

// Re-export all public types for convenient access
pub use forecast::{DailyAggregate, WeatherSnapshot};
pub use location::Location;
pub use units::UnitSystem;
pub use weather::{HourlyReading, Reading};
