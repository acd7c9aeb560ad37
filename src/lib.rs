//! `RideCast` - cycling weather advisor
//!
//! This library scores forecast conditions for road, gravel and mountain
//! biking, raises safety alerts and keeps a small local history of the
//! places a rider looked at.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod location_resolver;
pub mod models;
pub mod render;
pub mod riding;
pub mod storage;
pub mod telemetry;
pub mod weather;

// Re-export core types for public API
pub use api::{ForecastProvider, Geocoder, LocationInput, LocationParser, WeatherApiClient};
pub use app::{Advice, AppState, StateUpdate};
pub use config::RideConfig;
pub use error::RideError;
pub use location_resolver::LocationResolver;
pub use models::{Location, Reading, UnitSystem, WeatherSnapshot};
pub use riding::{Activity, Alert, ScoreResult, WindRelation, alerts_for, score_for_activity};
pub use storage::{FjallStore, KeyValueStore, LastLocationStore, MemoryStore, RecentsStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, RideError>;
