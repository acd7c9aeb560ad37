//! Riding module
//!
//! This module holds the scoring and alerting engine:
//! - Activity profiles for road, gravel and mountain biking
//! - Ride quality scoring with per-factor penalty breakdown
//! - Safety alerts for the current conditions
//! - Recent rainfall, mud factor and trail readiness
//! - Wind relation from a travel heading

pub mod activity;
pub mod alerts;
pub mod score;
pub mod trail;
pub mod wind;

// Re-export commonly used types from submodules
pub use activity::{Activity, ActivityProfile, WindRelation};
pub use alerts::{Alert, AlertKind, AlertSeverity, alerts_for, alerts_for_reading};
pub use score::{
    PenaltyBreakdown, RideRating, ScoreResult, ScoringInputs, score_for_activity, score_inputs,
};
pub use trail::{
    MudReport, TrailCondition, TrailReadiness, mud_report, recent_precipitation, trail_readiness,
};
pub use wind::wind_relation_for_heading;
