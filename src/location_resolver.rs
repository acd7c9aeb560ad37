//! Location Resolution Module
//!
//! Turns whatever the rider gave us (coordinates, a place name or nothing)
//! into a concrete [`Location`].

use crate::api::{Geocoder, LocationInput};
use crate::models::Location;
use crate::storage::LastLocationStore;
use crate::{Result, RideError};
use tracing::debug;

/// Label for coordinates the reverse geocoder could not name
pub const CURRENT_LOCATION_LABEL: &str = "Current location";

/// Service for resolving location inputs
pub struct LocationResolver<'a> {
    geocoder: &'a dyn Geocoder,
    last_location: &'a LastLocationStore,
    default_location: Location,
}

impl<'a> LocationResolver<'a> {
    pub fn new(
        geocoder: &'a dyn Geocoder,
        last_location: &'a LastLocationStore,
        default_location: Location,
    ) -> Self {
        Self {
            geocoder,
            last_location,
            default_location,
        }
    }

    /// Resolve a location input into a structured Location.
    ///
    /// Without input the last used location is reused, and the configured
    /// default location stands in when nothing was stored yet.
    pub async fn resolve(&self, input: Option<LocationInput>) -> Result<Location> {
        debug!("Resolving location input: {:?}", input);

        let location = match input {
            Some(LocationInput::Coordinates(lat, lon)) => self.resolve_coordinates(lat, lon).await,
            Some(LocationInput::Name(name)) => self.resolve_name(&name).await?,
            None => self.resolve_fallback().await,
        };

        debug!(
            "Resolved location: {} at ({}, {})",
            location.name, location.latitude, location.longitude
        );

        Ok(location)
    }

    /// Resolve coordinates to a location with proper name via reverse geocoding
    async fn resolve_coordinates(&self, lat: f64, lon: f64) -> Location {
        match self.geocoder.reverse_geocode(lat, lon).await {
            Some(location) => location,
            None => {
                debug!("No reverse geocoding result, using generic label");
                Location::new(lat, lon, CURRENT_LOCATION_LABEL.to_string())
            }
        }
    }

    /// Resolve a place name to its best geocoding match
    async fn resolve_name(&self, name: &str) -> Result<Location> {
        debug!("Geocoding location name: {}", name);

        self.geocoder
            .search_places(name)
            .await
            .into_iter()
            .next()
            .ok_or_else(|| RideError::validation(format!("Location not found: {name}")))
    }

    async fn resolve_fallback(&self) -> Location {
        match self.last_location.load().await {
            Some(location) => location,
            None => {
                debug!("No stored location, using configured default");
                self.default_location.clone()
            }
        }
    }
}
