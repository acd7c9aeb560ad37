//! Location model for geographic coordinates and metadata

use serde::{Deserialize, Serialize};

/// A place the rider picked or was resolved to
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Stable identifier (geocoder id, or rounded coordinates)
    pub id: String,
    /// Location name (city, region, etc.)
    pub name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Administrative region (state, province)
    pub region: Option<String>,
    /// Country name
    pub country: Option<String>,
}

impl Location {
    /// Create a new location identified by its rounded coordinates
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, name: String) -> Self {
        Self {
            id: coordinate_id(latitude, longitude),
            name,
            latitude,
            longitude,
            region: None,
            country: None,
        }
    }

    /// Attach region and country details
    #[must_use]
    pub fn with_details(mut self, region: Option<String>, country: Option<String>) -> Self {
        self.region = region;
        self.country = country;
        self
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// Name with region and country, skipping whatever is missing
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut parts = vec![self.name.as_str()];
        if let Some(region) = self.region.as_deref().filter(|r| !r.is_empty() && *r != self.name) {
            parts.push(region);
        }
        if let Some(country) = self.country.as_deref().filter(|c| !c.is_empty()) {
            parts.push(country);
        }
        parts.join(", ")
    }

    /// Name used for de-duplication: trimmed and lowercased
    #[must_use]
    pub fn normalized_name(&self) -> String {
        self.name.trim().to_lowercase()
    }
}

fn coordinate_id(latitude: f64, longitude: f64) -> String {
    format!("{latitude:.4},{longitude:.4}")
}
