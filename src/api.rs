//! Weather and geocoding API clients
//!
//! Forecasts and place search come from Open-Meteo, reverse geocoding from
//! BigDataCloud. A forecast request that fails is retried once with a reduced
//! parameter set; geocoding failures degrade to empty results.

use crate::config::WeatherConfig;
use crate::models::{Location, WeatherSnapshot};
use crate::weather::open_meteo::{
    FORECAST_DAYS, FULL_PARAMS, ForecastParams, ForecastResponse, PAST_DAYS, REDUCED_PARAMS,
};
use crate::{Result, RideError};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

/// Queries shorter than this are not sent to the geocoder
pub const MIN_QUERY_LEN: usize = 3;
/// Maximum number of place search candidates
pub const MAX_SEARCH_RESULTS: usize = 10;

/// Source of weather snapshots
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    async fn fetch_snapshot(&self, latitude: f64, longitude: f64) -> Result<WeatherSnapshot>;
}

/// Forward and reverse geocoding. Neither direction reports errors.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Candidate places for a free-text query, best match first
    async fn search_places(&self, query: &str) -> Vec<Location>;

    /// Place name for coordinates, `None` when nothing is known
    async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> Option<Location>;
}

/// HTTP client for the forecast and geocoding services
pub struct WeatherApiClient {
    client: Client,
    forecast_url: String,
    geocoding_url: String,
    reverse_geocoding_url: String,
}

impl WeatherApiClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("RideCast/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RideError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            forecast_url: config.forecast_url.trim_end_matches('/').to_string(),
            geocoding_url: config.geocoding_url.trim_end_matches('/').to_string(),
            reverse_geocoding_url: config.reverse_geocoding_url.trim_end_matches('/').to_string(),
        })
    }

    /// Forecast for the coordinates: the full request first, then one
    /// reduced request if that fails.
    #[instrument(skip(self))]
    pub async fn fetch_snapshot(&self, latitude: f64, longitude: f64) -> Result<WeatherSnapshot> {
        let start_time = Instant::now();

        let first = match self.request_forecast(latitude, longitude, FULL_PARAMS).await {
            Ok(snapshot) => {
                info!(
                    "Retrieved forecast with {} hourly readings in {:.3}s",
                    snapshot.hourly.len(),
                    start_time.elapsed().as_secs_f64()
                );
                return Ok(snapshot);
            }
            Err(e) => e,
        };

        warn!("Full forecast request failed, retrying with reduced parameters: {}", first);

        match self.request_forecast(latitude, longitude, REDUCED_PARAMS).await {
            Ok(snapshot) => {
                info!(
                    "Retrieved reduced forecast with {} hourly readings in {:.3}s",
                    snapshot.hourly.len(),
                    start_time.elapsed().as_secs_f64()
                );
                Ok(snapshot)
            }
            Err(second) => {
                error!("Reduced forecast request failed as well: {}", second);
                Err(RideError::api(format!(
                    "Forecast unavailable for {latitude:.4}, {longitude:.4}: {second}"
                )))
            }
        }
    }

    async fn request_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        params: ForecastParams,
    ) -> Result<WeatherSnapshot> {
        let url = format!(
            "{}/forecast?latitude={}&longitude={}&hourly={}&daily={}&past_days={}&forecast_days={}&timezone=auto",
            self.forecast_url, latitude, longitude, params.hourly, params.daily, PAST_DAYS, FORECAST_DAYS
        );
        debug!("Forecast request URL: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RideError::api(format!("Forecast request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RideError::api(format!("Forecast API error {status}: {body}")));
        }

        let forecast: ForecastResponse = response
            .json()
            .await
            .map_err(|e| RideError::api(format!("Failed to parse forecast response: {e}")))?;

        let snapshot = forecast.into_snapshot(Utc::now());
        if snapshot.hourly.is_empty() {
            return Err(RideError::api("Forecast response contained no hourly data"));
        }
        Ok(snapshot)
    }

    /// Place search; short queries and failures give an empty list
    #[instrument(skip(self))]
    pub async fn search_places(&self, query: &str) -> Vec<Location> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            debug!("Query '{}' too short for place search", query);
            return Vec::new();
        }

        match self.geocode(query).await {
            Ok(places) => {
                if places.is_empty() {
                    warn!("No results found for location '{}'", query);
                }
                places
            }
            Err(e) => {
                warn!("Place search for '{}' failed: {}", query, e);
                Vec::new()
            }
        }
    }

    async fn geocode(&self, query: &str) -> Result<Vec<Location>> {
        let start_time = Instant::now();
        let url = format!(
            "{}/search?name={}&count={}&language=en&format=json",
            self.geocoding_url,
            urlencoding::encode(query),
            MAX_SEARCH_RESULTS
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RideError::api(format!("Geocoding request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(RideError::api(format!(
                "Geocoding API error {}",
                response.status()
            )));
        }

        let geocoding: GeocodingResponse = response
            .json()
            .await
            .map_err(|e| RideError::api(format!("Failed to parse geocoding response: {e}")))?;

        let places: Vec<Location> = geocoding
            .results
            .unwrap_or_default()
            .into_iter()
            .take(MAX_SEARCH_RESULTS)
            .map(Location::from)
            .collect();

        debug!(
            "Found {} places for '{}' in {:.3}s",
            places.len(),
            query,
            start_time.elapsed().as_secs_f64()
        );
        Ok(places)
    }

    /// Name for coordinates, `None` on failure or when no name is known
    #[instrument(skip(self))]
    pub async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> Option<Location> {
        match self.request_reverse(latitude, longitude).await {
            Ok(location) => location,
            Err(e) => {
                warn!("Reverse geocoding failed: {}", e);
                None
            }
        }
    }

    async fn request_reverse(&self, latitude: f64, longitude: f64) -> Result<Option<Location>> {
        let url = format!(
            "{}/reverse-geocode-client?latitude={}&longitude={}&localityLanguage=en",
            self.reverse_geocoding_url, latitude, longitude
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RideError::api(format!("Reverse geocoding request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(RideError::api(format!(
                "Reverse geocoding API error {}",
                response.status()
            )));
        }

        let reverse: ReverseGeocodeResponse = response.json().await.map_err(|e| {
            RideError::api(format!("Failed to parse reverse geocoding response: {e}"))
        })?;

        Ok(reverse.into_location(latitude, longitude))
    }
}

#[async_trait]
impl ForecastProvider for WeatherApiClient {
    async fn fetch_snapshot(&self, latitude: f64, longitude: f64) -> Result<WeatherSnapshot> {
        WeatherApiClient::fetch_snapshot(self, latitude, longitude).await
    }
}

#[async_trait]
impl Geocoder for WeatherApiClient {
    async fn search_places(&self, query: &str) -> Vec<Location> {
        WeatherApiClient::search_places(self, query).await
    }

    async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> Option<Location> {
        WeatherApiClient::reverse_geocode(self, latitude, longitude).await
    }
}

/// Place search response from Open-Meteo
#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    pub results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocodingResult {
    pub id: Option<u64>,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// First-level administrative area (state, province)
    pub admin1: Option<String>,
    pub country: Option<String>,
}

impl From<GeocodingResult> for Location {
    fn from(result: GeocodingResult) -> Self {
        let mut location = Location::new(result.latitude, result.longitude, result.name)
            .with_details(result.admin1, result.country);
        if let Some(id) = result.id {
            location.id = id.to_string();
        }
        location
    }
}

/// Reverse geocoding response from BigDataCloud
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReverseGeocodeResponse {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub principal_subdivision: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

impl ReverseGeocodeResponse {
    /// The most specific name available: city, then locality, then region
    #[must_use]
    pub fn best_name(&self) -> Option<&str> {
        non_empty(self.city.as_ref())
            .or_else(|| non_empty(self.locality.as_ref()))
            .or_else(|| non_empty(self.principal_subdivision.as_ref()))
    }

    fn into_location(self, latitude: f64, longitude: f64) -> Option<Location> {
        let name = self.best_name()?.to_string();
        let region = non_empty(self.principal_subdivision.as_ref()).map(str::to_string);
        let country = non_empty(self.country_name.as_ref()).map(str::to_string);
        Some(Location::new(latitude, longitude, name).with_details(region, country))
    }
}

/// Location parsing utilities
pub struct LocationParser;

impl LocationParser {
    /// Parse location input: coordinates or a place name
    pub fn parse(input: &str) -> Result<LocationInput> {
        let input = input.trim();
        if input.is_empty() {
            return Err(RideError::validation("Location cannot be empty"));
        }

        if let Ok((lat, lon)) = Self::parse_coordinates(input) {
            return Ok(LocationInput::Coordinates(lat, lon));
        }

        Ok(LocationInput::Name(input.to_string()))
    }

    /// Parse coordinates from string like "46.8182,8.2275" or "46.8182 8.2275"
    pub fn parse_coordinates(input: &str) -> Result<(f64, f64)> {
        let parts: Vec<&str> = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();

        if parts.len() != 2 {
            return Err(RideError::validation("Coordinates must be in format 'lat,lon'"));
        }

        let lat = parts[0]
            .parse::<f64>()
            .map_err(|_| RideError::validation(format!("Invalid latitude: {}", parts[0])))?;
        let lon = parts[1]
            .parse::<f64>()
            .map_err(|_| RideError::validation(format!("Invalid longitude: {}", parts[1])))?;

        if !(-90.0..=90.0).contains(&lat) {
            return Err(RideError::validation(format!(
                "Latitude must be between -90 and 90, got: {lat}"
            )));
        }

        if !(-180.0..=180.0).contains(&lon) {
            return Err(RideError::validation(format!(
                "Longitude must be between -180 and 180, got: {lon}"
            )));
        }

        Ok((lat, lon))
    }
}

/// Types of location input
#[derive(Debug, Clone, PartialEq)]
pub enum LocationInput {
    /// Coordinates (latitude, longitude)
    Coordinates(f64, f64),
    /// Place name (city, region, postal code)
    Name(String),
}
