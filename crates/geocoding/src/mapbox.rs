//! Mapbox-style geocoding v5 HTTP provider.
//!
//! Both lookups hit `GET {base}/{query}.json?access_token=..&limit=1`;
//! reverse lookups encode the query as `{lon},{lat}`. The locality of a
//! reverse result is the feature's `place`-kind context entry, falling
//! back to the feature's own `text` for coarse results.

use async_trait::async_trait;
use serde::Deserialize;
use waymark_core::Coordinate;

use crate::error::GeocodingError;
use crate::provider::Geocoder;

/// Public Mapbox geocoding v5 endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.mapbox.com/geocoding/v5/mapbox.places";

/// HTTP client for a Mapbox-style geocoding service.
pub struct MapboxGeocoder {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    /// Display name of the feature itself.
    #[serde(default)]
    text: Option<String>,
    /// `[longitude, latitude]` of the best-match point.
    #[serde(default)]
    center: Vec<f64>,
    /// Enclosing admin areas, most specific first.
    #[serde(default)]
    context: Vec<ContextEntry>,
}

#[derive(Debug, Deserialize)]
struct ContextEntry {
    /// Kind-qualified id, e.g. `place.12345`.
    #[serde(default)]
    id: String,
    #[serde(default)]
    text: String,
}

impl MapboxGeocoder {
    /// Create a provider against the public Mapbox endpoint.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, access_token)
    }

    /// Create a provider against a custom endpoint (e.g. a local stub).
    pub fn with_base_url(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            access_token: access_token.into(),
        }
    }

    /// Fetch and parse the feature collection for one query segment.
    async fn fetch(&self, query: &str) -> Result<FeatureCollection, GeocodingError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| GeocodingError::Transport(format!("invalid base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| GeocodingError::Transport("base URL cannot carry a path".to_string()))?
            .push(&format!("{query}.json"));

        let response = self
            .client
            .get(url)
            .query(&[("access_token", self.access_token.as_str()), ("limit", "1")])
            .send()
            .await
            .map_err(|e| GeocodingError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodingError::Transport(format!(
                "geocoding service returned HTTP {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeocodingError::Transport(e.to_string()))?;

        parse_collection(&body)
    }
}

#[async_trait]
impl Geocoder for MapboxGeocoder {
    async fn reverse(&self, coord: Coordinate) -> Result<String, GeocodingError> {
        let collection = self
            .fetch(&format!("{},{}", coord.longitude, coord.latitude))
            .await?;
        let feature = collection.features.first().ok_or(GeocodingError::NoResult)?;

        let locality = locality_of(feature).ok_or(GeocodingError::NoResult)?;
        tracing::debug!(
            latitude = coord.latitude,
            longitude = coord.longitude,
            locality = %locality,
            "Reverse geocoded coordinate"
        );
        Ok(locality)
    }

    async fn forward(&self, query: &str) -> Result<Coordinate, GeocodingError> {
        let collection = self.fetch(query).await?;
        let feature = collection.features.first().ok_or(GeocodingError::NoResult)?;

        let coord = center_of(feature)?;
        tracing::debug!(
            query,
            latitude = coord.latitude,
            longitude = coord.longitude,
            "Forward geocoded query"
        );
        Ok(coord)
    }
}

/// Parse a response body into a feature collection.
///
/// An empty body and JSON of the wrong shape are both `Malformed`.
fn parse_collection(body: &str) -> Result<FeatureCollection, GeocodingError> {
    if body.trim().is_empty() {
        return Err(GeocodingError::Malformed("empty response body".to_string()));
    }
    serde_json::from_str(body).map_err(|e| GeocodingError::Malformed(e.to_string()))
}

/// Locality label for a reverse result.
fn locality_of(feature: &Feature) -> Option<String> {
    feature
        .context
        .iter()
        .find(|entry| entry.id.starts_with("place"))
        .map(|entry| entry.text.clone())
        .or_else(|| feature.text.clone())
}

/// Best-match coordinate for a forward result; the wire order is
/// `[longitude, latitude]`.
fn center_of(feature: &Feature) -> Result<Coordinate, GeocodingError> {
    match feature.center[..] {
        [longitude, latitude, ..] => Ok(Coordinate::new(latitude, longitude)),
        _ => Err(GeocodingError::Malformed(
            "feature center is not a [lon, lat] pair".to_string(),
        )),
    }
}
