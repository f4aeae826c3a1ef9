//! Geolocation collaborator seam.
//!
//! One-shot position acquisition. The core accepts success or failure;
//! it does not manage any permission flow.

use async_trait::async_trait;
use waymark_core::Coordinate;

/// Errors from the geolocation collaborator.
#[derive(Debug, thiserror::Error)]
pub enum GeolocationError {
    /// The user denied the position request.
    #[error("Geolocation permission denied")]
    Denied,

    /// The sensor is absent or failed.
    #[error("Geolocation unavailable: {0}")]
    Unavailable(String),
}

/// One-shot supplier of the user's current coordinate.
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn locate(&self) -> Result<Coordinate, GeolocationError>;
}

/// Geolocator answering with a fixed coordinate.
///
/// Stands in for the browser sensor in headless runs and tests.
pub struct StaticGeolocator {
    coord: Coordinate,
}

impl StaticGeolocator {
    pub fn new(coord: Coordinate) -> Self {
        Self { coord }
    }
}

#[async_trait]
impl Geolocator for StaticGeolocator {
    async fn locate(&self) -> Result<Coordinate, GeolocationError> {
        Ok(self.coord)
    }
}
