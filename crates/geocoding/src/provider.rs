use async_trait::async_trait;
use waymark_core::Coordinate;

use crate::error::GeocodingError;

/// The two abstract geocoding operations the application needs.
///
/// A single failed attempt is surfaced immediately; there are no
/// retries at this layer.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve the locality containing the given coordinate.
    async fn reverse(&self, coord: Coordinate) -> Result<String, GeocodingError>;

    /// Resolve the best-match coordinate for a free-text place query.
    async fn forward(&self, query: &str) -> Result<Coordinate, GeocodingError>;
}
