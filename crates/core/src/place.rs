//! The persisted place record.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::geo::Coordinate;
use crate::types::{PlaceId, Timestamp};

/// Label shown when reverse geocoding could not resolve a locality.
pub const LOCALITY_FALLBACK: &str = "not found";

/// A user-created, named, geolocated bookmark.
///
/// `locality` is absent when the reverse-geocoding lookup failed at
/// creation time; the place is persisted and rendered regardless.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Place {
    /// Primary key, derived from the creation timestamp (ms since epoch).
    pub id: PlaceId,
    /// User-supplied display name.
    #[validate(length(min = 1, message = "place name must not be empty"))]
    pub name: String,
    /// Where the user clicked on the map.
    pub coords: Coordinate,
    /// Locality resolved via reverse geocoding, if the lookup succeeded.
    pub locality: Option<String>,
    /// Creation time, used only for display formatting.
    pub created_at: Timestamp,
}

impl Place {
    pub fn new(
        id: PlaceId,
        name: impl Into<String>,
        coords: Coordinate,
        locality: Option<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            coords,
            locality,
            created_at,
        }
    }

    /// The resolved locality, or [`LOCALITY_FALLBACK`] when the lookup failed.
    pub fn locality_label(&self) -> &str {
        self.locality.as_deref().unwrap_or(LOCALITY_FALLBACK)
    }

    /// Creation time formatted for the place list (`DD/MM/YYYY HH:MM`).
    pub fn created_label(&self) -> String {
        self.created_at.format("%d/%m/%Y %H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn colosseum() -> Place {
        Place::new(
            1_700_000_000_000,
            "Colosseum",
            Coordinate::new(41.9, 12.5),
            Some("Rome".to_string()),
            chrono::Utc.with_ymd_and_hms(2024, 3, 7, 18, 30, 0).unwrap(),
        )
    }

    #[test]
    fn serde_round_trip() {
        let place = colosseum();
        let json = serde_json::to_string(&place).unwrap();
        let back: Place = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, place.id);
        assert_eq!(back.name, place.name);
        assert_eq!(back.coords, place.coords);
        assert_eq!(back.locality, place.locality);
        assert_eq!(back.created_at, place.created_at);
    }

    #[test]
    fn missing_locality_round_trips_as_none() {
        let mut place = colosseum();
        place.locality = None;
        let json = serde_json::to_string(&place).unwrap();
        let back: Place = serde_json::from_str(&json).unwrap();
        assert!(back.locality.is_none());
    }

    #[test]
    fn locality_label_falls_back() {
        let mut place = colosseum();
        assert_eq!(place.locality_label(), "Rome");
        place.locality = None;
        assert_eq!(place.locality_label(), LOCALITY_FALLBACK);
    }

    #[test]
    fn created_label_is_numeric_date_time() {
        assert_eq!(colosseum().created_label(), "07/03/2024 18:30");
    }

    #[test]
    fn empty_name_fails_validation() {
        let mut place = colosseum();
        place.name = String::new();
        assert!(place.validate().is_err());
    }

    #[test]
    fn non_empty_name_passes_validation() {
        assert!(colosseum().validate().is_ok());
    }
}
