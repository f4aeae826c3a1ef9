//! Geocoding service client.
//!
//! Wraps an external forward/reverse geocoding HTTP service behind the
//! [`Geocoder`] trait, with a Mapbox-style provider, a configurable
//! deadline race, and errors distinguishable by kind so callers can
//! choose between "not found" and generic-failure fallbacks.

pub mod config;
pub mod deadline;
pub mod error;
pub mod mapbox;
pub mod provider;

pub use config::GeocodingConfig;
pub use deadline::{with_deadline, TimedGeocoder};
pub use error::GeocodingError;
pub use mapbox::MapboxGeocoder;
pub use provider::Geocoder;
