//! Waymark session controller.
//!
//! Orchestrates one browser session of the places app: geolocation
//! acquisition, the startup information load, the add-place, recall,
//! delete, and goto-by-name workflows, and the interaction state
//! machine governing form visibility. The map, the place list, and the
//! geolocation sensor are collaborators behind the [`MapView`] and
//! [`Geolocator`] seams, so the whole controller runs headless.

pub mod config;
pub mod controller;
pub mod error;
pub mod geolocate;
pub mod state;
pub mod view;

pub use config::SessionConfig;
pub use controller::SessionController;
pub use error::SessionError;
pub use geolocate::{GeolocationError, Geolocator, StaticGeolocator};
pub use state::InteractionState;
pub use view::MapView;
