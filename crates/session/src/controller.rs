//! The session controller.
//!
//! Owns the home coordinate, the interaction state machine, and the
//! place registry, and drives every workflow: startup, add-place,
//! recall, delete, and goto-by-name. Collaborators (map view, geocoder,
//! event bus) are injected and shared via `Arc`.
//!
//! One logical thread of control drives the controller; geocoding and
//! geolocation calls suspend the workflow without blocking the UI, and
//! the registry is never mutated concurrently.

use std::sync::Arc;

use validator::Validate;
use waymark_core::types::PlaceId;
use waymark_core::{distance_km, rounded_km, Coordinate, CoreError, Place};
use waymark_events::{EventBus, SessionEvent};
use waymark_geocoding::Geocoder;
use waymark_store::PlaceRegistry;

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::geolocate::{GeolocationError, Geolocator};
use crate::state::InteractionState;
use crate::view::MapView;

/// Header label when reverse geocoding the home position fails.
const HEADER_FALLBACK: &str = "unable to find location";

/// Home marker popup when reverse geocoding the home position fails.
const HOME_MARKER_FALLBACK: &str = "no data found";

pub struct SessionController {
    home: Option<Coordinate>,
    state: InteractionState,
    registry: PlaceRegistry,
    geocoder: Arc<dyn Geocoder>,
    view: Arc<dyn MapView>,
    bus: Arc<EventBus>,
    config: SessionConfig,
}

impl SessionController {
    pub fn new(
        registry: PlaceRegistry,
        geocoder: Arc<dyn Geocoder>,
        view: Arc<dyn MapView>,
        bus: Arc<EventBus>,
        config: SessionConfig,
    ) -> Self {
        Self {
            home: None,
            state: InteractionState::Idle,
            registry,
            geocoder,
            view,
            bus,
            config,
        }
    }

    /// The home coordinate, once the session has started.
    pub fn home(&self) -> Option<Coordinate> {
        self.home
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn registry(&self) -> &PlaceRegistry {
        &self.registry
    }

    // -----------------------------------------------------------------
    // Startup
    // -----------------------------------------------------------------

    /// Run the startup workflow.
    ///
    /// Acquires the position once, renders the map, then concurrently
    /// reverse-geocodes the home label and renders every persisted
    /// place. Geolocation denial is terminal: nothing is rendered and
    /// the session stays unusable, with no retry.
    pub async fn start(&mut self, locator: &dyn Geolocator) -> Result<(), SessionError> {
        let home = locator.locate().await.map_err(|e| match e {
            GeolocationError::Denied => {
                tracing::error!("Geolocation denied; session cannot start");
                SessionError::GeolocationDenied
            }
            GeolocationError::Unavailable(msg) => {
                tracing::error!(error = %msg, "Geolocation unavailable");
                SessionError::Geolocation(msg)
            }
        })?;

        self.home = Some(home);
        tracing::info!(
            latitude = home.latitude,
            longitude = home.longitude,
            "Session home position acquired"
        );

        self.view.init_map(home, self.config.zoom);
        self.view.add_tile_layer(&self.config.tile_url);
        self.view.set_coords_label(&home.to_string());

        // The header lookup suspends on the network; persisted places
        // render meanwhile. Both need home, which is already set.
        tokio::join!(self.load_information(home), async {
            self.render_persisted(home);
        });

        self.bus.publish(SessionEvent::new("session.started"));
        Ok(())
    }

    /// Reverse-geocode the home position for the header label and place
    /// the home marker. The marker is placed on failure too.
    async fn load_information(&self, home: Coordinate) {
        match self.geocoder.reverse(home).await {
            Ok(locality) => {
                self.view.set_header(&format!("near {locality}"));
                self.view
                    .place_marker(home, &format!("current position: {locality}"));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to reverse geocode home position");
                self.view.set_header(HEADER_FALLBACK);
                self.view.place_marker(home, HOME_MARKER_FALLBACK);
                self.notify_geocoding_failure("startup", &e);
            }
        }
    }

    fn render_persisted(&self, home: Coordinate) {
        for place in self.registry.places() {
            self.render_place(home, place);
        }
    }

    // -----------------------------------------------------------------
    // Add-place workflow
    // -----------------------------------------------------------------

    /// Map click: record the coordinate and reveal the add-place form.
    ///
    /// A click while the form is already open re-records the pending
    /// coordinate; the latest click wins.
    pub fn on_map_click(&mut self, coord: Coordinate) -> Result<(), SessionError> {
        if self.home.is_none() {
            return Err(SessionError::NotStarted);
        }
        self.state = InteractionState::AwaitingPlaceName { coord };
        self.view.show_add_form();
        Ok(())
    }

    /// Add-place form submission.
    ///
    /// Reverse-geocodes the recorded click coordinate; creation proceeds
    /// even when the lookup fails, with no locality and a non-blocking
    /// error notification. The form closes and the state returns to
    /// idle regardless of the geocoding outcome.
    pub async fn submit_place(&mut self, name: &str) -> Result<Place, SessionError> {
        let home = self.home.ok_or(SessionError::NotStarted)?;
        let coord = match self.state {
            InteractionState::AwaitingPlaceName { coord } => coord,
            InteractionState::Idle => return Err(SessionError::NoPendingClick),
        };

        let locality = match self.geocoder.reverse(coord).await {
            Ok(locality) => Some(locality),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to reverse geocode new place");
                self.notify_geocoding_failure("add-place", &e);
                None
            }
        };

        let now = chrono::Utc::now();
        let place = Place::new(self.registry.next_id(now), name.trim(), coord, locality, now);
        // An empty name keeps the form open for correction.
        place
            .validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;

        let saved = self.registry.add(place.clone()).await;

        self.render_place(home, &place);
        self.bus.publish(
            SessionEvent::new("place.created")
                .with_place(place.id)
                .with_payload(serde_json::json!({ "name": place.name })),
        );
        self.hide_form();

        tracing::info!(
            place_id = place.id,
            name = %place.name,
            locality = place.locality.as_deref().unwrap_or_default(),
            "Place created"
        );

        if let Err(e) = saved {
            tracing::error!(error = %e, place_id = place.id, "Failed to persist place snapshot");
            self.bus.publish(
                SessionEvent::new("storage.write_failed")
                    .with_place(place.id)
                    .with_payload(serde_json::json!({ "error": e.to_string() })),
            );
            return Err(e.into());
        }
        Ok(place)
    }

    /// Escape key: close the add-place form without creating anything.
    pub fn cancel_form(&mut self) {
        if self.state.is_awaiting_place_name() {
            self.hide_form();
        }
    }

    // -----------------------------------------------------------------
    // Recall / delete / goto
    // -----------------------------------------------------------------

    /// Pan the map to a place's coordinate. No state change.
    pub fn recall(&self, id: PlaceId) -> Result<(), SessionError> {
        let place = self
            .registry
            .find_by_id(id)
            .ok_or(CoreError::NotFound { entity: "place", id })?;
        self.view.pan_to(place.coords, self.config.zoom);
        Ok(())
    }

    /// Pan the map back to the home position. No state change.
    pub fn recall_home(&self) -> Result<(), SessionError> {
        let home = self.home.ok_or(SessionError::NotStarted)?;
        self.view.pan_to(home, self.config.zoom);
        Ok(())
    }

    /// Remove a place from the registry and the view.
    ///
    /// An absent id is a no-op returning `Ok(false)`. The view is only
    /// ever updated in place; there is no reload.
    pub async fn delete_place(&mut self, id: PlaceId) -> Result<bool, SessionError> {
        let removed = match self.registry.remove(id).await {
            Ok(removed) => removed,
            Err(e) => {
                tracing::error!(error = %e, place_id = id, "Failed to persist place snapshot");
                self.bus.publish(
                    SessionEvent::new("storage.write_failed")
                        .with_place(id)
                        .with_payload(serde_json::json!({ "error": e.to_string() })),
                );
                return Err(e.into());
            }
        };

        if removed {
            self.view.remove_place(id);
            self.bus
                .publish(SessionEvent::new("place.removed").with_place(id));
            tracing::info!(place_id = id, "Place deleted");
        }
        Ok(removed)
    }

    /// Forward-geocode a free-text query and pan the map to the result.
    ///
    /// On failure the workflow aborts with a notification and no view
    /// change.
    pub async fn goto(&self, query: &str) -> Result<Coordinate, SessionError> {
        match self.geocoder.forward(query).await {
            Ok(coord) => {
                self.view.pan_to(coord, self.config.zoom);
                Ok(coord)
            }
            Err(e) => {
                tracing::warn!(query, error = %e, "Goto-by-name lookup failed");
                self.notify_geocoding_failure("goto", &e);
                Err(e.into())
            }
        }
    }

    // -----------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------

    fn render_place(&self, home: Coordinate, place: &Place) {
        let distance = rounded_km(distance_km(home, place.coords));
        self.view.place_marker(place.coords, &place.name);
        self.view.render_place(place, distance);
    }

    fn hide_form(&mut self) {
        self.state = InteractionState::Idle;
        self.view.hide_add_form();
    }

    fn notify_geocoding_failure(&self, workflow: &str, error: &waymark_geocoding::GeocodingError) {
        self.bus.publish(
            SessionEvent::new("geocoding.failed").with_payload(serde_json::json!({
                "workflow": workflow,
                "error": error.to_string(),
            })),
        );
    }
}
