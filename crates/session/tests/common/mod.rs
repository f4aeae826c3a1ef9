//! Shared fakes for the controller tests: a recording view, a scripted
//! geocoder, and a harness wiring them to an in-memory store.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;
use waymark_core::types::PlaceId;
use waymark_core::{Coordinate, Place};
use waymark_events::{EventBus, SessionEvent};
use waymark_geocoding::{Geocoder, GeocodingError};
use waymark_session::{
    GeolocationError, Geolocator, MapView, SessionConfig, SessionController,
};
use waymark_store::{MemoryStore, PlaceRegistry, PlaceStore};

// ---------------------------------------------------------------------------
// RecordingView
// ---------------------------------------------------------------------------

/// Headless view recording every operation the controller dispatches.
#[derive(Default)]
pub struct RecordingView {
    pub inits: Mutex<Vec<(Coordinate, u8)>>,
    pub tile_layers: Mutex<Vec<String>>,
    pub markers: Mutex<Vec<(Coordinate, String)>>,
    pub pans: Mutex<Vec<(Coordinate, u8)>>,
    pub rendered: Mutex<Vec<(PlaceId, String, f64)>>,
    pub removed: Mutex<Vec<PlaceId>>,
    pub headers: Mutex<Vec<String>>,
    pub coords_labels: Mutex<Vec<String>>,
    pub form_visible: Mutex<bool>,
}

impl RecordingView {
    pub fn last_header(&self) -> Option<String> {
        self.headers.lock().unwrap().last().cloned()
    }

    pub fn marker_texts(&self) -> Vec<String> {
        self.markers
            .lock()
            .unwrap()
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }

    pub fn rendered_count(&self) -> usize {
        self.rendered.lock().unwrap().len()
    }

    pub fn form_visible(&self) -> bool {
        *self.form_visible.lock().unwrap()
    }
}

impl MapView for RecordingView {
    fn init_map(&self, center: Coordinate, zoom: u8) {
        self.inits.lock().unwrap().push((center, zoom));
    }

    fn add_tile_layer(&self, url: &str) {
        self.tile_layers.lock().unwrap().push(url.to_string());
    }

    fn place_marker(&self, coord: Coordinate, popup_text: &str) {
        self.markers
            .lock()
            .unwrap()
            .push((coord, popup_text.to_string()));
    }

    fn pan_to(&self, coord: Coordinate, zoom: u8) {
        self.pans.lock().unwrap().push((coord, zoom));
    }

    fn render_place(&self, place: &Place, distance_km: f64) {
        self.rendered
            .lock()
            .unwrap()
            .push((place.id, place.name.clone(), distance_km));
    }

    fn remove_place(&self, id: PlaceId) {
        self.removed.lock().unwrap().push(id);
        self.rendered.lock().unwrap().retain(|(pid, _, _)| *pid != id);
    }

    fn set_header(&self, text: &str) {
        self.headers.lock().unwrap().push(text.to_string());
    }

    fn set_coords_label(&self, text: &str) {
        self.coords_labels.lock().unwrap().push(text.to_string());
    }

    fn show_add_form(&self) {
        *self.form_visible.lock().unwrap() = true;
    }

    fn hide_add_form(&self) {
        *self.form_visible.lock().unwrap() = false;
    }
}

// ---------------------------------------------------------------------------
// ScriptedGeocoder
// ---------------------------------------------------------------------------

/// Geocoder answering from pre-scripted queues.
///
/// An exhausted queue answers `NoResult`. An optional delay makes every
/// call slow, for exercising the deadline race.
#[derive(Default)]
pub struct ScriptedGeocoder {
    reverse: Mutex<VecDeque<Result<String, GeocodingError>>>,
    forward: Mutex<VecDeque<Result<Coordinate, GeocodingError>>>,
    delay: Mutex<Option<Duration>>,
}

impl ScriptedGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_reverse(&self, result: Result<String, GeocodingError>) {
        self.reverse.lock().unwrap().push_back(result);
    }

    pub fn push_forward(&self, result: Result<Coordinate, GeocodingError>) {
        self.forward.lock().unwrap().push_back(result);
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    async fn apply_delay(&self) {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl Geocoder for ScriptedGeocoder {
    async fn reverse(&self, _coord: Coordinate) -> Result<String, GeocodingError> {
        self.apply_delay().await;
        self.reverse
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GeocodingError::NoResult))
    }

    async fn forward(&self, _query: &str) -> Result<Coordinate, GeocodingError> {
        self.apply_delay().await;
        self.forward
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GeocodingError::NoResult))
    }
}

/// `Geocoder` delegate over a shared [`ScriptedGeocoder`], so the same
/// instance can sit behind a `TimedGeocoder` and still be scripted.
pub struct SharedGeocoder(pub Arc<ScriptedGeocoder>);

#[async_trait]
impl Geocoder for SharedGeocoder {
    async fn reverse(&self, coord: Coordinate) -> Result<String, GeocodingError> {
        self.0.reverse(coord).await
    }

    async fn forward(&self, query: &str) -> Result<Coordinate, GeocodingError> {
        self.0.forward(query).await
    }
}

// ---------------------------------------------------------------------------
// Geolocators
// ---------------------------------------------------------------------------

/// Geolocator that always denies.
pub struct DeniedGeolocator;

#[async_trait]
impl Geolocator for DeniedGeolocator {
    async fn locate(&self) -> Result<Coordinate, GeolocationError> {
        Err(GeolocationError::Denied)
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

pub const HOME: Coordinate = Coordinate {
    latitude: 45.0,
    longitude: 9.0,
};

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub geocoder: Arc<ScriptedGeocoder>,
    pub view: Arc<RecordingView>,
    pub bus: Arc<EventBus>,
    pub events: broadcast::Receiver<SessionEvent>,
    pub controller: SessionController,
}

/// Build a controller over an empty in-memory store.
pub async fn harness() -> Harness {
    harness_with_store(Arc::new(MemoryStore::new())).await
}

/// Build a controller over a seeded in-memory store.
pub async fn harness_with_store(store: Arc<MemoryStore>) -> Harness {
    let geocoder = Arc::new(ScriptedGeocoder::new());
    harness_with(store, geocoder.clone(), geocoder).await
}

/// Build a controller with an arbitrary geocoder (e.g. deadline-wrapped),
/// keeping the scripted handle for the test.
pub async fn harness_with(
    store: Arc<MemoryStore>,
    scripted: Arc<ScriptedGeocoder>,
    geocoder: Arc<dyn Geocoder>,
) -> Harness {
    let view = Arc::new(RecordingView::default());
    let bus = Arc::new(EventBus::default());
    let events = bus.subscribe();
    let registry = PlaceRegistry::load(store.clone() as Arc<dyn PlaceStore>).await;
    let controller = SessionController::new(
        registry,
        geocoder,
        view.clone(),
        bus.clone(),
        SessionConfig::default(),
    );
    Harness {
        store,
        geocoder: scripted,
        view,
        bus,
        events,
        controller,
    }
}

/// Drain every pending event type off a subscription.
pub fn drain_events(rx: &mut broadcast::Receiver<SessionEvent>) -> Vec<String> {
    let mut types = Vec::new();
    while let Ok(event) = rx.try_recv() {
        types.push(event.event_type);
    }
    types
}

/// Count occurrences of one event type in a drained list.
pub fn count_of(types: &[String], wanted: &str) -> usize {
    types.iter().filter(|t| t.as_str() == wanted).count()
}
