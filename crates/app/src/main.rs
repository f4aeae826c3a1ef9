//! Headless wiring of the session core.
//!
//! Stands the whole stack up without a browser: the home coordinate
//! comes from `HOME_LAT`/`HOME_LON` instead of the geolocation sensor,
//! render operations are logged instead of drawn, and the place
//! snapshot lives under `WAYMARK_DATA_DIR`. Runs the startup workflow
//! and exits.

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use waymark_core::types::PlaceId;
use waymark_core::{Coordinate, Place};
use waymark_events::EventBus;
use waymark_geocoding::{Geocoder, GeocodingConfig, MapboxGeocoder, TimedGeocoder};
use waymark_session::{MapView, SessionConfig, SessionController, StaticGeolocator};
use waymark_store::{JsonFileStore, PlaceRegistry, PlaceStore};

/// View that logs every render operation.
struct LogView;

impl MapView for LogView {
    fn init_map(&self, center: Coordinate, zoom: u8) {
        tracing::info!(%center, zoom, "Map initialized");
    }

    fn add_tile_layer(&self, url: &str) {
        tracing::info!(url, "Tile layer added");
    }

    fn place_marker(&self, coord: Coordinate, popup_text: &str) {
        tracing::info!(%coord, popup_text, "Marker placed");
    }

    fn pan_to(&self, coord: Coordinate, zoom: u8) {
        tracing::info!(%coord, zoom, "View panned");
    }

    fn render_place(&self, place: &Place, distance_km: f64) {
        tracing::info!(
            place_id = place.id,
            name = %place.name,
            locality = place.locality_label(),
            created = %place.created_label(),
            distance_km,
            "Place rendered"
        );
    }

    fn remove_place(&self, id: PlaceId) {
        tracing::info!(place_id = id, "Place entry removed");
    }

    fn set_header(&self, text: &str) {
        tracing::info!(text, "Header updated");
    }

    fn set_coords_label(&self, text: &str) {
        tracing::info!(text, "Coordinates label updated");
    }

    fn show_add_form(&self) {
        tracing::info!("Add-place form shown");
    }

    fn hide_add_form(&self) {
        tracing::info!("Add-place form hidden");
    }
}

/// Read the stand-in home coordinate from the environment.
fn geolocator_from_env() -> anyhow::Result<StaticGeolocator> {
    let latitude: f64 = std::env::var("HOME_LAT")
        .context("HOME_LAT must be set (headless stand-in for the geolocation sensor)")?
        .parse()
        .context("HOME_LAT must be a valid f64")?;
    let longitude: f64 = std::env::var("HOME_LON")
        .context("HOME_LON must be set (headless stand-in for the geolocation sensor)")?
        .parse()
        .context("HOME_LON must be a valid f64")?;
    Ok(StaticGeolocator::new(Coordinate::new(latitude, longitude)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "waymark=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let access_token = std::env::var("MAPBOX_TOKEN").context("MAPBOX_TOKEN must be set")?;
    let data_dir = std::env::var("WAYMARK_DATA_DIR").unwrap_or_else(|_| ".waymark".into());

    let store: Arc<dyn PlaceStore> = Arc::new(JsonFileStore::new(&data_dir));
    let registry = PlaceRegistry::load(store).await;
    tracing::info!(places = registry.len(), data_dir = %data_dir, "Place snapshot loaded");

    let geocoder: Arc<dyn Geocoder> = Arc::new(TimedGeocoder::new(
        MapboxGeocoder::new(access_token),
        &GeocodingConfig::from_env(),
    ));

    let bus = Arc::new(EventBus::default());
    let mut notifications = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match notifications.recv().await {
                Ok(event) => tracing::info!(
                    event_type = %event.event_type,
                    payload = %event.payload,
                    "Session event"
                ),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification logger lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let mut controller = SessionController::new(
        registry,
        geocoder,
        Arc::new(LogView),
        bus,
        SessionConfig::from_env(),
    );

    controller.start(&geolocator_from_env()?).await?;
    tracing::info!(places = controller.registry().len(), "Startup complete");

    Ok(())
}
