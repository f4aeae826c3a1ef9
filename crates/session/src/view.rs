//! Map/view collaborator seam.
//!
//! The controller never touches a concrete UI toolkit; everything it
//! needs from the map and the DOM is behind this trait, so the state
//! machine runs headless under test.

use waymark_core::types::PlaceId;
use waymark_core::{Coordinate, Place};

/// Rendering operations consumed by the session controller.
///
/// Implementations are expected to be cheap and non-blocking; these are
/// fire-and-forget render instructions dispatched from workflows.
pub trait MapView: Send + Sync {
    /// Initialize the interactive map centered at `center`.
    fn init_map(&self, center: Coordinate, zoom: u8);

    /// Add a tile layer to the initialized map.
    fn add_tile_layer(&self, url: &str);

    /// Place a marker with popup text at a coordinate.
    fn place_marker(&self, coord: Coordinate, popup_text: &str);

    /// Pan/center the view to a coordinate with an animated transition.
    fn pan_to(&self, coord: Coordinate, zoom: u8);

    /// Append a place entry (name, timestamp, locality, distance) to the
    /// place list.
    fn render_place(&self, place: &Place, distance_km: f64);

    /// Remove a place entry from the place list.
    fn remove_place(&self, id: PlaceId);

    /// Update the home header label.
    fn set_header(&self, text: &str);

    /// Update the raw home coordinates label.
    fn set_coords_label(&self, text: &str);

    /// Reveal the add-place form.
    fn show_add_form(&self);

    /// Hide the add-place form and clear its name field.
    fn hide_add_form(&self);
}
