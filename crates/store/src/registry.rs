//! In-memory ordered place collection with write-through persistence.

use std::sync::Arc;

use waymark_core::types::{PlaceId, Timestamp};
use waymark_core::Place;

use crate::store::{PlaceStore, StoreError};

/// The ordered place collection.
///
/// Iteration order is insertion order; deletion does not reorder the
/// remaining entries. Every mutation is immediately followed by a full
/// snapshot write to the backing [`PlaceStore`], so durable storage is
/// consistent with memory after each discrete user action.
pub struct PlaceRegistry {
    places: Vec<Place>,
    store: Arc<dyn PlaceStore>,
}

impl PlaceRegistry {
    /// Populate the registry from the store's current snapshot.
    pub async fn load(store: Arc<dyn PlaceStore>) -> Self {
        let places = store.load().await;
        tracing::debug!(count = places.len(), "Loaded place snapshot");
        Self { places, store }
    }

    /// All places in insertion order.
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn find_by_id(&self, id: PlaceId) -> Option<&Place> {
        self.places.iter().find(|p| p.id == id)
    }

    /// Next id for a place created at `now`.
    ///
    /// Ids are the creation timestamp in milliseconds, bumped past the
    /// newest existing id so same-millisecond creations stay unique and
    /// monotonic.
    pub fn next_id(&self, now: Timestamp) -> PlaceId {
        let now_ms = now.timestamp_millis();
        match self.places.last() {
            Some(last) => now_ms.max(last.id + 1),
            None => now_ms,
        }
    }

    /// Append a place and write through to the store.
    pub async fn add(&mut self, place: Place) -> Result<(), StoreError> {
        debug_assert!(
            self.find_by_id(place.id).is_none(),
            "duplicate place id {}",
            place.id
        );
        self.places.push(place);
        self.persist().await
    }

    /// Remove the place with the given id and write through to the store.
    ///
    /// Returns `Ok(false)` without touching storage when the id is
    /// absent; callers that care can distinguish the no-op.
    pub async fn remove(&mut self, id: PlaceId) -> Result<bool, StoreError> {
        let before = self.places.len();
        self.places.retain(|p| p.id != id);
        if self.places.len() == before {
            return Ok(false);
        }
        self.persist().await?;
        Ok(true)
    }

    async fn persist(&self) -> Result<(), StoreError> {
        self.store.save(&self.places).await
    }
}
