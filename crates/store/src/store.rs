//! Snapshot persistence backends.
//!
//! A store holds one value: the serialized ordered place collection.
//! Reads that fail for any reason (missing file, malformed JSON) yield
//! an empty collection rather than an error; the registry simply starts
//! from a clean slate. Writes propagate their failure to the caller.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use waymark_core::Place;

/// Fixed storage key for the place snapshot.
pub const STORAGE_KEY: &str = "places";

/// Errors from the snapshot write path.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying storage write failed (disk full, permissions, ...).
    #[error("Storage write failed: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot could not be serialized.
    #[error("Snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable storage for the full ordered place collection.
///
/// `save` followed by `load` in the same session reproduces an
/// equivalent sequence.
#[async_trait]
pub trait PlaceStore: Send + Sync {
    /// Load the persisted collection. Missing or malformed data loads
    /// as an empty collection; this never errors.
    async fn load(&self) -> Vec<Place>;

    /// Overwrite the snapshot with the given collection.
    async fn save(&self, places: &[Place]) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// JsonFileStore
// ---------------------------------------------------------------------------

/// File-backed store writing `<dir>/places.json`.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`. The directory is created on the
    /// first write, not here.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(format!("{STORAGE_KEY}.json")),
        }
    }

    /// Full path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PlaceStore for JsonFileStore {
    async fn load(&self) -> Vec<Place> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&raw) {
            Ok(places) => places,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Ignoring malformed place snapshot"
                );
                Vec::new()
            }
        }
    }

    async fn save(&self, places: &[Place]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(places)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-memory store holding the serialized snapshot.
///
/// Goes through the same serde path as the file backend so round-trip
/// behavior matches. Tracks the number of writes and can be armed to
/// fail them, for test visibility into the write-through contract.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    snapshot: Option<String>,
    save_count: usize,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a raw snapshot string (possibly malformed).
    pub fn with_snapshot(raw: impl Into<String>) -> Self {
        let store = Self::new();
        store.inner.lock().unwrap().snapshot = Some(raw.into());
        store
    }

    /// Number of successful `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.inner.lock().unwrap().save_count
    }

    /// Make subsequent writes fail, simulating quota exhaustion.
    pub fn fail_writes(&self, fail: bool) {
        self.inner.lock().unwrap().fail_writes = fail;
    }
}

#[async_trait]
impl PlaceStore for MemoryStore {
    async fn load(&self) -> Vec<Place> {
        let inner = self.inner.lock().unwrap();
        inner
            .snapshot
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default()
    }

    async fn save(&self, places: &[Place]) -> Result<(), StoreError> {
        let json = serde_json::to_string(places)?;
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_writes {
            return Err(StoreError::Io(std::io::Error::other("quota exceeded")));
        }
        inner.snapshot = Some(json);
        inner.save_count += 1;
        Ok(())
    }
}
