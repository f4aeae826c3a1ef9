//! Durable local storage for the place registry.
//!
//! The whole ordered place collection is persisted as a single JSON
//! snapshot under the fixed storage key `places`, overwritten on every
//! registry mutation. [`PlaceStore`] is the seam: [`JsonFileStore`] is
//! the on-disk backend, [`MemoryStore`] the in-memory substitute used
//! in tests.

pub mod registry;
pub mod store;

pub use registry::PlaceRegistry;
pub use store::{JsonFileStore, MemoryStore, PlaceStore, StoreError, STORAGE_KEY};
