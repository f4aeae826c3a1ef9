use waymark_core::CoreError;
use waymark_geocoding::GeocodingError;
use waymark_store::StoreError;

/// Errors surfaced by the session workflows.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The user denied geolocation; the session cannot start and is not
    /// retried.
    #[error("Geolocation permission denied")]
    GeolocationDenied,

    /// The geolocation sensor failed for another reason.
    #[error("Geolocation failed: {0}")]
    Geolocation(String),

    /// A workflow that needs the home coordinate ran before startup.
    #[error("Session not started: home position is not set")]
    NotStarted,

    /// Add-place submission without a recorded map click.
    #[error("No pending map click to attach the place to")]
    NoPendingClick,

    /// A domain-level error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The persistence snapshot write failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// A geocoding failure that aborted the workflow (goto-by-name).
    #[error("Geocoding error: {0}")]
    Geocoding(#[from] GeocodingError),
}
