use std::time::Duration;

/// Errors from the geocoding client.
///
/// The kinds matter to callers: `NoResult` renders as a "not found"
/// label, everything else as a generic lookup failure.
#[derive(Debug, thiserror::Error)]
pub enum GeocodingError {
    /// The external call did not complete before the configured deadline.
    #[error("Geocoding request timed out after {after:?}")]
    Timeout { after: Duration },

    /// The HTTP request failed or returned a non-success status.
    #[error("Geocoding transport failure: {0}")]
    Transport(String),

    /// The service answered but had no result for the query.
    #[error("No geocoding result found")]
    NoResult,

    /// The response body was empty or could not be parsed.
    #[error("Malformed geocoding response: {0}")]
    Malformed(String),
}
