use std::time::Duration;

/// Default deadline for a single geocoding call, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 14;

/// Geocoding client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct GeocodingConfig {
    /// Deadline for a single forward or reverse lookup (default: 14 s).
    pub timeout: Duration,
}

impl GeocodingConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default |
    /// |-------------------------|---------|
    /// | `GEOCODING_TIMEOUT_SECS`| `14`    |
    pub fn from_env() -> Self {
        let timeout_secs: u64 = std::env::var("GEOCODING_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("GEOCODING_TIMEOUT_SECS must be a valid u64");

        Self {
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
