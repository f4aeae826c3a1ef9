//! Deadline race for geocoding calls.
//!
//! Every lookup races against a timer. When the timer wins, the
//! in-flight future is dropped, so a late response can never be applied
//! to application state. This is the only cancellation primitive in the
//! client; there is no retry.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use waymark_core::Coordinate;

use crate::config::GeocodingConfig;
use crate::error::GeocodingError;
use crate::provider::Geocoder;

/// Race `operation` against `timeout`.
///
/// Returns the operation's result if it completes first, otherwise
/// [`GeocodingError::Timeout`]. The losing operation is dropped.
pub async fn with_deadline<T, F>(timeout: Duration, operation: F) -> Result<T, GeocodingError>
where
    F: Future<Output = Result<T, GeocodingError>>,
{
    match tokio::time::timeout(timeout, operation).await {
        Ok(result) => result,
        Err(_) => Err(GeocodingError::Timeout { after: timeout }),
    }
}

/// Decorator applying the configured deadline to every call of an inner
/// [`Geocoder`].
pub struct TimedGeocoder<G> {
    inner: G,
    timeout: Duration,
}

impl<G> TimedGeocoder<G> {
    pub fn new(inner: G, config: &GeocodingConfig) -> Self {
        Self {
            inner,
            timeout: config.timeout,
        }
    }
}

#[async_trait]
impl<G: Geocoder> Geocoder for TimedGeocoder<G> {
    async fn reverse(&self, coord: Coordinate) -> Result<String, GeocodingError> {
        with_deadline(self.timeout, self.inner.reverse(coord)).await
    }

    async fn forward(&self, query: &str) -> Result<Coordinate, GeocodingError> {
        with_deadline(self.timeout, self.inner.forward(query)).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn fast_operation_passes_through() {
        let result = with_deadline(Duration::from_secs(1), async { Ok::<_, GeocodingError>(42) });
        assert_eq!(result.await.unwrap(), 42);
    }

    #[tokio::test]
    async fn fast_failure_passes_through() {
        let result = with_deadline(Duration::from_secs(1), async {
            Err::<(), _>(GeocodingError::NoResult)
        })
        .await;
        assert!(matches!(result, Err(GeocodingError::NoResult)));
    }

    #[tokio::test]
    async fn slow_operation_times_out() {
        let result = with_deadline(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, GeocodingError>(())
        })
        .await;
        assert!(matches!(result, Err(GeocodingError::Timeout { .. })));
    }

    #[tokio::test]
    async fn late_result_is_discarded() {
        let landed = Arc::new(AtomicBool::new(false));
        let flag = landed.clone();

        let result = with_deadline(Duration::from_millis(10), async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            flag.store(true, Ordering::SeqCst);
            Ok::<_, GeocodingError>(())
        })
        .await;
        assert!(matches!(result, Err(GeocodingError::Timeout { .. })));

        // The losing future was dropped at the deadline; even after its
        // would-be completion time, its effect never lands.
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(!landed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn timed_geocoder_applies_deadline_to_both_operations() {
        struct StalledGeocoder;

        #[async_trait]
        impl Geocoder for StalledGeocoder {
            async fn reverse(&self, _coord: Coordinate) -> Result<String, GeocodingError> {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok("never".to_string())
            }

            async fn forward(&self, _query: &str) -> Result<Coordinate, GeocodingError> {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(Coordinate::new(0.0, 0.0))
            }
        }

        let config = GeocodingConfig {
            timeout: Duration::from_millis(10),
        };
        let geocoder = TimedGeocoder::new(StalledGeocoder, &config);

        let reverse = geocoder.reverse(Coordinate::new(45.0, 9.0)).await;
        assert!(matches!(reverse, Err(GeocodingError::Timeout { .. })));

        let forward = geocoder.forward("Milan").await;
        assert!(matches!(forward, Err(GeocodingError::Timeout { .. })));
    }
}
