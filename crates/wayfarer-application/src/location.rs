//! Current location resolution with a configured fallback.

use wayfarer_core::location::{LocationFix, LocationProvider, LocationSource};
use wayfarer_core::{Coordinates, WayfarerError};

/// Asks the provider for a fix and falls back to `fallback` when none is available.
///
/// Permission denials and positioning failures are logged, never returned;
/// the caller can tell the two outcomes apart with [`LocationFix::is_fallback`].
pub async fn resolve_location(provider: &dyn LocationProvider, fallback: Coordinates) -> LocationFix {
    match provider.current_position().await {
        Ok(coordinates) if coordinates.is_finite() => LocationFix {
            coordinates,
            source: LocationSource::Device,
        },
        Ok(coordinates) => {
            tracing::warn!(
                "[Location] Ignoring non-finite fix {:?}, using default location",
                coordinates
            );
            fallback_fix(fallback)
        }
        Err(WayfarerError::PermissionDenied(reason)) => {
            tracing::warn!("[Location] Permission denied ({}), using default location", reason);
            fallback_fix(fallback)
        }
        Err(e) => {
            tracing::warn!("[Location] Failed to get position ({}), using default location", e);
            fallback_fix(fallback)
        }
    }
}

fn fallback_fix(coordinates: Coordinates) -> LocationFix {
    LocationFix {
        coordinates,
        source: LocationSource::Fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use wayfarer_core::Result;

    struct FixedProvider(Result<Coordinates>);

    #[async_trait]
    impl LocationProvider for FixedProvider {
        async fn current_position(&self) -> Result<Coordinates> {
            self.0.clone()
        }
    }

    fn paris() -> Coordinates {
        Coordinates::new(48.8566, 2.3522)
    }

    #[tokio::test]
    async fn test_device_fix() {
        let marseille = Coordinates::new(43.2965, 5.3698);
        let fix = resolve_location(&FixedProvider(Ok(marseille)), paris()).await;

        assert_eq!(fix.coordinates, marseille);
        assert!(!fix.is_fallback());
    }

    #[tokio::test]
    async fn test_permission_denied_falls_back() {
        let provider = FixedProvider(Err(WayfarerError::PermissionDenied("refused".to_string())));
        let fix = resolve_location(&provider, paris()).await;

        assert_eq!(fix.coordinates, paris());
        assert!(fix.is_fallback());
    }

    #[tokio::test]
    async fn test_other_failures_fall_back() {
        let provider = FixedProvider(Err(WayfarerError::internal("no satellites")));
        assert!(resolve_location(&provider, paris()).await.is_fallback());

        let provider = FixedProvider(Ok(Coordinates::new(f64::NAN, 2.0)));
        assert!(resolve_location(&provider, paris()).await.is_fallback());
    }
}
