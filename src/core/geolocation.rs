//! Current-location lookup for the location step.
//!
//! The position comes from an external provider. A successful lookup replaces
//! the draft's location with the coordinates and a formatted address; a failed
//! one leaves the draft untouched and the error goes back to the caller to
//! show.

use crate::{
    core::{
        booking::{DraftUpdate, Location},
        persistence::SnapshotStore,
        wizard::BookingWizard,
    },
    errors::{Error, Result},
};
use std::future::Future;
use tracing::warn;

/// Latitude and longitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Rejects NaN and infinite values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if latitude.is_finite() && longitude.is_finite() {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(Error::Geolocation {
                message: format!("invalid coordinates ({latitude}, {longitude})"),
            })
        }
    }

    /// A location whose address is `Lat: <lat>, Lng: <lng>` at four decimals.
    #[must_use]
    pub fn to_location(self) -> Location {
        Location {
            address: format!("Lat: {:.4}, Lng: {:.4}", self.latitude, self.longitude),
            latitude: Some(self.latitude),
            longitude: Some(self.longitude),
        }
    }
}

/// Source of the device's current position.
pub trait GeolocationProvider {
    fn current_position(&self) -> impl Future<Output = Result<Coordinates>> + Send;
}

impl<B: SnapshotStore> BookingWizard<B> {
    /// Fills the draft's location from `provider`. On failure the draft keeps
    /// whatever address was last typed.
    pub async fn use_current_location<G: GeolocationProvider>(&mut self, provider: &G) -> Result<()> {
        let position = provider
            .current_position()
            .await
            .inspect_err(|e| warn!("Geolocation lookup failed: {e}"))?;
        let coordinates = Coordinates::new(position.latitude, position.longitude)?;

        self.update_draft(DraftUpdate::default().location(coordinates.to_location()))
            .await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::step::Step;
    use crate::test_utils::memory_wizard;

    struct FixedPosition(f64, f64);

    impl GeolocationProvider for FixedPosition {
        async fn current_position(&self) -> Result<Coordinates> {
            // Raw values, as a device might report them
            Ok(Coordinates {
                latitude: self.0,
                longitude: self.1,
            })
        }
    }

    struct Unavailable;

    impl GeolocationProvider for Unavailable {
        async fn current_position(&self) -> Result<Coordinates> {
            Err(Error::Geolocation {
                message: "permission denied".to_string(),
            })
        }
    }

    #[test]
    fn test_location_formatting() {
        let location = Coordinates::new(12.971_598_7, 77.594_566_3).unwrap().to_location();
        assert_eq!(location.address, "Lat: 12.9716, Lng: 77.5946");
        assert_eq!(location.latitude, Some(12.971_598_7));
        assert_eq!(location.longitude, Some(77.594_566_3));
    }

    #[test]
    fn test_non_finite_coordinates_rejected() {
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(0.0, f64::INFINITY).is_err());
    }

    #[tokio::test]
    async fn test_successful_lookup_fills_location() -> Result<()> {
        let (mut wizard, _store) = memory_wizard().await;
        wizard.set_step(Step::LOCATION).await?;

        wizard
            .use_current_location(&FixedPosition(-33.868_8, 151.209_3))
            .await?;

        assert_eq!(wizard.draft().location.address, "Lat: -33.8688, Lng: 151.2093");
        assert!(wizard.can_advance());
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_lookup_keeps_typed_address() -> Result<()> {
        let (mut wizard, _store) = memory_wizard().await;
        wizard
            .update_draft(DraftUpdate::default().location(Location::from_address("12 Oak Rd")))
            .await?;

        let result = wizard.use_current_location(&Unavailable).await;

        assert!(matches!(result, Err(Error::Geolocation { .. })));
        assert_eq!(wizard.draft().location, Location::from_address("12 Oak Rd"));
        Ok(())
    }

    #[tokio::test]
    async fn test_nan_position_is_a_failure() -> Result<()> {
        let (mut wizard, _store) = memory_wizard().await;

        let result = wizard.use_current_location(&FixedPosition(f64::NAN, 1.0)).await;

        assert!(result.is_err());
        assert_eq!(wizard.draft().location, Location::default());
        Ok(())
    }
}
