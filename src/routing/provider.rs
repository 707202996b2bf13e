use async_trait::async_trait;

use crate::entities::Coordinates;

/// Outcome of a distance lookup. Providers translate every failure mode
/// (geocoding miss, unroutable pair, transport error) into `Unreachable`
/// rather than raising it, so graph construction can degrade per connection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Distance {
    Meters(f64),
    Unreachable,
}

impl Distance {
    pub fn meters(self) -> Option<f64> {
        match self {
            Self::Meters(meters) => Some(meters),
            Self::Unreachable => None,
        }
    }
}

#[async_trait]
pub trait DistanceProvider: Send + Sync {
    async fn distance_between_coordinates(
        &self,
        origin: &Coordinates,
        destination: &Coordinates,
    ) -> Distance;

    async fn distance_between_names(&self, origin: &str, destination: &str) -> Distance;
}
