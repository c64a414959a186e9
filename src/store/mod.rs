//! Persistence capability the rider service depends on.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::location::{Coordinates, Location};
use crate::models::rider::{NewRider, Rider, RiderChanges, RiderId};

pub use memory::InMemoryStore;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("rider {0} does not exist")]
    MissingRider(RiderId),

    #[error("rider {0} already has a location")]
    DuplicateLocation(RiderId),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Keyed storage for riders and their (at most one) location.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert_rider(&self, rider: NewRider) -> StoreResult<Rider>;

    /// All riders, ascending by id.
    async fn list_riders(&self) -> StoreResult<Vec<Rider>>;

    async fn get_rider(&self, id: RiderId) -> StoreResult<Option<Rider>>;

    async fn update_rider(&self, id: RiderId, changes: RiderChanges) -> StoreResult<Rider>;

    /// Removes the rider together with its location, returning the removed rider.
    async fn delete_rider(&self, id: RiderId) -> StoreResult<Rider>;

    async fn insert_location(
        &self,
        rider_id: RiderId,
        coordinates: Coordinates,
    ) -> StoreResult<Location>;

    async fn get_location_by_rider(&self, rider_id: RiderId) -> StoreResult<Option<Location>>;

    /// Every rider that has a location attached, ascending by rider id.
    async fn list_located_riders(&self) -> StoreResult<Vec<(Rider, Location)>>;

    async fn count_riders(&self) -> StoreResult<usize>;

    async fn count_locations(&self) -> StoreResult<usize>;
}
