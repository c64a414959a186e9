//! Rider and location operations on top of a [`RecordStore`].

pub mod nearby;

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::AppError;
use crate::models::location::{Coordinates, Location};
use crate::models::rider::{NewRider, Rider, RiderChanges, RiderId};
use crate::store::RecordStore;

pub use nearby::SEARCH_RADIUS_KM;

#[derive(Clone)]
pub struct RiderService {
    store: Arc<dyn RecordStore>,
}

impl RiderService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn create_rider(&self, rider: NewRider) -> Result<Rider, AppError> {
        let rider = self.store.insert_rider(rider).await?;
        info!(rider_id = rider.id, "rider created");
        Ok(rider)
    }

    /// Fails with `NotFound` when the store holds no riders at all.
    pub async fn find_all_riders(&self) -> Result<Vec<Rider>, AppError> {
        let riders = self.store.list_riders().await?;
        if riders.is_empty() {
            return Err(AppError::NotFound("No riders found".to_string()));
        }
        Ok(riders)
    }

    pub async fn find_rider_by_id(&self, id: RiderId) -> Result<Rider, AppError> {
        self.store
            .get_rider(id)
            .await?
            .ok_or_else(|| rider_not_found(id))
    }

    pub async fn update_rider(&self, id: RiderId, changes: RiderChanges) -> Result<Rider, AppError> {
        match self.store.update_rider(id, changes).await {
            Ok(rider) => {
                info!(rider_id = id, "rider updated");
                Ok(rider)
            }
            Err(err) => {
                warn!(rider_id = id, error = %err, "rider update failed");
                Err(rider_not_found(id))
            }
        }
    }

    pub async fn remove_rider(&self, id: RiderId) -> Result<Rider, AppError> {
        match self.store.delete_rider(id).await {
            Ok(rider) => {
                info!(rider_id = id, "rider removed");
                Ok(rider)
            }
            Err(err) => {
                warn!(rider_id = id, error = %err, "rider removal failed");
                Err(rider_not_found(id))
            }
        }
    }

    /// Any store failure, including an unknown rider or an existing
    /// location, surfaces as `BadRequest`.
    pub async fn create_location(
        &self,
        rider_id: RiderId,
        coordinates: Coordinates,
    ) -> Result<Location, AppError> {
        match self.store.insert_location(rider_id, coordinates).await {
            Ok(location) => {
                info!(rider_id, location_id = location.id, "location created");
                Ok(location)
            }
            Err(err) => {
                warn!(rider_id, error = %err, "location creation failed");
                Err(AppError::BadRequest(format!(
                    "Failed to create location for Rider ID {rider_id}"
                )))
            }
        }
    }

    pub async fn find_location_by_rider_id(&self, rider_id: RiderId) -> Result<Location, AppError> {
        self.store
            .get_location_by_rider(rider_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Location for Rider ID {rider_id} not found"))
            })
    }

    pub async fn count_riders(&self) -> Result<usize, AppError> {
        Ok(self.store.count_riders().await?)
    }

    pub async fn count_locations(&self) -> Result<usize, AppError> {
        Ok(self.store.count_locations().await?)
    }
}

fn rider_not_found(id: RiderId) -> AppError {
    AppError::NotFound(format!("Rider with ID {id} not found"))
}
