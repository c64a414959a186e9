use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::{RecordStore, StoreError, StoreResult};
use crate::models::location::{Coordinates, Location, LocationId};
use crate::models::rider::{NewRider, Rider, RiderChanges, RiderId};

/// Process-local store; locations are keyed by the owning rider id.
pub struct InMemoryStore {
    riders: DashMap<RiderId, Rider>,
    locations: DashMap<RiderId, Location>,
    rider_sequence: AtomicI64,
    location_sequence: AtomicI64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            riders: DashMap::new(),
            locations: DashMap::new(),
            rider_sequence: AtomicI64::new(1),
            location_sequence: AtomicI64::new(1),
        }
    }

    fn next_rider_id(&self) -> RiderId {
        self.rider_sequence.fetch_add(1, Ordering::SeqCst)
    }

    fn next_location_id(&self) -> LocationId {
        self.location_sequence.fetch_add(1, Ordering::SeqCst)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn insert_rider(&self, rider: NewRider) -> StoreResult<Rider> {
        let now = Utc::now();
        let stored = Rider {
            id: self.next_rider_id(),
            first_name: rider.first_name,
            last_name: rider.last_name,
            email: rider.email,
            license_plate: rider.license_plate,
            phone_number: rider.phone_number,
            created_at: now,
            updated_at: now,
        };

        self.riders.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn list_riders(&self) -> StoreResult<Vec<Rider>> {
        let mut riders: Vec<Rider> = self
            .riders
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        riders.sort_by_key(|rider| rider.id);
        Ok(riders)
    }

    async fn get_rider(&self, id: RiderId) -> StoreResult<Option<Rider>> {
        Ok(self.riders.get(&id).map(|entry| entry.value().clone()))
    }

    async fn update_rider(&self, id: RiderId, changes: RiderChanges) -> StoreResult<Rider> {
        let mut rider = self
            .riders
            .get_mut(&id)
            .ok_or(StoreError::MissingRider(id))?;

        changes.apply(&mut rider);
        rider.updated_at = Utc::now();

        Ok(rider.clone())
    }

    async fn delete_rider(&self, id: RiderId) -> StoreResult<Rider> {
        let (_, rider) = self.riders.remove(&id).ok_or(StoreError::MissingRider(id))?;
        self.locations.remove(&id);
        Ok(rider)
    }

    async fn insert_location(
        &self,
        rider_id: RiderId,
        coordinates: Coordinates,
    ) -> StoreResult<Location> {
        if !self.riders.contains_key(&rider_id) {
            return Err(StoreError::MissingRider(rider_id));
        }

        match self.locations.entry(rider_id) {
            Entry::Occupied(_) => Err(StoreError::DuplicateLocation(rider_id)),
            Entry::Vacant(slot) => {
                let location = Location {
                    id: self.next_location_id(),
                    latitude: coordinates.latitude,
                    longitude: coordinates.longitude,
                    rider_id,
                };
                slot.insert(location.clone());
                Ok(location)
            }
        }
    }

    async fn get_location_by_rider(&self, rider_id: RiderId) -> StoreResult<Option<Location>> {
        Ok(self
            .locations
            .get(&rider_id)
            .map(|entry| entry.value().clone()))
    }

    async fn list_located_riders(&self) -> StoreResult<Vec<(Rider, Location)>> {
        let mut located: Vec<(Rider, Location)> = self
            .locations
            .iter()
            .filter_map(|entry| {
                let rider = self.riders.get(entry.key())?;
                Some((rider.value().clone(), entry.value().clone()))
            })
            .collect();
        located.sort_by_key(|(rider, _)| rider.id);
        Ok(located)
    }

    async fn count_riders(&self) -> StoreResult<usize> {
        Ok(self.riders.len())
    }

    async fn count_locations(&self) -> StoreResult<usize> {
        Ok(self.locations.len())
    }
}
