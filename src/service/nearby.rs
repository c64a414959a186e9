use tracing::debug;

use super::RiderService;
use crate::error::AppError;
use crate::geo::haversine_km;
use crate::models::location::Coordinates;
use crate::models::rider::NearbyRider;

pub const SEARCH_RADIUS_KM: f64 = 5.0;

#[derive(Debug, Clone)]
pub struct NearbyRiders {
    pub riders: Vec<NearbyRider>,
    pub count: usize,
}

impl RiderService {
    /// Linear scan over every located rider, keeping those within
    /// [`SEARCH_RADIUS_KM`] of `query`, closest first.
    pub async fn find_nearby_riders(&self, query: Coordinates) -> Result<NearbyRiders, AppError> {
        let candidates = self.store.list_located_riders().await?;
        if candidates.is_empty() {
            return Err(AppError::NotFound(
                "No riders found with locations.".to_string(),
            ));
        }

        let mut riders: Vec<NearbyRider> = candidates
            .into_iter()
            .filter_map(|(rider, location)| {
                let distance_km = haversine_km(&query, &location.coordinates());
                debug!(
                    rider_id = rider.id,
                    from_lat = query.latitude,
                    from_lng = query.longitude,
                    to_lat = location.latitude,
                    to_lng = location.longitude,
                    distance_km,
                    "candidate distance"
                );

                if distance_km <= SEARCH_RADIUS_KM {
                    Some(NearbyRider {
                        rider,
                        location,
                        distance_km,
                    })
                } else {
                    None
                }
            })
            .collect();

        riders.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

        let count = riders.len();
        Ok(NearbyRiders { riders, count })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::SEARCH_RADIUS_KM;
    use crate::error::AppError;
    use crate::models::location::Coordinates;
    use crate::models::rider::NewRider;
    use crate::service::RiderService;
    use crate::store::InMemoryStore;

    fn service() -> RiderService {
        RiderService::new(Arc::new(InMemoryStore::new()))
    }

    fn rider(first_name: &str) -> NewRider {
        NewRider {
            first_name: first_name.to_string(),
            last_name: "Doe".to_string(),
            email: "john@x.com".to_string(),
            license_plate: "ABC123".to_string(),
            phone_number: "647-391-5988".to_string(),
        }
    }

    fn point(latitude: f64, longitude: f64) -> Coordinates {
        Coordinates {
            latitude,
            longitude,
        }
    }

    async fn located(service: &RiderService, name: &str, at: Coordinates) -> i64 {
        let rider = service.create_rider(rider(name)).await.unwrap();
        service.create_location(rider.id, at).await.unwrap();
        rider.id
    }

    #[tokio::test]
    async fn empty_store_is_not_found_for_any_query() {
        let service = service();
        for lat_step in 0..=12 {
            for lng_step in 0..=12 {
                let query = point(-90.0 + 15.0 * lat_step as f64, -180.0 + 30.0 * lng_step as f64);

                assert!(
                    matches!(
                        service.find_nearby_riders(query).await,
                        Err(AppError::NotFound(_))
                    ),
                    "{query:?}"
                );
                assert!(matches!(
                    service.find_all_riders().await,
                    Err(AppError::NotFound(_))
                ));
            }
        }
    }

    #[tokio::test]
    async fn riders_without_location_do_not_count() {
        let service = service();
        service.create_rider(rider("John")).await.unwrap();

        assert!(matches!(
            service.find_nearby_riders(point(0.0, 0.0)).await,
            Err(AppError::NotFound(msg)) if msg == "No riders found with locations."
        ));
    }

    #[tokio::test]
    async fn radius_boundary_on_the_equator() {
        let service = service();
        let id = located(&service, "John", point(0.0, 0.0)).await;

        let outside = service.find_nearby_riders(point(0.0, 0.05)).await.unwrap();
        assert_eq!(outside.count, 0);
        assert!(outside.riders.is_empty());

        let inside = service.find_nearby_riders(point(0.0, 0.04)).await.unwrap();
        assert_eq!(inside.count, 1);
        assert_eq!(inside.riders[0].rider.id, id);
        assert!(inside.riders[0].distance_km <= SEARCH_RADIUS_KM);
    }

    #[tokio::test]
    async fn finds_rider_near_query_point() {
        let service = service();
        let id = located(&service, "John", point(12.3456, 98.7654)).await;

        let nearby = service.find_nearby_riders(point(12.35, 98.76)).await.unwrap();

        assert_eq!(nearby.count, 1);
        let found = &nearby.riders[0];
        assert_eq!(found.rider.id, id);
        assert_eq!(found.rider.first_name, "John");
        assert_eq!(found.location.latitude, 12.3456);
        assert!((found.distance_km - 0.75).abs() < 0.1);
    }

    #[tokio::test]
    async fn results_are_closest_first() {
        let service = service();
        let far = located(&service, "Far", point(0.0, 0.03)).await;
        let near = located(&service, "Near", point(0.0, 0.01)).await;
        located(&service, "Away", point(1.0, 1.0)).await;

        let nearby = service.find_nearby_riders(point(0.0, 0.0)).await.unwrap();

        let ids: Vec<i64> = nearby.riders.iter().map(|r| r.rider.id).collect();
        assert_eq!(ids, vec![near, far]);
        assert_eq!(nearby.count, 2);
    }
}
