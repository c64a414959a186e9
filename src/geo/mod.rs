use crate::models::location::Coordinates;

const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Great-circle distance in kilometers between two points.
pub fn haversine_km(a: &Coordinates, b: &Coordinates) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lng = (b.longitude - a.longitude).to_radians();

    let sin_lat = (delta_lat / 2.0).sin();
    let sin_lng = (delta_lng / 2.0).sin();

    let haversine = sin_lat * sin_lat + lat1.cos() * lat2.cos() * sin_lng * sin_lng;
    let central_angle = 2.0 * haversine.sqrt().atan2((1.0 - haversine).sqrt());

    EARTH_RADIUS_KM * central_angle
}

#[cfg(test)]
mod tests {
    use super::haversine_km;
    use crate::models::location::Coordinates;

    fn point(latitude: f64, longitude: f64) -> Coordinates {
        Coordinates {
            latitude,
            longitude,
        }
    }

    /// Every point on a 7.5 x 15 degree grid, poles and antimeridian included.
    fn grid() -> Vec<Coordinates> {
        let mut points = Vec::new();
        for lat_step in 0..=24 {
            for lng_step in 0..=24 {
                points.push(point(
                    -90.0 + 7.5 * lat_step as f64,
                    -180.0 + 15.0 * lng_step as f64,
                ));
            }
        }
        points
    }

    #[test]
    fn zero_distance_for_same_point() {
        for p in grid() {
            assert_eq!(haversine_km(&p, &p), 0.0, "{p:?}");
        }
    }

    #[test]
    fn london_to_paris_is_around_343_km() {
        let london = point(51.5074, -0.1278);
        let paris = point(48.8566, 2.3522);
        let distance = haversine_km(&london, &paris);
        assert!((distance - 343.0).abs() < 5.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let points = grid();
        for a in &points {
            for b in &points {
                let forward = haversine_km(a, b);
                let backward = haversine_km(b, a);
                assert!((forward - backward).abs() < 1e-9, "{a:?} {b:?}");
            }
        }
    }

    #[test]
    fn distance_never_exceeds_half_circumference() {
        let half_circumference = std::f64::consts::PI * 6_371.0;
        let points = grid();
        for a in &points {
            for b in &points {
                let distance = haversine_km(a, b);
                assert!(distance >= 0.0 && distance <= half_circumference + 1e-6);
            }
        }
    }

    #[test]
    fn hundredth_of_a_degree_on_the_equator() {
        let origin = point(0.0, 0.0);
        let outside = haversine_km(&origin, &point(0.0, 0.05));
        let inside = haversine_km(&origin, &point(0.0, 0.04));

        assert!((outside - 5.559).abs() < 0.01);
        assert!((inside - 4.448).abs() < 0.01);
    }

    #[test]
    fn antimeridian_crossing_takes_the_short_way() {
        let distance = haversine_km(&point(0.0, 179.99), &point(0.0, -179.99));
        assert!(distance < 3.0);
    }
}
