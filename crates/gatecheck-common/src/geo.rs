use serde::{Deserialize, Serialize};

/// Mean earth radius in kilometers (spherical model)
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the earth's surface, latitude/longitude in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Great-circle distance between two points in kilometers, via the
/// haversine formula.
///
/// The intermediate term is clamped to [0, 1] so floating-point noise on
/// near-identical or near-antipodal points cannot feed a negative value
/// into the square root. Identical points yield exactly 0.0.
pub fn haversine_distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_points_yield_exactly_zero() {
        let p = GeoPoint::new(28.6139, 77.2090);
        assert_eq!(haversine_distance_km(p, p), 0.0);

        let q = GeoPoint::new(-33.8688, 151.2093);
        assert_eq!(haversine_distance_km(q, q), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let a = GeoPoint::new(28.6139, 77.2090);
        let b = GeoPoint::new(19.0760, 72.8777);
        assert_eq!(haversine_distance_km(a, b), haversine_distance_km(b, a));

        let c = GeoPoint::new(-54.8019, -68.3030);
        let d = GeoPoint::new(64.1466, -21.9426);
        assert_eq!(haversine_distance_km(c, d), haversine_distance_km(d, c));
    }

    #[test]
    fn test_point_just_north_of_center_is_about_1_11_km() {
        // 0.01 degrees of latitude is ~1.11 km on the spherical model
        let center = GeoPoint::new(28.6139, 77.2090);
        let north = GeoPoint::new(28.6239, 77.2090);
        let d = haversine_distance_km(center, north);
        assert!(d > 1.0, "expected > 1.0 km, got {}", d);
        assert!(d < 1.2, "expected < 1.2 km, got {}", d);
    }

    #[test]
    fn test_known_city_pair_distance() {
        // London -> Paris, ~343 km great-circle
        let london = GeoPoint::new(51.5074, -0.1278);
        let paris = GeoPoint::new(48.8566, 2.3522);
        let d = haversine_distance_km(london, paris);
        assert!((d - 343.5).abs() < 2.0, "expected ~343.5 km, got {}", d);
    }

    #[test]
    fn test_antipodal_points_do_not_produce_nan() {
        // Exactly antipodal: h lands on 1.0, the clamp keeps sqrt(1 - h) at 0
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 180.0);
        let d = haversine_distance_km(a, b);
        assert!(!d.is_nan());
        // Half the earth's circumference on the spherical model
        assert!((d - std::f64::consts::PI * 6371.0).abs() < 0.5);
    }

    #[test]
    fn test_distance_is_non_negative_for_tiny_offsets() {
        let a = GeoPoint::new(45.0, 45.0);
        let b = GeoPoint::new(45.0 + 1e-13, 45.0 - 1e-13);
        let d = haversine_distance_km(a, b);
        assert!(d >= 0.0);
        assert!(!d.is_nan());
    }
}
