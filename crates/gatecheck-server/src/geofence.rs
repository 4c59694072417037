use crate::error::{ApiError, Entity};
use gatecheck_common::geo::{GeoPoint, haversine_distance_km};
use gatecheck_db::EventRepo;
use sqlx::PgPool;
use uuid::Uuid;

/// Outcome of a passing proximity check, kept for diagnostics
#[derive(Debug, Clone, Copy)]
pub struct GeofencePass {
    pub distance_km: f64,
    pub radius_km: f64,
}

/// Decide admission for a claimed position against a circular geofence.
/// Inclusive at the boundary: distance == radius passes.
pub fn evaluate(
    center: GeoPoint,
    radius_km: f64,
    claimed: GeoPoint,
) -> Result<GeofencePass, ApiError> {
    let distance_km = haversine_distance_km(claimed, center);
    if distance_km > radius_km {
        return Err(ApiError::OutsideGeofence {
            distance_km,
            radius_km,
        });
    }
    Ok(GeofencePass {
        distance_km,
        radius_km,
    })
}

/// The geofence pipeline stage: look up the event and evaluate the
/// claimed position against its registered center and radius.
///
/// Every call re-evaluates from scratch -- there is no caching of a
/// previously granted "inside" result.
pub async fn authorize_proximity(
    pool: &PgPool,
    event_id: Option<Uuid>,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<GeofencePass, ApiError> {
    let (Some(event_id), Some(latitude), Some(longitude)) = (event_id, latitude, longitude) else {
        return Err(ApiError::BadRequest(
            "Missing eventId or user location in request body".to_string(),
        ));
    };

    let event = EventRepo::get(pool, event_id)
        .await
        .map_err(ApiError::persistence)?
        .ok_or(ApiError::NotFound(Entity::Event))?;

    evaluate(
        GeoPoint::new(event.latitude, event.longitude),
        event.radius_km,
        GeoPoint::new(latitude, longitude),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: GeoPoint = GeoPoint {
        latitude: 28.6139,
        longitude: 77.2090,
    };

    #[test]
    fn test_claimed_point_at_center_passes() {
        let pass = evaluate(CENTER, 1.0, CENTER).unwrap();
        assert_eq!(pass.distance_km, 0.0);
        assert_eq!(pass.radius_km, 1.0);
    }

    #[test]
    fn test_point_beyond_radius_is_denied_with_diagnostics() {
        // ~1.11 km north of center, radius 1.0 km
        let claimed = GeoPoint::new(28.6239, 77.2090);
        let err = evaluate(CENTER, 1.0, claimed).unwrap_err();
        match err {
            ApiError::OutsideGeofence {
                distance_km,
                radius_km,
            } => {
                assert!(distance_km > 1.0 && distance_km < 1.2);
                assert_eq!(radius_km, 1.0);
            }
            other => panic!("Expected OutsideGeofence, got {:?}", other),
        }
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let claimed = GeoPoint::new(28.6239, 77.2090);
        let distance = haversine_distance_km(claimed, CENTER);
        // A radius of exactly the computed distance admits the point
        assert!(evaluate(CENTER, distance, claimed).is_ok());
        // The tiniest shrink denies it again
        assert!(evaluate(CENTER, distance * 0.999, claimed).is_err());
    }

    #[test]
    fn test_wider_radius_admits_the_same_point() {
        let claimed = GeoPoint::new(28.6239, 77.2090);
        let pass = evaluate(CENTER, 2.0, claimed).unwrap();
        assert!(pass.distance_km > 1.0);
    }
}
