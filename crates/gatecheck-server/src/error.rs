use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Entity referenced by a failed lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    Event,
    Booking,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entity::User => write!(f, "User"),
            Entity::Event => write!(f, "Event"),
            Entity::Booking => write!(f, "Booking"),
        }
    }
}

/// Tagged failure taxonomy for the admission pipeline.
///
/// Every stage surfaces one of these; nothing is swallowed. The enum
/// itself is transport-free -- the `IntoResponse` impl at the bottom of
/// this file is the only place status codes exist.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing, malformed, invalid, or expired bearer token
    #[error("{0}")]
    Unauthenticated(String),
    /// Valid identity, insufficient role or ownership
    #[error("{0}")]
    Forbidden(String),
    /// Referenced entity absent
    #[error("{0} not found")]
    NotFound(Entity),
    /// Uniqueness violation
    #[error("{0}")]
    Conflict(String),
    /// Booking state machine rule violated (replay guard)
    #[error("Invalid booking status: {status}. Cannot validate.")]
    InvalidTransition { status: String },
    /// Proximity check failed; not retryable until the user relocates
    #[error("User is outside the event geofence")]
    OutsideGeofence { distance_km: f64, radius_km: f64 },
    /// Missing or malformed input
    #[error("{0}")]
    BadRequest(String),
    /// Storage layer failure, retryable
    #[error("{0}")]
    Persistence(String),
}

impl ApiError {
    /// Infrastructure failure: log the cause, surface a stable message
    /// that leaks nothing about the storage layer.
    pub fn persistence(err: anyhow::Error) -> Self {
        tracing::error!("Storage failure: {:#}", err);
        Self::Persistence("Internal failure, please retry".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Lifecycle misses surface as plain 400s; only the in-gate
        // event lookup is a 404.
        let status = match &self {
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) | ApiError::OutsideGeofence { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound(Entity::Event) => StatusCode::NOT_FOUND,
            ApiError::NotFound(_)
            | ApiError::Conflict(_)
            | ApiError::InvalidTransition { .. }
            | ApiError::BadRequest(_)
            | ApiError::Persistence(_) => StatusCode::BAD_REQUEST,
        };

        let body = match &self {
            ApiError::OutsideGeofence {
                distance_km,
                radius_km,
            } => json!({
                "error": self.to_string(),
                "distance_km": distance_km,
                "radius_km": radius_km,
            }),
            _ => json!({"error": self.to_string()}),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ApiError::Unauthenticated("no token".into()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ApiError::Forbidden("not admin".into()),
                StatusCode::FORBIDDEN,
            ),
            (
                ApiError::NotFound(Entity::Event),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::NotFound(Entity::Booking),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Conflict("duplicate".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::InvalidTransition {
                    status: "validated".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::OutsideGeofence {
                    distance_km: 2.0,
                    radius_km: 1.0,
                },
                StatusCode::FORBIDDEN,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_invalid_transition_message_names_observed_status() {
        let err = ApiError::InvalidTransition {
            status: "validated".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid booking status: validated. Cannot validate."
        );
    }

    #[tokio::test]
    async fn test_outside_geofence_body_carries_diagnostics() {
        let err = ApiError::OutsideGeofence {
            distance_km: 1.11,
            radius_km: 1.0,
        };
        let response = err.into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["distance_km"], 1.11);
        assert_eq!(body["radius_km"], 1.0);
        assert!(body["error"].as_str().unwrap().contains("geofence"));
    }
}
