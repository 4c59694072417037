use crate::error::{ApiError, Entity};
use crate::geofence;
use crate::state::AppState;
use crate::web::api::middleware::AuthUser;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use gatecheck_db::{BookingRepo, BookingRow};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    pub user_id: Uuid,
    pub event_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelRequest {
    pub booking_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAllRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    pub booking_id: Uuid,
    pub event_id: Option<Uuid>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

fn booking_json(b: &BookingRow) -> serde_json::Value {
    json!({
        "booking_id": b.booking_id,
        "user_id": b.user_id,
        "event_id": b.event_id,
        "status": b.status,
        "booked_at": b.booked_at,
    })
}

/// POST /bookings/book
#[tracing::instrument(skip(state, req))]
pub async fn book(
    _user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let booking = BookingRepo::create(&state.pool, req.user_id, req.event_id)
        .await
        .map_err(ApiError::persistence)?;

    Ok((StatusCode::CREATED, Json(booking_json(&booking))))
}

/// DELETE /bookings/cancel
///
/// Deletion is unconditional on status; a validated booking can still be
/// cancelled.
#[tracing::instrument(skip(state, req))]
pub async fn cancel(
    _user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CancelRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let booking = BookingRepo::delete(&state.pool, req.booking_id)
        .await
        .map_err(ApiError::persistence)?
        .ok_or(ApiError::NotFound(Entity::Booking))?;

    Ok(Json(booking_json(&booking)))
}

/// GET /bookings/getall
#[tracing::instrument(skip(state, req))]
pub async fn get_all(
    _user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<GetAllRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let bookings = BookingRepo::list_by_user(&state.pool, req.user_id)
        .await
        .map_err(ApiError::persistence)?;

    let bookings_json: Vec<serde_json::Value> = bookings.iter().map(booking_json).collect();
    Ok(Json(bookings_json))
}

/// PUT /bookings/validate
///
/// The full admission pipeline: Access Gate (extractor) -> Geofence Gate
/// -> ownership check -> conditional state transition. Each stage
/// short-circuits with its tagged error; the booking only advances when
/// every stage has passed.
#[tracing::instrument(skip(state, req))]
pub async fn validate(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<ValidateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let pass =
        geofence::authorize_proximity(&state.pool, req.event_id, req.latitude, req.longitude)
            .await?;

    let booking = BookingRepo::get(&state.pool, req.booking_id)
        .await
        .map_err(ApiError::persistence)?
        .ok_or(ApiError::NotFound(Entity::Booking))?;

    // Ownership: the token subject must own the booking it validates
    let subject = user
        .0
        .user_id()
        .ok_or_else(|| ApiError::Unauthenticated("Invalid token subject".to_string()))?;
    if subject != booking.user_id {
        return Err(ApiError::Forbidden(
            "Booking belongs to another user".to_string(),
        ));
    }

    // Replay guard: the status check and the write are one conditional
    // update, so a concurrent validation of the same booking cannot also
    // succeed.
    let validated = BookingRepo::validate_if_booked(&state.pool, req.booking_id)
        .await
        .map_err(ApiError::persistence)?
        .ok_or(ApiError::InvalidTransition {
            status: booking.status,
        })?;

    tracing::info!(
        booking_id = %validated.booking_id,
        distance_km = pass.distance_km,
        radius_km = pass.radius_km,
        "Booking validated inside geofence"
    );

    Ok(Json(json!({
        "message": "Booking successfully validated",
        "booking": booking_json(&validated),
    })))
}
