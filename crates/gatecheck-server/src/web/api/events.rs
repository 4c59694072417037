use crate::error::{ApiError, Entity};
use crate::state::AppState;
use crate::web::api::middleware::{AdminUser, AuthUser};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::NaiveDate;
use gatecheck_db::{EventRepo, EventRow, UpdateEvent};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub name: String,
    pub date: NaiveDate,
    pub time: String,
    pub area: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
    pub price: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub event_id: Uuid,
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub area: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius_km: Option<f64>,
    pub price: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEventRequest {
    pub event_id: Uuid,
}

fn event_json(e: &EventRow) -> serde_json::Value {
    json!({
        "event_id": e.event_id,
        "name": e.name,
        "date": e.event_date,
        "time": e.event_time,
        "area": e.area,
        "latitude": e.latitude,
        "longitude": e.longitude,
        "radius_km": e.radius_km,
        "price": e.price,
        "created_at": e.created_at,
    })
}

/// POST /events/create (admin only)
#[tracing::instrument(skip(state, req))]
pub async fn create_event(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.radius_km <= 0.0 {
        return Err(ApiError::BadRequest(
            "Admission radius must be greater than zero".to_string(),
        ));
    }

    // No two events may share a (date, time) pair
    let clash = EventRepo::find_by_schedule(&state.pool, req.date, &req.time)
        .await
        .map_err(ApiError::persistence)?;
    if clash.is_some() {
        return Err(ApiError::Conflict(
            "An event is already scheduled at this date and time".to_string(),
        ));
    }

    let event = EventRepo::create(
        &state.pool,
        &req.name,
        req.date,
        &req.time,
        &req.area,
        req.latitude,
        req.longitude,
        req.radius_km,
        req.price,
    )
    .await
    .map_err(ApiError::persistence)?;

    Ok((StatusCode::CREATED, Json(event_json(&event))))
}

/// GET /events/all
#[tracing::instrument(skip(state))]
pub async fn list_events(
    _user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let events = EventRepo::list(&state.pool)
        .await
        .map_err(ApiError::persistence)?;

    let events_json: Vec<serde_json::Value> = events.iter().map(event_json).collect();
    Ok(Json(events_json))
}

/// PUT /events/update (admin only)
#[tracing::instrument(skip(state, req))]
pub async fn update_event(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(radius_km) = req.radius_km {
        if radius_km <= 0.0 {
            return Err(ApiError::BadRequest(
                "Admission radius must be greater than zero".to_string(),
            ));
        }
    }

    let update = UpdateEvent {
        name: req.name,
        event_date: req.date,
        event_time: req.time,
        area: req.area,
        latitude: req.latitude,
        longitude: req.longitude,
        radius_km: req.radius_km,
        price: req.price,
    };

    let event = EventRepo::update(&state.pool, req.event_id, update)
        .await
        .map_err(ApiError::persistence)?
        .ok_or(ApiError::NotFound(Entity::Event))?;

    Ok(Json(event_json(&event)))
}

/// DELETE /events/delete (admin only)
#[tracing::instrument(skip(state, req))]
pub async fn delete_event(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<DeleteEventRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let event = EventRepo::delete(&state.pool, req.event_id)
        .await
        .map_err(ApiError::persistence)?
        .ok_or(ApiError::NotFound(Entity::Event))?;

    Ok(Json(event_json(&event)))
}
