pub mod auth;
pub mod bookings;
pub mod events;
pub mod middleware;

use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

pub fn build_api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        // Auth routes (public)
        .route("/auth/signUp", post(auth::sign_up))
        .route("/auth/login", post(auth::login))
        // Booking lifecycle (bearer token)
        .route("/bookings/book", post(bookings::book))
        .route("/bookings/cancel", delete(bookings::cancel))
        .route("/bookings/getall", get(bookings::get_all))
        .route("/bookings/validate", put(bookings::validate))
        // Event management (bearer token, mutations admin only)
        .route("/events/create", post(events::create_event))
        .route("/events/all", get(events::list_events))
        .route("/events/update", put(events::update_event))
        .route("/events/delete", delete(events::delete_event))
        .with_state(state)
}
