use crate::auth::{create_access_token, hash_password, verify_password};
use crate::error::ApiError;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use gatecheck_common::models::auth::User;
use gatecheck_db::{UserRepo, UserRow};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

fn public_user(row: &UserRow) -> User {
    User {
        user_id: row.user_id,
        name: row.name.clone(),
        email: row.email.clone(),
        role: row.role.clone(),
        created_at: row.created_at,
    }
}

/// POST /auth/signUp
#[tracing::instrument(skip(state, req))]
pub async fn sign_up(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignUpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.role != "attendee" && req.role != "admin" {
        return Err(ApiError::BadRequest(
            "Role must be 'attendee' or 'admin'".to_string(),
        ));
    }

    let existing = UserRepo::get_by_email(&state.pool, &req.email)
        .await
        .map_err(ApiError::persistence)?;
    if existing.is_some() {
        return Err(ApiError::Conflict(
            "User with this email already exists".to_string(),
        ));
    }

    let password_hash = hash_password(&req.password).map_err(ApiError::persistence)?;

    let user = UserRepo::create(
        &state.pool,
        Uuid::new_v4(),
        &req.name,
        &req.email,
        &password_hash,
        &req.role,
    )
    .await
    .map_err(ApiError::persistence)?;

    // The new account is implicitly authenticated
    let token = create_access_token(
        &user.user_id.to_string(),
        &user.role,
        &state.config.auth.jwt_secret,
    )
    .map_err(ApiError::persistence)?;

    tracing::info!(user_id = %user.user_id, "User signed up");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "user": public_user(&user), "token": token })),
    ))
}

/// POST /auth/login
///
/// Unknown email and wrong password produce the same response, so the
/// endpoint cannot be used to probe which accounts exist.
#[tracing::instrument(skip(state, req))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let invalid = || ApiError::BadRequest("Invalid email or password".to_string());

    let user = UserRepo::get_by_email(&state.pool, &req.email)
        .await
        .map_err(ApiError::persistence)?
        .ok_or_else(invalid)?;

    match verify_password(&req.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => return Err(invalid()),
        Err(e) => return Err(ApiError::persistence(e)),
    }

    let token = create_access_token(
        &user.user_id.to_string(),
        &user.role,
        &state.config.auth.jwt_secret,
    )
    .map_err(ApiError::persistence)?;

    Ok(Json(json!({ "user": public_user(&user), "token": token })))
}
