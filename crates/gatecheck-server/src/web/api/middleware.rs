use crate::auth::validate_access_token;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use gatecheck_common::models::auth::Claims;
use jsonwebtoken::errors::ErrorKind;
use std::sync::Arc;

/// Extractor that validates a JWT Bearer token and provides the claims.
/// Handlers that name this in their signature never run without a
/// verified identity.
#[derive(Debug)]
pub struct AuthUser(pub Claims);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let token = match auth_header {
            Some(val) => match val.strip_prefix("Bearer ") {
                Some(t) => t,
                None => {
                    return Err(ApiError::Unauthenticated(
                        "Invalid authorization header format".to_string(),
                    ));
                }
            },
            None => {
                return Err(ApiError::Unauthenticated(
                    "Missing authorization header".to_string(),
                ));
            }
        };

        match validate_access_token(token, &state.config.auth.jwt_secret) {
            Ok(claims) => Ok(AuthUser(claims)),
            Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => {
                Err(ApiError::Unauthenticated("Token expired".to_string()))
            }
            Err(_) => Err(ApiError::Unauthenticated("Invalid token".to_string())),
        }
    }
}

/// Extractor that additionally requires the admin role, used by the
/// event-management routes
#[derive(Debug)]
pub struct AdminUser(pub Claims);

impl FromRequestParts<Arc<AppState>> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;
        if claims.role != "admin" {
            return Err(ApiError::Forbidden("Admin role required".to_string()));
        }
        Ok(AdminUser(claims))
    }
}
