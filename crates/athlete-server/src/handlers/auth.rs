//! Authentication handlers

use crate::error::ApiError;
use crate::extractors::{BearerToken, LenientJson};
use crate::AppState;
use athlete_types::{LoginRequest, LoginResponse, SuccessResponse};
use axum::{extract::State, Json};
use tracing::{info, warn};

pub async fn login(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    info!("Login attempt for: {}", req.email);

    let token = state
        .auth_service
        .login(&req.email, &req.password)
        .map_err(|e| {
            warn!("Login rejected for: {}", req.email);
            e
        })?;

    Ok(Json(LoginResponse {
        success: true,
        token,
    }))
}

/// Always succeeds, whether or not the token was known
pub async fn logout(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Json<SuccessResponse> {
    if let Some(token) = token {
        state.auth_service.logout(&token);
    }

    Json(SuccessResponse::ok())
}
