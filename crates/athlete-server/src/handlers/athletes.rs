//! Athlete handlers
//!
//! Everything except `get` requires a bearer token. Fetching a single
//! athlete by id is deliberately public so plans can be shared by link.

use crate::error::ApiError;
use crate::extractors::{AuthUser, LenientJson};
use crate::AppState;
use athlete_types::{Athlete, CreateAthleteRequest, DeleteResponse, UpdateAthleteRequest};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<Athlete>>, ApiError> {
    Ok(Json(state.athletes.list().await?))
}

pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    LenientJson(req): LenientJson<CreateAthleteRequest>,
) -> Result<(StatusCode, Json<Athlete>), ApiError> {
    let athlete = state.athletes.create(req).await?;
    info!("{} created athlete {}", user.email, athlete.id);

    Ok((StatusCode::CREATED, Json(athlete)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Athlete>, ApiError> {
    Ok(Json(state.athletes.get(&id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    user: AuthUser,
    LenientJson(req): LenientJson<UpdateAthleteRequest>,
) -> Result<Json<Athlete>, ApiError> {
    let athlete = state.athletes.update(&id, req).await?;
    info!("{} updated athlete {}", user.email, athlete.id);

    Ok(Json(athlete))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    user: AuthUser,
) -> Result<Json<DeleteResponse>, ApiError> {
    let athlete = state.athletes.delete(&id).await?;
    info!("{} deleted athlete {}", user.email, athlete.id);

    Ok(Json(DeleteResponse {
        success: true,
        athlete,
    }))
}
