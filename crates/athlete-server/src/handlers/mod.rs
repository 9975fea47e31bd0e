//! HTTP handlers

pub mod athletes;
pub mod auth;
pub mod health;
pub mod static_files;

pub use health::health;

use crate::error::ApiError;

/// Catch-all for unknown paths and methods under `/api`
pub async fn api_not_found() -> ApiError {
    ApiError::NotFound
}
