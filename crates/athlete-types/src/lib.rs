//! Athlete Types - Pure type definitions shared by the server and its clients
//!
//! This crate contains only serde data types with no async runtime
//! dependencies. Field names follow the JSON wire format used by the
//! browser frontend and the on-disk dataset file.

pub mod athlete;
pub mod auth;

pub use athlete::*;
pub use auth::*;

use serde::{Deserialize, Serialize};

/// Generic acknowledgment body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
