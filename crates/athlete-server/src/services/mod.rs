//! Business logic services

pub mod athletes;
pub mod auth;

pub use athletes::AthleteService;
pub use auth::AuthService;
