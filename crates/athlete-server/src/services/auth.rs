//! Authentication service
//!
//! A single admin credential pair, checked byte-for-byte. Successful logins
//! mint an opaque random token kept in memory until logout; tokens never
//! expire on their own.

use crate::error::ApiError;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::{debug, info};

/// Random bytes per token (256 bits)
const TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone)]
pub struct Session {
    pub email: String,
    pub created_at: DateTime<Utc>,
}

pub struct AuthService {
    admin_email: String,
    admin_password: String,
    sessions: DashMap<String, Session>,
}

impl AuthService {
    pub fn new(admin_email: String, admin_password: String) -> Self {
        Self {
            admin_email,
            admin_password,
            sessions: DashMap::new(),
        }
    }

    /// Check the credentials and open a new session, returning its token
    pub fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        // Both fields are compared before deciding so the error never says which one was wrong
        let email_ok = email.as_bytes() == self.admin_email.as_bytes();
        let password_ok = password.as_bytes() == self.admin_password.as_bytes();
        if !(email_ok && password_ok) {
            return Err(ApiError::InvalidCredentials);
        }

        let token = generate_token();
        self.sessions.insert(
            token.clone(),
            Session {
                email: email.to_string(),
                created_at: Utc::now(),
            },
        );
        info!(
            "Session opened for {} ({} active)",
            email,
            self.session_count()
        );

        Ok(token)
    }

    /// Resolve a token to the email it was issued for
    pub fn validate(&self, token: &str) -> Option<String> {
        self.sessions.get(token).map(|session| session.email.clone())
    }

    /// Drop a session. Unknown tokens are ignored.
    pub fn logout(&self, token: &str) {
        match self.sessions.remove(token) {
            Some((_, session)) => info!(
                "Session closed for {} after {}s",
                session.email,
                (Utc::now() - session.created_at).num_seconds()
            ),
            None => debug!("Logout with unknown token"),
        }
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
