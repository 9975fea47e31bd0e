//! Lenient JSON body extractor
//!
//! Bodies that are empty or fail to parse are replaced by `T::default()`
//! instead of being rejected, so a garbled create request surfaces as a
//! missing-field validation error rather than a parse failure.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::debug;

pub struct LenientJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        Ok(LenientJson(parse_or_default(&body)))
    }
}

fn parse_or_default<T: DeserializeOwned + Default>(body: &[u8]) -> T {
    if body.iter().all(u8::is_ascii_whitespace) {
        return T::default();
    }

    serde_json::from_slice(body).unwrap_or_else(|e| {
        debug!("Ignoring malformed JSON body: {}", e);
        T::default()
    })
}
