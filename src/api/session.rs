//! Session identifier extraction.
//!
//! The browser mints an opaque session id, keeps it in local storage, and
//! sends it on every request via `X-Session-Id`. It partitions the history
//! cache and is not a credential — no validation beyond non-emptiness, and
//! a missing or unreadable header falls back to a shared partition.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;

/// Header carrying the client-minted session identifier.
pub const SESSION_HEADER: &str = "x-session-id";

/// Partition used when the client sent no usable session id.
pub const FALLBACK_SESSION: &str = "anonymous";

/// The request's history partition key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(FALLBACK_SESSION);
        Ok(Self(id.to_string()))
    }
}
