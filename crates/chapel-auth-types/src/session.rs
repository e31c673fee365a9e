//! Session-cookie extractor.

use axum::extract::{FromRef, FromRequestParts};
use axum_extra::extract::cookie::CookieJar;
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use crate::cookie::CHAPEL_SESSION;
use crate::token::validate_session_token;

/// HMAC secret used to sign session tokens. Provide it from app state via `FromRef`.
#[derive(Clone)]
pub struct SessionSecret(pub String);

/// Authenticated account behind the `chapel_session` cookie.
///
/// Returns 401 if the cookie is absent, expired, or fails signature validation.
/// Authorization (403) is decided by handlers after extraction.
#[derive(Debug, Clone)]
pub struct Session {
    pub account_id: Uuid,
    pub expires_at: u64,
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    SessionSecret: FromRef<S>,
{
    type Rejection = StatusCode;

    // axum-core 0.5 declares `fn -> impl Future + Send`; resolve everything synchronously
    // and hand back a 'static future so no borrow of `parts` is captured.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let SessionSecret(secret) = SessionSecret::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);
        let info = jar
            .get(CHAPEL_SESSION)
            .and_then(|c| validate_session_token(c.value(), &secret).ok());

        async move {
            let info = info.ok_or(StatusCode::UNAUTHORIZED)?;
            Ok(Self {
                account_id: info.account_id,
                expires_at: info.expires_at,
            })
        }
    }
}
