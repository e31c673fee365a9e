//! Session helpers for router tests.
//!
//! Services authenticate requests by the `chapel_session` cookie. `MockSession` signs a real
//! token with a test secret so requests pass the `Session` extractor without logging in.

use axum::http::{HeaderValue, header::COOKIE};
use uuid::Uuid;

use chapel_auth_types::cookie::CHAPEL_SESSION;
use chapel_auth_types::token::issue_session_token;

/// Secret shared by test app state and [`MockSession`].
pub const TEST_SESSION_SECRET: &str = "test-session-secret-for-router-tests";

/// Account identity to attach to a test request.
pub struct MockSession {
    pub account_id: Uuid,
}

impl MockSession {
    pub fn new(account_id: Uuid) -> Self {
        Self { account_id }
    }

    /// `Cookie` header value carrying a valid session token.
    pub fn cookie(&self) -> HeaderValue {
        let (token, _) = issue_session_token(self.account_id, TEST_SESSION_SECRET)
            .expect("sign test session token");
        HeaderValue::from_str(&format!("{CHAPEL_SESSION}={token}"))
            .expect("session cookie is valid header text")
    }

    /// Attach the session cookie to a request builder.
    pub fn apply(&self, builder: axum::http::request::Builder) -> axum::http::request::Builder {
        builder.header(COOKIE, self.cookie())
    }
}
