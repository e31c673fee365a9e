//! Session cookie builders.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::token::SESSION_TOKEN_EXP;

/// Cookie name for the session token.
pub const CHAPEL_SESSION: &str = "chapel_session";

/// Attributes applied to the session cookie.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    /// `Domain` attribute; `None` scopes the cookie to the serving host.
    pub domain: Option<String>,
    pub secure: bool,
}

fn session_cookie(value: String, max_age: Duration, settings: &CookieSettings) -> Cookie<'static> {
    let mut builder = Cookie::build((CHAPEL_SESSION, value))
        .path("/")
        .max_age(max_age)
        .http_only(true)
        .secure(settings.secure)
        .same_site(SameSite::Lax);
    if let Some(domain) = settings.domain.clone() {
        builder = builder.domain(domain);
    }
    builder.build()
}

/// Set the session cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use chapel_auth_types::cookie::{set_session_cookie, CookieSettings, CHAPEL_SESSION};
///
/// let settings = CookieSettings { domain: Some("church.example".into()), secure: true };
/// let jar = set_session_cookie(CookieJar::new(), "token".to_string(), &settings);
/// let cookie = jar.get(CHAPEL_SESSION).unwrap();
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.domain(), Some("church.example"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(604800)));
/// assert!(cookie.http_only().unwrap_or(false));
/// ```
pub fn set_session_cookie(jar: CookieJar, value: String, settings: &CookieSettings) -> CookieJar {
    jar.add(session_cookie(
        value,
        Duration::seconds(SESSION_TOKEN_EXP as i64),
        settings,
    ))
}

/// Clear the session cookie by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use chapel_auth_types::cookie::{clear_session_cookie, CookieSettings, CHAPEL_SESSION};
///
/// let settings = CookieSettings { domain: None, secure: false };
/// let jar = clear_session_cookie(CookieJar::new(), &settings);
/// let cookie = jar.get(CHAPEL_SESSION).unwrap();
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// assert_eq!(cookie.value(), "");
/// ```
pub fn clear_session_cookie(jar: CookieJar, settings: &CookieSettings) -> CookieJar {
    jar.add(session_cookie(String::new(), Duration::ZERO, settings))
}
