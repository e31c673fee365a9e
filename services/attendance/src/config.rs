use serde::Deserialize;

use chapel_core::config::Config;

/// Attendance service configuration, read from environment variables by field name
/// (`database_url` ← `DATABASE_URL`).
#[derive(Debug, Deserialize)]
pub struct AttendanceConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Redis connection URL (login throttle).
    pub redis_url: String,
    /// HMAC secret for session tokens.
    pub jwt_secret: String,
    /// Session cookie `Domain`. Unset scopes the cookie to the serving host.
    #[serde(default)]
    pub cookie_domain: Option<String>,
    #[serde(default = "default_cookie_secure")]
    pub cookie_secure: bool,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// Offset of the church's local time from UTC, used for "today".
    #[serde(default = "default_utc_offset")]
    pub church_utc_offset_hours: i32,
    /// First admin, provisioned at start-up when the username is free.
    #[serde(default)]
    pub bootstrap_admin_username: Option<String>,
    #[serde(default)]
    pub bootstrap_admin_password: Option<String>,
}

fn default_cookie_secure() -> bool {
    true
}

fn default_http_port() -> u16 {
    3120
}

fn default_utc_offset() -> i32 {
    9
}

impl Config for AttendanceConfig {}
