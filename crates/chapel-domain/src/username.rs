//! Username rules and sign-in address synthesis.

/// Domain used for accounts created without a real email address.
/// `example.com` is reserved by RFC 2606, so the address is well-formed but never routable.
pub const PLACEHOLDER_EMAIL_DOMAIN: &str = "example.com";

/// Trim and lowercase a username as typed by the user.
pub fn normalize_username(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Validate a (trimmed) username: ASCII alphanumeric, hyphen and underscore, at least one char.
pub fn validate_username(username: &str) -> bool {
    !username.is_empty()
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Deterministic sign-in address for a username: `<lowercased>@example.com`.
pub fn placeholder_email(username: &str) -> String {
    format!("{}@{}", normalize_username(username), PLACEHOLDER_EMAIL_DOMAIN)
}

/// Whether an address was synthesized by [`placeholder_email`].
pub fn is_placeholder_email(email: &str) -> bool {
    email
        .rsplit_once('@')
        .is_some_and(|(_, domain)| domain.eq_ignore_ascii_case(PLACEHOLDER_EMAIL_DOMAIN))
}
