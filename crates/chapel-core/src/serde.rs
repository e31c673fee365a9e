// Module name shadows the `serde` crate; use `::serde` for the external crate.
use ::serde::Serializer;
use chrono::{DateTime, SecondsFormat, Utc};

/// Serialize `DateTime<Utc>` as RFC 3339 with 3-digit fractional seconds.
pub fn to_rfc3339_ms<S>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Serialize a UNIX timestamp (seconds) as RFC 3339.
pub fn unix_to_rfc3339<S>(secs: &u64, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let dt = DateTime::<Utc>::from_timestamp(*secs as i64, 0).unwrap_or_default();
    s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Secs, true))
}
