//! Role and position types for church profiles.

use serde::{Deserialize, Serialize};

/// Permission level of a profile.
///
/// Stored as lowercase text (`user`, `staff`, `admin`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    User,
    Staff,
    Admin,
}

impl Role {
    /// Parse a stored value. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Self::User),
            "staff" => Some(Self::Staff),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Parse a stored value, reading anything unknown as [`Role::User`].
    pub fn parse_lossy(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Staff => "staff",
            Self::Admin => "admin",
        }
    }

    /// Staff and admins pass the login approval gate without `approved = true`.
    pub fn is_implicitly_approved(self) -> bool {
        matches!(self, Self::Staff | Self::Admin)
    }
}

/// Church title shown next to a profile name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "목사")]
    Pastor,
    #[serde(rename = "부목사")]
    AssociatePastor,
    #[serde(rename = "강도사")]
    Preacher,
    #[serde(rename = "전도사")]
    Evangelist,
    #[serde(rename = "집사")]
    Deacon,
    #[serde(rename = "안수집사")]
    OrdainedDeacon,
    #[serde(rename = "권사")]
    Exhorter,
    #[serde(rename = "장로")]
    Elder,
    #[default]
    #[serde(rename = "성도")]
    Saint,
}

impl Position {
    pub const ALL: [Position; 9] = [
        Self::Pastor,
        Self::AssociatePastor,
        Self::Preacher,
        Self::Evangelist,
        Self::Deacon,
        Self::OrdainedDeacon,
        Self::Exhorter,
        Self::Elder,
        Self::Saint,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pastor => "목사",
            Self::AssociatePastor => "부목사",
            Self::Preacher => "강도사",
            Self::Evangelist => "전도사",
            Self::Deacon => "집사",
            Self::OrdainedDeacon => "안수집사",
            Self::Exhorter => "권사",
            Self::Elder => "장로",
            Self::Saint => "성도",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }

    /// Parse a stored label, falling back to [`Position::Saint`].
    pub fn parse_lossy(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }
}
