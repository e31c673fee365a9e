use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use chapel_domain::role::{Position, Role};
use chapel_domain::service::ServiceType;

/// Credential record owned by the sign-in store.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    /// Sign-in address: the real email, or `<username>@example.com`.
    pub email: String,
    /// argon2 PHC string.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Application profile linked 1:1 to an account (`id` = account id).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub id: Uuid,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub position: Position,
    pub role: Role,
    pub departments: Vec<String>,
    pub approved: bool,
    #[serde(serialize_with = "chapel_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "chapel_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Fresh profile with default position, no departments and approval derived from the role.
    pub fn new(id: Uuid, role: Role, now: DateTime<Utc>) -> Self {
        Self {
            id,
            username: None,
            full_name: None,
            email: None,
            position: Position::default(),
            role,
            departments: Vec::new(),
            approved: false,
            created_at: now,
            updated_at: now,
        }
        .normalized()
    }

    /// Apply the write invariant: admins are always approved.
    /// Every profile write passes through here.
    pub fn normalized(mut self) -> Self {
        if self.role == Role::Admin {
            self.approved = true;
        }
        self
    }

    /// Login gate: staff and admin pass regardless of the stored flag.
    pub fn may_sign_in(&self) -> bool {
        self.role.is_implicitly_approved() || self.approved
    }

    pub fn is_staff_or_admin(&self) -> bool {
        matches!(self.role, Role::Staff | Role::Admin)
    }

    /// Admins reach every department; others only those they are assigned.
    pub fn can_access_department(&self, department: &str) -> bool {
        self.role == Role::Admin || self.departments.iter().any(|d| d == department)
    }
}

/// A church member who can be marked present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    pub department: String,
    #[serde(serialize_with = "chapel_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

/// Key of one attendance sheet: a date, a service and a department.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttendanceSlot {
    pub date: NaiveDate,
    pub service_type: ServiceType,
    pub department: String,
}

/// Failed sign-in attempts allowed per address within one window.
pub const LOGIN_FAILURE_LIMIT: u64 = 5;

/// Length of the failed sign-in window in seconds.
pub const LOGIN_FAILURE_WINDOW_SECS: u64 = 60;

/// Minimum password length, counted in characters.
pub const MIN_PASSWORD_CHARS: usize = 6;
