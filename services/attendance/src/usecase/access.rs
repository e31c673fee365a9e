//! The single profile guard shared by every protected endpoint.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::repository::ProfileRepository;
use crate::domain::types::Profile;
use crate::error::AttendanceServiceError;

/// Authorization predicates over a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessRule {
    /// Any account with a profile.
    Authenticated,
    StaffOrAdmin,
    Admin,
    /// Admin, or a profile assigned to the department.
    Department(String),
}

impl AccessRule {
    pub fn allows(&self, profile: &Profile) -> bool {
        match self {
            Self::Authenticated => true,
            Self::StaffOrAdmin => profile.is_staff_or_admin(),
            Self::Admin => profile.role == chapel_domain::role::Role::Admin,
            Self::Department(name) => profile.can_access_department(name),
        }
    }
}

/// Outcome of a guard evaluation. `Checking` is the state before the profile is loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AccessState {
    #[default]
    Checking,
    Denied,
    Granted { profile: Profile },
}

pub struct AccessGuard<P: ProfileRepository> {
    pub profiles: P,
}

impl<P: ProfileRepository> AccessGuard<P> {
    /// Load the caller's profile and apply `predicate`. A missing profile is denied.
    pub async fn evaluate_with<F>(
        &self,
        account_id: Uuid,
        predicate: F,
    ) -> Result<AccessState, AttendanceServiceError>
    where
        F: FnOnce(&Profile) -> bool,
    {
        let state = match self.profiles.find_by_id(account_id).await? {
            Some(profile) if predicate(&profile) => AccessState::Granted { profile },
            _ => AccessState::Denied,
        };
        Ok(state)
    }

    pub async fn evaluate(
        &self,
        account_id: Uuid,
        rule: &AccessRule,
    ) -> Result<AccessState, AttendanceServiceError> {
        self.evaluate_with(account_id, |p| rule.allows(p)).await
    }

    /// Like [`evaluate`](Self::evaluate), but a denial is an error.
    pub async fn require(
        &self,
        account_id: Uuid,
        rule: &AccessRule,
    ) -> Result<Profile, AttendanceServiceError> {
        match self.evaluate(account_id, rule).await? {
            AccessState::Granted { profile } => Ok(profile),
            AccessState::Checking | AccessState::Denied => {
                tracing::debug!(%account_id, ?rule, "access denied");
                Err(AttendanceServiceError::Forbidden)
            }
        }
    }
}
