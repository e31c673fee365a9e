use chrono::{NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use chapel_domain::department::normalize_departments;
use chapel_domain::role::{Position, Role};

use crate::domain::repository::{AttendanceRepository, ProfileRepository};
use crate::domain::types::Profile;
use crate::error::{AttendanceServiceError, ValidationError};
use crate::usecase::profile::non_blank;

// ── ListProfiles ─────────────────────────────────────────────────────────────

pub struct ListProfilesUseCase<P: ProfileRepository> {
    pub profiles: P,
}

impl<P: ProfileRepository> ListProfilesUseCase<P> {
    pub async fn execute(&self) -> Result<Vec<Profile>, AttendanceServiceError> {
        self.profiles.list().await
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

/// Admin edit. Absent fields are left unchanged; a blank name or email clears it.
#[derive(Debug, Default)]
pub struct UpdateProfileInput {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub position: Option<Position>,
    pub role: Option<Role>,
    pub departments: Option<Vec<String>>,
}

impl UpdateProfileInput {
    fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.email.is_none()
            && self.position.is_none()
            && self.role.is_none()
            && self.departments.is_none()
    }
}

pub struct UpdateProfileUseCase<P: ProfileRepository> {
    pub profiles: P,
}

impl<P: ProfileRepository> UpdateProfileUseCase<P> {
    pub async fn execute(
        &self,
        id: Uuid,
        input: UpdateProfileInput,
    ) -> Result<Profile, AttendanceServiceError> {
        if input.is_empty() {
            return Err(ValidationError::MissingData.into());
        }
        let mut profile = self
            .profiles
            .find_by_id(id)
            .await?
            .ok_or(AttendanceServiceError::ProfileNotFound)?;

        if let Some(name) = input.full_name {
            profile.full_name = non_blank(name);
        }
        if let Some(email) = input.email {
            profile.email = non_blank(email);
        }
        if let Some(position) = input.position {
            profile.position = position;
        }
        if let Some(role) = input.role {
            profile.role = role;
        }
        if let Some(departments) = input.departments {
            profile.departments = normalize_departments(departments);
        }
        profile.updated_at = Utc::now();

        let profile = profile.normalized();
        self.profiles.save(&profile).await?;
        tracing::info!(
            profile_id = %id,
            role = profile.role.as_str(),
            approved = profile.approved,
            "profile updated by admin"
        );
        Ok(profile)
    }
}

// ── SetApproval ──────────────────────────────────────────────────────────────

pub struct SetApprovalUseCase<P: ProfileRepository> {
    pub profiles: P,
}

impl<P: ProfileRepository> SetApprovalUseCase<P> {
    /// Returns the stored profile; revoking approval of an admin has no effect.
    pub async fn execute(&self, id: Uuid, approved: bool) -> Result<Profile, AttendanceServiceError> {
        let mut profile = self
            .profiles
            .find_by_id(id)
            .await?
            .ok_or(AttendanceServiceError::ProfileNotFound)?;
        profile.approved = approved;
        profile.updated_at = Utc::now();

        let profile = profile.normalized();
        self.profiles.save(&profile).await?;
        tracing::info!(profile_id = %id, approved = profile.approved, "approval changed");
        Ok(profile)
    }
}

// ── DeleteProfile ────────────────────────────────────────────────────────────

pub struct DeleteProfileUseCase<P: ProfileRepository> {
    pub profiles: P,
}

impl<P: ProfileRepository> DeleteProfileUseCase<P> {
    pub async fn execute(&self, id: Uuid) -> Result<(), AttendanceServiceError> {
        if !self.profiles.delete(id).await? {
            return Err(AttendanceServiceError::ProfileNotFound);
        }
        tracing::info!(profile_id = %id, "profile deleted");
        Ok(())
    }
}

// ── Overview ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub total_profiles: u64,
    pub total_attendance: u64,
    pub today_attendance: u64,
}

pub struct OverviewUseCase<P: ProfileRepository, R: AttendanceRepository> {
    pub profiles: P,
    pub attendance: R,
}

impl<P: ProfileRepository, R: AttendanceRepository> OverviewUseCase<P, R> {
    pub async fn execute(&self, today: NaiveDate) -> Result<Overview, AttendanceServiceError> {
        Ok(Overview {
            total_profiles: self.profiles.count().await?,
            total_attendance: self.attendance.count().await?,
            today_attendance: self.attendance.count_on(today).await?,
        })
    }
}
