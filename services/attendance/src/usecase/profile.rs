use chrono::Utc;
use uuid::Uuid;

use chapel_domain::role::Role;
use chapel_domain::username::is_placeholder_email;

use crate::domain::repository::{AccountRepository, ProfileRepository};
use crate::domain::types::Profile;
use crate::error::{AttendanceServiceError, ValidationError};

// ── Create-or-upgrade ────────────────────────────────────────────────────────

/// Fields written by sign-up and admin provisioning.
#[derive(Debug, Clone)]
pub struct ProfileFields {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: Role,
}

/// Create the profile for `id`, or merge `fields` into the existing one.
///
/// Present fields overwrite, absent ones keep the stored value. Requesting `admin`
/// approves the profile; any other role keeps the stored approval (new profiles start
/// unapproved).
pub async fn create_or_upgrade<P: ProfileRepository>(
    profiles: &P,
    id: Uuid,
    fields: ProfileFields,
) -> Result<Profile, AttendanceServiceError> {
    let now = Utc::now();
    let base = match profiles.find_by_id(id).await? {
        Some(existing) => existing,
        None => Profile::new(id, fields.role, now),
    };
    let profile = Profile {
        username: fields.username.or(base.username),
        full_name: fields.full_name.or(base.full_name),
        email: fields.email.or(base.email),
        role: fields.role,
        updated_at: now,
        ..base
    }
    .normalized();
    profiles.save(&profile).await?;
    Ok(profile)
}

// ── EnsureProfile ────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct EnsureProfileOutput {
    pub profile: Profile,
    pub created: bool,
}

pub struct EnsureProfileUseCase<A: AccountRepository, P: ProfileRepository> {
    pub accounts: A,
    pub profiles: P,
}

impl<A: AccountRepository, P: ProfileRepository> EnsureProfileUseCase<A, P> {
    /// Return the caller's profile, creating a default one on first visit.
    pub async fn execute(&self, account_id: Uuid) -> Result<EnsureProfileOutput, AttendanceServiceError> {
        if let Some(profile) = self.profiles.find_by_id(account_id).await? {
            return Ok(EnsureProfileOutput {
                profile,
                created: false,
            });
        }

        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(AttendanceServiceError::Unauthenticated)?;

        let mut profile = Profile::new(account_id, Role::User, Utc::now());
        if is_placeholder_email(&account.email) {
            profile.username = account.email.split('@').next().map(str::to_owned);
        } else {
            profile.email = Some(account.email);
        }
        self.profiles.save(&profile).await?;
        tracing::info!(%account_id, "profile created on first visit");

        Ok(EnsureProfileOutput {
            profile,
            created: true,
        })
    }
}

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<P: ProfileRepository> {
    pub profiles: P,
}

impl<P: ProfileRepository> GetProfileUseCase<P> {
    pub async fn execute(&self, id: Uuid) -> Result<Profile, AttendanceServiceError> {
        self.profiles
            .find_by_id(id)
            .await?
            .ok_or(AttendanceServiceError::ProfileNotFound)
    }
}

// ── UpdateOwnProfile ─────────────────────────────────────────────────────────

pub struct UpdateOwnProfileInput {
    pub full_name: Option<String>,
    pub email: Option<String>,
}

pub struct UpdateOwnProfileUseCase<P: ProfileRepository> {
    pub profiles: P,
}

impl<P: ProfileRepository> UpdateOwnProfileUseCase<P> {
    /// Owners may change their display name and contact email, nothing else.
    pub async fn execute(
        &self,
        id: Uuid,
        input: UpdateOwnProfileInput,
    ) -> Result<Profile, AttendanceServiceError> {
        if input.full_name.is_none() && input.email.is_none() {
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
        profile.updated_at = Utc::now();

        let profile = profile.normalized();
        self.profiles.save(&profile).await?;
        Ok(profile)
    }
}

/// Trimmed value, or `None` when blank.
pub(crate) fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
