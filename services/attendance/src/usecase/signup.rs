use chrono::Utc;
use uuid::Uuid;

use chapel_domain::role::Role;
use chapel_domain::username::{
    is_placeholder_email, normalize_username, placeholder_email, validate_username,
};

use crate::domain::repository::{AccountRepository, PasswordHasher, ProfileRepository};
use crate::domain::types::{Account, MIN_PASSWORD_CHARS, Profile};
use crate::error::{AttendanceServiceError, ValidationError};
use crate::usecase::profile::{ProfileFields, create_or_upgrade, non_blank};

pub struct SignupInput {
    pub name: String,
    pub username: String,
    pub email: Option<String>,
    pub password: String,
    pub password_confirm: Option<String>,
    pub role: Role,
}

/// Signup fields after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSignup {
    pub name: String,
    /// Lowercased.
    pub username: String,
    /// Trimmed real email, if one was given.
    pub email: Option<String>,
}

impl ValidSignup {
    /// Address the account signs in with.
    pub fn sign_in_email(&self) -> String {
        self.email
            .clone()
            .unwrap_or_else(|| placeholder_email(&self.username))
    }
}

/// Check the form in order: confirmation, password length, name, username, email.
pub fn validate_signup(input: &SignupInput) -> Result<ValidSignup, ValidationError> {
    if input
        .password_confirm
        .as_deref()
        .is_some_and(|confirm| confirm != input.password)
    {
        return Err(ValidationError::PasswordMismatch);
    }
    if input.password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(ValidationError::PasswordTooShort);
    }
    let name = input.name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    let username = input.username.trim();
    if username.is_empty() {
        return Err(ValidationError::MissingUsername);
    }
    if !validate_username(username) {
        return Err(ValidationError::InvalidUsername);
    }
    let email = input.email.clone().and_then(non_blank);
    if email.as_deref().is_some_and(is_placeholder_email) {
        return Err(ValidationError::ReservedEmail);
    }
    Ok(ValidSignup {
        name: name.to_owned(),
        username: normalize_username(username),
        email,
    })
}

pub struct SignupUseCase<A, P, H> {
    pub accounts: A,
    pub profiles: P,
    pub hasher: H,
}

impl<A, P, H> SignupUseCase<A, P, H>
where
    A: AccountRepository,
    P: ProfileRepository,
    H: PasswordHasher,
{
    /// Create the account, then create-or-upgrade its profile.
    ///
    /// The two writes are not atomic: if the profile write fails the account remains,
    /// and `POST /profiles/ensure` repairs it on first sign-in.
    pub async fn execute(&self, input: SignupInput) -> Result<Profile, AttendanceServiceError> {
        let valid = validate_signup(&input)?;

        if self.profiles.find_by_username(&valid.username).await?.is_some() {
            return Err(AttendanceServiceError::AlreadyRegistered);
        }

        let account = Account {
            id: Uuid::now_v7(),
            email: valid.sign_in_email(),
            password_hash: self.hasher.hash(&input.password)?,
            created_at: Utc::now(),
        };
        self.accounts.create(&account).await?;

        let profile = create_or_upgrade(
            &self.profiles,
            account.id,
            ProfileFields {
                username: Some(valid.username),
                full_name: Some(valid.name),
                email: valid.email,
                role: input.role,
            },
        )
        .await?;

        tracing::info!(
            account_id = %account.id,
            role = input.role.as_str(),
            approved = profile.approved,
            "account registered"
        );
        Ok(profile)
    }

    /// Provision an admin account unless the username is already taken.
    /// Returns `true` when an account was created.
    pub async fn bootstrap_admin(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, AttendanceServiceError> {
        if self
            .profiles
            .find_by_username(&normalize_username(username))
            .await?
            .is_some()
        {
            return Ok(false);
        }
        self.execute(SignupInput {
            name: username.trim().to_owned(),
            username: username.to_owned(),
            email: None,
            password: password.to_owned(),
            password_confirm: None,
            role: Role::Admin,
        })
        .await?;
        Ok(true)
    }
}
