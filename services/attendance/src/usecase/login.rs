use uuid::Uuid;

use chapel_auth_types::token::issue_session_token;
use chapel_domain::username::{normalize_username, placeholder_email};

use crate::domain::repository::{AccountRepository, LoginThrottle, PasswordHasher, ProfileRepository};
use crate::domain::types::{Account, Profile};
use crate::error::{AttendanceServiceError, ValidationError};
use crate::usecase::credentials::CredentialCheck;

pub struct LoginInput {
    pub username: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub account_id: Uuid,
    pub profile: Profile,
    pub session_token: String,
    pub expires_at: u64,
}

pub struct LoginUseCase<A, P, H, T> {
    pub accounts: A,
    pub profiles: P,
    pub hasher: H,
    pub throttle: T,
    pub jwt_secret: String,
}

impl<A, P, H, T> LoginUseCase<A, P, H, T>
where
    A: AccountRepository,
    P: ProfileRepository,
    H: PasswordHasher,
    T: LoginThrottle,
{
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, AttendanceServiceError> {
        let username = normalize_username(&input.username);
        if username.is_empty() {
            return Err(ValidationError::MissingUsername.into());
        }
        if input.password.is_empty() {
            return Err(ValidationError::MissingPassword.into());
        }

        let account = self.resolve(&username, &input.password).await?;
        let profile = self.approved_profile(&account).await?;

        let (session_token, expires_at) = issue_session_token(account.id, &self.jwt_secret)
            .map_err(|e| AttendanceServiceError::Internal(e.into()))?;

        tracing::info!(account_id = %account.id, role = profile.role.as_str(), "signed in");
        Ok(LoginOutput {
            account_id: account.id,
            profile,
            session_token,
            expires_at,
        })
    }

    /// Placeholder address first; only on invalid credentials retry with the sign-in
    /// address of the account that owns `username`.
    ///
    /// A successful retry also resets the placeholder counter.
    async fn resolve(&self, username: &str, password: &str) -> Result<Account, AttendanceServiceError> {
        let check = CredentialCheck {
            accounts: &self.accounts,
            hasher: &self.hasher,
            throttle: &self.throttle,
        };

        let placeholder = placeholder_email(username);
        match check.verify(&placeholder, password).await {
            Err(AttendanceServiceError::InvalidCredentials) => {}
            other => return other,
        }

        let email = match self.sign_in_address(username).await {
            Some(email) if email != placeholder => email,
            _ => return Err(AttendanceServiceError::InvalidCredentials),
        };
        let account = check.verify(&email, password).await?;
        check.reset(&placeholder).await;
        Ok(account)
    }

    /// Sign-in address of the account behind the profile named `username`.
    /// Lookup failures are logged and treated as no match.
    async fn sign_in_address(&self, username: &str) -> Option<String> {
        let profile = match self.profiles.find_by_username(username).await {
            Ok(profile) => profile?,
            Err(e) => {
                tracing::warn!(error = %e, "username lookup failed during sign-in");
                return None;
            }
        };
        match self.accounts.find_by_id(profile.id).await {
            Ok(account) => account.map(|a| a.email),
            Err(e) => {
                tracing::warn!(error = %e, "account lookup failed during sign-in");
                None
            }
        }
    }

    /// Approval gate. Nothing is issued unless the profile exists and may sign in.
    async fn approved_profile(&self, account: &Account) -> Result<Profile, AttendanceServiceError> {
        let profile = self
            .profiles
            .find_by_id(account.id)
            .await
            .map_err(|e| AttendanceServiceError::ProfileCheckFailed(e.into()))?;
        match profile {
            Some(profile) if profile.may_sign_in() => Ok(profile),
            _ => {
                tracing::info!(account_id = %account.id, "sign-in refused: pending approval");
                Err(AttendanceServiceError::PendingApproval)
            }
        }
    }
}
