//! Password check against the account store, throttled per sign-in address.

use crate::domain::repository::{AccountRepository, LoginThrottle, PasswordHasher};
use crate::domain::types::Account;
use crate::error::AttendanceServiceError;

pub struct CredentialCheck<'a, A, H, T> {
    pub accounts: &'a A,
    pub hasher: &'a H,
    pub throttle: &'a T,
}

impl<A, H, T> CredentialCheck<'_, A, H, T>
where
    A: AccountRepository,
    H: PasswordHasher,
    T: LoginThrottle,
{
    /// Verify `password` for `email`.
    ///
    /// Unknown address and wrong password are indistinguishable (`InvalidCredentials`).
    /// Throttle outages are logged and do not block sign-in.
    pub async fn verify(&self, email: &str, password: &str) -> Result<Account, AttendanceServiceError> {
        match self.throttle.check(email).await {
            Ok(Some(retry_after_secs)) => {
                return Err(AttendanceServiceError::RateLimited { retry_after_secs });
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "login throttle unavailable"),
        }

        let account = self.accounts.find_by_email(email).await?;
        match account {
            Some(account) if self.hasher.verify(password, &account.password_hash) => {
                self.reset(email).await;
                Ok(account)
            }
            _ => {
                if let Err(e) = self.throttle.record_failure(email).await {
                    tracing::warn!(error = %e, "failed to record login failure");
                }
                Err(AttendanceServiceError::InvalidCredentials)
            }
        }
    }

    /// Drop the failure counter for `email`. Throttle outages are logged.
    pub async fn reset(&self, email: &str) {
        if let Err(e) = self.throttle.clear(email).await {
            tracing::warn!(error = %e, "failed to reset login throttle");
        }
    }
}
