#![allow(async_fn_in_trait)]

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::types::{Account, AttendanceSlot, Member, Profile};
use crate::error::AttendanceServiceError;

/// Credential store: sign-in address and password hash per account.
pub trait AccountRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AttendanceServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AttendanceServiceError>;

    /// Fails with `AlreadyRegistered` when the address is taken.
    async fn create(&self, account: &Account) -> Result<(), AttendanceServiceError>;
}

pub trait ProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, AttendanceServiceError>;
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Profile>, AttendanceServiceError>;

    /// All profiles, by `full_name` ascending with unnamed profiles last.
    async fn list(&self) -> Result<Vec<Profile>, AttendanceServiceError>;

    /// Insert or overwrite the row with `profile.id`. Last write wins.
    /// Fails with `AlreadyRegistered` when the username belongs to another profile.
    async fn save(&self, profile: &Profile) -> Result<(), AttendanceServiceError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, AttendanceServiceError>;

    async fn count(&self) -> Result<u64, AttendanceServiceError>;
}

pub trait MemberRepository: Send + Sync {
    /// All members by name.
    async fn list(&self) -> Result<Vec<Member>, AttendanceServiceError>;
    async fn list_by_department(
        &self,
        department: &str,
    ) -> Result<Vec<Member>, AttendanceServiceError>;
    async fn create(&self, member: &Member) -> Result<(), AttendanceServiceError>;

    /// Returns `true` if a row was deleted. Attendance rows cascade.
    async fn delete(&self, id: Uuid) -> Result<bool, AttendanceServiceError>;
}

pub trait AttendanceRepository: Send + Sync {
    /// Make the rows stored for `slot` exactly `member_ids`: delete then insert,
    /// in one transaction. An empty list clears the slot.
    async fn replace_slot(
        &self,
        slot: &AttendanceSlot,
        member_ids: &[Uuid],
    ) -> Result<(), AttendanceServiceError>;

    async fn member_ids_in_slot(
        &self,
        slot: &AttendanceSlot,
    ) -> Result<Vec<Uuid>, AttendanceServiceError>;

    /// Member id of every row dated `date`, across services and departments.
    /// May contain duplicates.
    async fn member_ids_on(&self, date: NaiveDate) -> Result<Vec<Uuid>, AttendanceServiceError>;

    async fn count(&self) -> Result<u64, AttendanceServiceError>;
    async fn count_on(&self, date: NaiveDate) -> Result<u64, AttendanceServiceError>;
}

/// One-way password hashing.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, AttendanceServiceError>;

    /// `false` for a wrong password or an unreadable hash.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Failed sign-in counter per address (Redis, fixed window).
pub trait LoginThrottle: Send + Sync {
    /// Seconds until the address may try again, or `None` when not throttled.
    async fn check(&self, email: &str) -> Result<Option<u64>, AttendanceServiceError>;
    async fn record_failure(&self, email: &str) -> Result<(), AttendanceServiceError>;
    async fn clear(&self, email: &str) -> Result<(), AttendanceServiceError>;
}
