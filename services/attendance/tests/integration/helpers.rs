use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use chapel_attendance::domain::repository::{
    AccountRepository, AttendanceRepository, LoginThrottle, MemberRepository, PasswordHasher,
    ProfileRepository,
};
use chapel_attendance::domain::types::{
    Account, AttendanceSlot, LOGIN_FAILURE_LIMIT, Member, Profile,
};
use chapel_attendance::error::AttendanceServiceError;
use chapel_domain::role::Role;
use chapel_domain::service::ServiceType;

pub const TEST_JWT_SECRET: &str = "integration-test-jwt-secret";

fn store_error(what: &str) -> AttendanceServiceError {
    AttendanceServiceError::Store(anyhow::anyhow!("{what}: connection refused"))
}

// ── MockAccountRepo ──────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockAccountRepo {
    pub accounts: Arc<Mutex<Vec<Account>>>,
}

impl MockAccountRepo {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self {
            accounts: Arc::new(Mutex::new(accounts)),
        }
    }

    pub fn all(&self) -> Vec<Account> {
        self.accounts.lock().unwrap().clone()
    }
}

impl AccountRepository for MockAccountRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AttendanceServiceError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AttendanceServiceError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn create(&self, account: &Account) -> Result<(), AttendanceServiceError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(AttendanceServiceError::AlreadyRegistered);
        }
        accounts.push(account.clone());
        Ok(())
    }
}

// ── MockProfileRepo ──────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockProfileRepo {
    pub profiles: Arc<Mutex<Vec<Profile>>>,
    /// Every read fails.
    pub broken: bool,
}

impl MockProfileRepo {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self {
            profiles: Arc::new(Mutex::new(profiles)),
            broken: false,
        }
    }

    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub fn all(&self) -> Vec<Profile> {
        self.profiles.lock().unwrap().clone()
    }

    pub fn get(&self, id: Uuid) -> Option<Profile> {
        self.all().into_iter().find(|p| p.id == id)
    }
}

impl ProfileRepository for MockProfileRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, AttendanceServiceError> {
        if self.broken {
            return Err(store_error("find profile by id"));
        }
        Ok(self.get(id))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Profile>, AttendanceServiceError> {
        if self.broken {
            return Err(store_error("find profile by username"));
        }
        Ok(self
            .all()
            .into_iter()
            .find(|p| p.username.as_deref() == Some(username)))
    }

    async fn list(&self) -> Result<Vec<Profile>, AttendanceServiceError> {
        let mut all = self.all();
        all.sort_by(|a, b| match (&a.full_name, &b.full_name) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        Ok(all)
    }

    async fn save(&self, profile: &Profile) -> Result<(), AttendanceServiceError> {
        let mut profiles = self.profiles.lock().unwrap();
        if profile.username.is_some()
            && profiles
                .iter()
                .any(|p| p.id != profile.id && p.username == profile.username)
        {
            return Err(AttendanceServiceError::AlreadyRegistered);
        }
        match profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(existing) => *existing = profile.clone(),
            None => profiles.push(profile.clone()),
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AttendanceServiceError> {
        let mut profiles = self.profiles.lock().unwrap();
        let before = profiles.len();
        profiles.retain(|p| p.id != id);
        Ok(profiles.len() != before)
    }

    async fn count(&self) -> Result<u64, AttendanceServiceError> {
        Ok(self.profiles.lock().unwrap().len() as u64)
    }
}

// ── MockMemberRepo ───────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockMemberRepo {
    pub members: Arc<Mutex<Vec<Member>>>,
}

impl MockMemberRepo {
    pub fn new(members: Vec<Member>) -> Self {
        Self {
            members: Arc::new(Mutex::new(members)),
        }
    }
}

impl MemberRepository for MockMemberRepo {
    async fn list(&self) -> Result<Vec<Member>, AttendanceServiceError> {
        let mut all = self.members.lock().unwrap().clone();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn list_by_department(
        &self,
        department: &str,
    ) -> Result<Vec<Member>, AttendanceServiceError> {
        let mut all = self.list().await?;
        all.retain(|m| m.department == department);
        Ok(all)
    }

    async fn create(&self, member: &Member) -> Result<(), AttendanceServiceError> {
        self.members.lock().unwrap().push(member.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AttendanceServiceError> {
        let mut members = self.members.lock().unwrap();
        let before = members.len();
        members.retain(|m| m.id != id);
        Ok(members.len() != before)
    }
}

// ── MockAttendanceRepo ───────────────────────────────────────────────────────

/// One stored attendance row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub member_id: Uuid,
    pub slot: AttendanceSlot,
}

#[derive(Clone, Default)]
pub struct MockAttendanceRepo {
    pub rows: Arc<Mutex<Vec<Row>>>,
    /// `member_ids_on` fails for these dates.
    pub failing_dates: HashSet<NaiveDate>,
    /// `replace_slot` fails without touching the rows.
    pub fail_replace: bool,
}

impl MockAttendanceRepo {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
            ..Self::default()
        }
    }

    /// Member ids stored for `slot`, sorted.
    pub fn members_in(&self, slot: &AttendanceSlot) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| &r.slot == slot)
            .map(|r| r.member_id)
            .collect();
        ids.sort();
        ids
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

impl AttendanceRepository for MockAttendanceRepo {
    async fn replace_slot(
        &self,
        slot: &AttendanceSlot,
        member_ids: &[Uuid],
    ) -> Result<(), AttendanceServiceError> {
        if self.fail_replace {
            return Err(AttendanceServiceError::Store(
                anyhow::anyhow!("insert violates foreign key constraint \"attendance_member_id_fkey\"")
                    .context("replace attendance slot"),
            ));
        }
        let mut rows = self.rows.lock().unwrap();
        rows.retain(|r| &r.slot != slot);
        rows.extend(member_ids.iter().map(|id| Row {
            member_id: *id,
            slot: slot.clone(),
        }));
        Ok(())
    }

    async fn member_ids_in_slot(
        &self,
        slot: &AttendanceSlot,
    ) -> Result<Vec<Uuid>, AttendanceServiceError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| &r.slot == slot)
            .map(|r| r.member_id)
            .collect())
    }

    async fn member_ids_on(&self, date: NaiveDate) -> Result<Vec<Uuid>, AttendanceServiceError> {
        if self.failing_dates.contains(&date) {
            return Err(store_error("load attendance by date"));
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.slot.date == date)
            .map(|r| r.member_id)
            .collect())
    }

    async fn count(&self) -> Result<u64, AttendanceServiceError> {
        Ok(self.row_count() as u64)
    }

    async fn count_on(&self, date: NaiveDate) -> Result<u64, AttendanceServiceError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.slot.date == date)
            .count() as u64)
    }
}

// ── MockHasher ───────────────────────────────────────────────────────────────

/// Reversible stand-in for argon2 so tests stay fast.
#[derive(Clone, Default)]
pub struct MockHasher;

impl PasswordHasher for MockHasher {
    fn hash(&self, password: &str) -> Result<String, AttendanceServiceError> {
        Ok(format!("hashed:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        hash.strip_prefix("hashed:") == Some(password)
    }
}

// ── MockThrottle ─────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockThrottle {
    pub failures: Arc<Mutex<HashMap<String, u64>>>,
    /// Every call fails, as if Redis were down.
    pub broken: bool,
}

/// Cooldown the mock reports once an address is throttled.
pub const MOCK_RETRY_AFTER_SECS: u64 = 37;

impl MockThrottle {
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub fn failures_for(&self, email: &str) -> u64 {
        self.failures
            .lock()
            .unwrap()
            .get(email)
            .copied()
            .unwrap_or(0)
    }
}

impl LoginThrottle for MockThrottle {
    async fn check(&self, email: &str) -> Result<Option<u64>, AttendanceServiceError> {
        if self.broken {
            return Err(store_error("get redis connection"));
        }
        Ok((self.failures_for(email) >= LOGIN_FAILURE_LIMIT).then_some(MOCK_RETRY_AFTER_SECS))
    }

    async fn record_failure(&self, email: &str) -> Result<(), AttendanceServiceError> {
        if self.broken {
            return Err(store_error("get redis connection"));
        }
        *self
            .failures
            .lock()
            .unwrap()
            .entry(email.to_owned())
            .or_default() += 1;
        Ok(())
    }

    async fn clear(&self, email: &str) -> Result<(), AttendanceServiceError> {
        if self.broken {
            return Err(store_error("get redis connection"));
        }
        self.failures.lock().unwrap().remove(email);
        Ok(())
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn account(email: &str, password: &str) -> Account {
    Account {
        id: Uuid::now_v7(),
        email: email.to_owned(),
        password_hash: format!("hashed:{password}"),
        created_at: Utc::now(),
    }
}

pub fn profile(id: Uuid, username: &str, role: Role, approved: bool) -> Profile {
    let mut profile = Profile::new(id, role, Utc::now());
    profile.username = Some(username.to_owned());
    profile.full_name = Some(username.to_uppercase());
    profile.approved = approved;
    profile.normalized()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn slot(on: NaiveDate, service_type: ServiceType, department: &str) -> AttendanceSlot {
    AttendanceSlot {
        date: on,
        service_type,
        department: department.to_owned(),
    }
}

pub fn member(name: &str, department: &str) -> Member {
    Member {
        id: Uuid::now_v7(),
        name: name.to_owned(),
        department: department.to_owned(),
        created_at: Utc::now(),
    }
}
