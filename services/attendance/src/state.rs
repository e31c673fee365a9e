use axum::extract::FromRef;
use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use deadpool_redis::Pool as RedisPool;
use sea_orm::DatabaseConnection;

use chapel_auth_types::cookie::CookieSettings;
use chapel_auth_types::session::SessionSecret;

use crate::infra::cache::RedisLoginThrottle;
use crate::infra::db::{
    DbAccountRepository, DbAttendanceRepository, DbMemberRepository, DbProfileRepository,
};
use crate::infra::password::Argon2PasswordHasher;
use crate::usecase::access::AccessGuard;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub redis: RedisPool,
    pub jwt_secret: String,
    pub cookie: CookieSettings,
    /// Church local time, for "today" in statistics.
    pub utc_offset: FixedOffset,
}

impl AppState {
    pub fn account_repo(&self) -> DbAccountRepository {
        DbAccountRepository {
            db: self.db.clone(),
        }
    }

    pub fn profile_repo(&self) -> DbProfileRepository {
        DbProfileRepository {
            db: self.db.clone(),
        }
    }

    pub fn member_repo(&self) -> DbMemberRepository {
        DbMemberRepository {
            db: self.db.clone(),
        }
    }

    pub fn attendance_repo(&self) -> DbAttendanceRepository {
        DbAttendanceRepository {
            db: self.db.clone(),
        }
    }

    pub fn login_throttle(&self) -> RedisLoginThrottle {
        RedisLoginThrottle {
            pool: self.redis.clone(),
        }
    }

    pub fn password_hasher(&self) -> Argon2PasswordHasher {
        Argon2PasswordHasher
    }

    pub fn access_guard(&self) -> AccessGuard<DbProfileRepository> {
        AccessGuard {
            profiles: self.profile_repo(),
        }
    }

    /// Current date at the church.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.utc_offset).date_naive()
    }
}

/// `UTC+hours`, falling back to UTC when out of range.
pub fn utc_offset(hours: i32) -> FixedOffset {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix())
}

impl FromRef<AppState> for SessionSecret {
    fn from_ref(state: &AppState) -> Self {
        SessionSecret(state.jwt_secret.clone())
    }
}
