use anyhow::Context as _;
use deadpool_redis::Pool;
use deadpool_redis::redis::AsyncCommands;

use crate::domain::repository::LoginThrottle;
use crate::domain::types::{LOGIN_FAILURE_LIMIT, LOGIN_FAILURE_WINDOW_SECS};
use crate::error::AttendanceServiceError;

/// Fixed-window failure counter: `INCR`, with `EXPIRE` set on the first failure.
#[derive(Clone)]
pub struct RedisLoginThrottle {
    pub pool: Pool,
}

fn failures_key(email: &str) -> String {
    format!("login_failures:{}", email.to_lowercase())
}

impl LoginThrottle for RedisLoginThrottle {
    async fn check(&self, email: &str) -> Result<Option<u64>, AttendanceServiceError> {
        let mut conn = self.pool.get().await.context("get redis connection")?;
        let key = failures_key(email);
        let failures: Option<u64> = conn.get(&key).await.context("read login failures")?;
        if failures.unwrap_or(0) < LOGIN_FAILURE_LIMIT {
            return Ok(None);
        }
        let ttl: i64 = conn.ttl(&key).await.context("read login failure ttl")?;
        let retry_after = u64::try_from(ttl)
            .ok()
            .filter(|secs| *secs > 0)
            .unwrap_or(LOGIN_FAILURE_WINDOW_SECS);
        Ok(Some(retry_after))
    }

    async fn record_failure(&self, email: &str) -> Result<(), AttendanceServiceError> {
        let mut conn = self.pool.get().await.context("get redis connection")?;
        let key = failures_key(email);
        let failures: u64 = conn.incr(&key, 1).await.context("count login failure")?;
        if failures == 1 {
            let (): () = conn
                .expire(&key, LOGIN_FAILURE_WINDOW_SECS as i64)
                .await
                .context("start login failure window")?;
        }
        Ok(())
    }

    async fn clear(&self, email: &str) -> Result<(), AttendanceServiceError> {
        let mut conn = self.pool.get().await.context("get redis connection")?;
        let (): () = conn
            .del(failures_key(email))
            .await
            .context("reset login failures")?;
        Ok(())
    }
}
