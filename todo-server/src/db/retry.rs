//! Transparent retry of transient database failures
//!
//! Only connection-level blips are retried: I/O errors, pool acquire
//! timeouts and SQLite BUSY/LOCKED. Everything else surfaces immediately.

use std::future::Future;
use std::time::Duration;

/// SQLite primary result codes for a busy or locked database
const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;

/// Attempt budget and backoff for an operation
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Budget used for every repository statement.
    pub const STATEMENT: RetryPolicy = RetryPolicy {
        attempts: 3,
        base_delay: Duration::from_millis(50),
    };

    pub fn new(attempts: u32, base_delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            base_delay,
        }
    }

    /// Run `f` until it succeeds, fails permanently, or the budget is spent.
    /// The delay doubles after every failed attempt.
    pub async fn run<T, F, Fut>(&self, op: &'static str, mut f: F) -> Result<T, sqlx::Error>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, sqlx::Error>>,
    {
        let mut attempt = 1;
        loop {
            match f().await {
                Err(e) if attempt < self.attempts && is_transient(&e) => {
                    let delay = self.base_delay * 2u32.saturating_pow(attempt - 1);
                    tracing::warn!(op, attempt, ?delay, "transient database error, retrying: {}", e);
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}

/// Run one repository statement under [`RetryPolicy::STATEMENT`].
pub async fn with_retry<T, F, Fut>(op: &'static str, f: F) -> Result<T, sqlx::Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    RetryPolicy::STATEMENT.run(op, f).await
}

/// Whether an error is worth retrying.
pub fn is_transient(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut => true,
        sqlx::Error::Database(db) => db
            .code()
            .and_then(|code| code.parse::<i32>().ok())
            .map(|code| matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED))
            .unwrap_or(false),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_errors() {
        assert!(is_transient(&sqlx::Error::PoolTimedOut));
        assert!(is_transient(&sqlx::Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "reset"
        ))));
        assert!(!is_transient(&sqlx::Error::RowNotFound));
        assert!(!is_transient(&sqlx::Error::PoolClosed));
    }

    #[tokio::test(start_paused = true)]
    async fn retries_transient_until_success() {
        let mut calls = 0u32;
        let result = with_retry("test", || {
            calls += 1;
            let n = calls;
            async move {
                if n < 3 {
                    Err(sqlx::Error::PoolTimedOut)
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_budget() {
        let mut calls = 0u32;
        let result: Result<(), _> = RetryPolicy::new(2, Duration::from_millis(10))
            .run("test", || {
                calls += 1;
                async { Err(sqlx::Error::PoolTimedOut) }
            })
            .await;

        assert!(matches!(result, Err(sqlx::Error::PoolTimedOut)));
        assert_eq!(calls, 2);
    }

    #[tokio::test]
    async fn permanent_errors_are_not_retried() {
        let mut calls = 0u32;
        let result: Result<(), _> = with_retry("test", || {
            calls += 1;
            async { Err(sqlx::Error::RowNotFound) }
        })
        .await;

        assert!(matches!(result, Err(sqlx::Error::RowNotFound)));
        assert_eq!(calls, 1);
    }
}
