use std::fmt;
use std::sync::Mutex;

use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres};

use crate::config::RepositoryConfig;
use crate::error::RepositoryError;

/// A point-in-time snapshot of pool occupancy, returned by
/// [`ConnectionPool::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    pub capacity: u32,
    pub in_use: u32,
    pub waiting: u32,
}

impl fmt::Display for PoolStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pool(capacity={}, in_use={}, waiting={})",
            self.capacity, self.in_use, self.waiting
        )
    }
}

#[derive(Debug, Default)]
struct Counters {
    in_use: u32,
    waiting: u32,
}

/// A fixed-capacity connection pool. Wraps [`sqlx::PgPool`] (which itself
/// enforces the connection cap) with a small mutex-guarded occupancy
/// counter so callers can observe `{capacity, in_use, waiting}` without a
/// round trip to the database.
pub struct ConnectionPool {
    pool: PgPool,
    capacity: u32,
    counters: Mutex<Counters>,
}

impl ConnectionPool {
    /// Connects to `config.database_url` with `config.pool_size` max
    /// connections.
    ///
    /// # Errors
    ///
    /// Returns a sanitized [`RepositoryError::Db`] if the connection
    /// attempt fails.
    pub async fn connect(config: &RepositoryConfig) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.pool_size)
            .connect(&config.database_url)
            .await
            .map_err(RepositoryError::from_driver)?;
        Ok(Self {
            pool,
            capacity: config.pool_size,
            counters: Mutex::new(Counters::default()),
        })
    }

    /// Wraps an already-constructed [`sqlx::PgPool`], for callers (tests,
    /// migration tooling) that build the pool themselves.
    #[must_use]
    pub fn from_pool(pool: PgPool, capacity: u32) -> Self {
        Self {
            pool,
            capacity,
            counters: Mutex::new(Counters::default()),
        }
    }

    #[must_use]
    pub fn raw(&self) -> &PgPool {
        &self.pool
    }

    #[must_use]
    pub fn stats(&self) -> PoolStats {
        let counters = self.counters.lock().expect("pool counters mutex poisoned");
        PoolStats {
            capacity: self.capacity,
            in_use: counters.in_use,
            waiting: counters.waiting,
        }
    }

    /// Runs `f` against a borrowed connection, tracking occupancy for the
    /// full lifetime of the borrow. `waiting` is incremented before the
    /// connection is acquired and decremented (with `in_use` incremented)
    /// once it is. `in_use` is decremented on every exit path, including
    /// acquisition failure and `f` returning an error, via an RAII guard.
    ///
    /// # Errors
    ///
    /// Propagates acquisition failures (sanitized) and whatever error `f`
    /// returns.
    pub async fn with_connection<F, Fut, T>(&self, f: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(PoolConnection<Postgres>) -> Fut,
        Fut: std::future::Future<Output = Result<T, RepositoryError>>,
    {
        self.mark_waiting(1);
        let acquired = self.pool.acquire().await;
        self.mark_waiting(-1);

        let conn = match acquired {
            Ok(conn) => conn,
            Err(err) => return Err(RepositoryError::from_driver(err)),
        };

        let _guard = InUseGuard::new(self);
        f(conn).await
    }

    fn mark_waiting(&self, delta: i32) {
        let mut counters = self.counters.lock().expect("pool counters mutex poisoned");
        counters.waiting = adjust(counters.waiting, delta);
    }

    fn mark_in_use(&self, delta: i32) {
        let mut counters = self.counters.lock().expect("pool counters mutex poisoned");
        counters.in_use = adjust(counters.in_use, delta);
    }
}

fn adjust(value: u32, delta: i32) -> u32 {
    if delta >= 0 {
        value.saturating_add(delta as u32)
    } else {
        value.saturating_sub((-delta) as u32)
    }
}

struct InUseGuard<'a> {
    pool: &'a ConnectionPool,
}

impl<'a> InUseGuard<'a> {
    fn new(pool: &'a ConnectionPool) -> Self {
        pool.mark_in_use(1);
        Self { pool }
    }
}

impl Drop for InUseGuard<'_> {
    fn drop(&mut self) {
        self.pool.mark_in_use(-1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_display_is_human_readable() {
        let stats = PoolStats {
            capacity: 10,
            in_use: 2,
            waiting: 1,
        };
        assert_eq!(stats.to_string(), "pool(capacity=10, in_use=2, waiting=1)");
    }

    #[test]
    fn adjust_saturates_instead_of_underflowing() {
        assert_eq!(adjust(0, -1), 0);
        assert_eq!(adjust(5, -2), 3);
        assert_eq!(adjust(5, 2), 7);
    }
}
