use std::env;

const DEFAULT_POOL_SIZE: u32 = 10;

/// Runtime configuration for [`crate::pool::ConnectionPool`] and the
/// Postgres-backed repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepositoryConfig {
    /// Relational DSN, read from `DATABASE_URL`.
    pub database_url: String,
    /// Fixed pool capacity, read from `CHESSMATE_DB_POOL_SIZE` (default 10).
    pub pool_size: u32,
}

impl RepositoryConfig {
    /// Builds a [`RepositoryConfig`] from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::RepositoryError::Config`] if `DATABASE_URL`
    /// is unset.
    pub fn from_env() -> Result<Self, crate::error::RepositoryError> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| crate::error::RepositoryError::Config("DATABASE_URL"))?;
        let pool_size = env::var("CHESSMATE_DB_POOL_SIZE")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_POOL_SIZE);
        Ok(Self {
            database_url,
            pool_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_database_url_is_a_config_error() {
        // SAFETY: test runs single-threaded w.r.t. this var via serial env access
        // in this module only; no other test in this crate touches it.
        unsafe {
            env::remove_var("DATABASE_URL");
        }
        let err = RepositoryConfig::from_env().unwrap_err();
        assert!(matches!(
            err,
            crate::error::RepositoryError::Config("DATABASE_URL")
        ));
    }

    #[test]
    fn pool_size_defaults_when_unset() {
        unsafe {
            env::set_var("DATABASE_URL", "postgres://localhost/test");
            env::remove_var("CHESSMATE_DB_POOL_SIZE");
        }
        let config = RepositoryConfig::from_env().unwrap();
        assert_eq!(config.pool_size, DEFAULT_POOL_SIZE);
        unsafe {
            env::remove_var("DATABASE_URL");
        }
    }

    #[test]
    fn pool_size_is_overridable() {
        unsafe {
            env::set_var("DATABASE_URL", "postgres://localhost/test");
            env::set_var("CHESSMATE_DB_POOL_SIZE", "25");
        }
        let config = RepositoryConfig::from_env().unwrap();
        assert_eq!(config.pool_size, 25);
        unsafe {
            env::remove_var("DATABASE_URL");
            env::remove_var("CHESSMATE_DB_POOL_SIZE");
        }
    }
}
