//! Postgres session pool and the database health check.

use std::time::Duration;

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use diesel::{QueryResult, RunQueryDsl};
use log::info;
use thiserror::Error;

use statforge_core::Settings;

use crate::health::HealthProbe;

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("could not get a database session: {0}")]
    Pool(#[from] PoolError),
    #[error("query failed: {0}")]
    Query(#[from] diesel::result::Error),
}

/// Pooled Postgres sessions.
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Build the pool without opening a connection, so the server can start
    /// while Postgres is still down. Connections are made on first checkout.
    pub fn connect(settings: &Settings) -> Self {
        let manager = ConnectionManager::<PgConnection>::new(settings.database_url());
        let pool = Pool::builder()
            .max_size(8)
            .min_idle(Some(0))
            .connection_timeout(Duration::from_secs(5))
            .idle_timeout(Some(Duration::from_secs(300)))
            .test_on_check_out(true)
            .build_unchecked(manager);

        info!("Database pool configured for {}", describe_target(settings));
        Self::from_pool(pool)
    }

    pub fn from_pool(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Run one unit of work on a pooled session. The session goes back to the
    /// pool when `f` returns, whether it succeeded or not.
    pub fn with_session<T, F>(&self, f: F) -> Result<T, DbError>
    where
        F: FnOnce(&mut PgConnection) -> QueryResult<T>,
    {
        let mut conn = self.pool.get()?;
        Ok(f(&mut conn)?)
    }
}

/// Where the pool points, for logs. URL text is never included because an
/// override can carry credentials anywhere in it.
fn describe_target(settings: &Settings) -> String {
    if settings.database_url.is_some() {
        "custom DATABASE_URL".to_string()
    } else {
        format!(
            "{}:{}/{}",
            settings.postgres_host, settings.postgres_port, settings.postgres_db
        )
    }
}

impl HealthProbe for Database {
    fn check(&self) -> Result<(), String> {
        self.with_session(|conn| diesel::sql_query("SELECT 1").execute(conn))
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}
