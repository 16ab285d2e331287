//! StatForge Health API: reports whether the configured Postgres database is
//! reachable.

pub mod db;
pub mod health;
pub mod router;
pub mod state;

pub use db::{Database, DbError};
pub use health::{HealthProbe, HealthResponse};
pub use router::create_router;
pub use state::AppState;
