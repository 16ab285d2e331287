//! StatForge Core: resilient fetching and provider extraction for Canadian
//! economic statistics.
//!
//! - Resilient HTTP fetcher with retry and backoff
//! - Bank of Canada Valet, Statistics Canada WDS and CMHC CSV extractors
//! - Tagged records and display tables
//! - Layered settings (defaults, TOML, `.env`, environment)
//! - Inspection helpers used by the dashboards and the CLI

pub mod domain;
pub mod error;
pub mod explore;
pub mod http;
pub mod providers;
pub mod settings;

pub use error::{FetchError, TransportKind};
pub use http::{Fetcher, RetryPolicy};
pub use settings::{Settings, SettingsError};
