//! Normalized data model shared by the extractors, dashboards and CLI.

pub mod record;
pub mod table;

pub use record::{Provider, Record, Row, Scalar};
pub use table::Table;
