//! Provider extractors: Bank of Canada, Statistics Canada and CMHC.
//!
//! Each extractor borrows the shared [`Fetcher`](crate::http::Fetcher), builds
//! provider-specific URLs and payloads, and reshapes responses into rows.

pub mod boc;
pub mod cmhc;
pub mod statcan;
pub mod vector_id;

pub use boc::BankOfCanada;
pub use cmhc::{Cmhc, CsvTable};
pub use statcan::StatCan;
pub use vector_id::{parse_vector_list, VectorId, VectorIdError};
