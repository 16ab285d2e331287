//! Interactive inspection helpers shared by the dashboards and the CLI.
//!
//! Each `inspect_*` call validates free-text input, fetches through the
//! provider extractors and returns two display tables: metadata and data.

use chrono::{Datelike, NaiveDate};
use serde_json::{json, Value};
use thiserror::Error;

use crate::domain::Table;
use crate::error::FetchError;
use crate::http::Fetcher;
use crate::providers::{self, parse_vector_list, BankOfCanada, StatCan, VectorIdError};
use crate::settings::Settings;

/// Rows per page in metadata tables.
pub const META_PAGE_SIZE: usize = 10;
/// Rows per page in data tables.
pub const DATA_PAGE_SIZE: usize = 20;

/// Problems with what the user typed, caught before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Please enter Vector IDs.")]
    NoVectorIds,
    #[error("No valid Vector IDs found.")]
    NoValidVectorIds,
    #[error("{0}")]
    BadVectorId(#[from] VectorIdError),
    #[error("Please enter a Series Name.")]
    NoSeriesName,
}

#[derive(Debug, Error)]
pub enum ExploreError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl ExploreError {
    /// One-line status text for a dashboard.
    ///
    /// Prompts for missing input are shown as-is; everything else is an error.
    pub fn status_line(&self) -> String {
        match self {
            ExploreError::Input(InputError::BadVectorId(e)) => format!("Error: {e}"),
            ExploreError::Input(e) => e.to_string(),
            ExploreError::Fetch(e) => format!("Error: {e}"),
        }
    }
}

/// Result of one inspection: a metadata table and a data table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inspection {
    pub meta: Table,
    pub data: Table,
}

/// January 1st five years before `today`'s year.
pub fn five_years_back(today: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(today.year() - 5, 1, 1).unwrap_or(today)
}

/// Series info plus data points since [`five_years_back`] for comma-separated
/// vector ids.
pub fn inspect_statcan(
    fetcher: &Fetcher,
    settings: &Settings,
    input: &str,
    today: NaiveDate,
) -> Result<Inspection, ExploreError> {
    if input.is_empty() {
        return Err(InputError::NoVectorIds.into());
    }
    let ids = parse_vector_list(input).map_err(InputError::from)?;
    if ids.is_empty() {
        return Err(InputError::NoValidVectorIds.into());
    }

    let statcan = StatCan::with_base_url(fetcher, settings.statcan_base_url.as_str());
    let info = statcan.series_info(&ids)?;
    let points = statcan.data_from_vectors(&ids, Some(five_years_back(today)))?;

    let info_rows = providers::statcan::info_rows(&info);
    Ok(Inspection {
        meta: Table::from_rows(&info_rows),
        data: Table::from_records(&providers::statcan::data_point_records(&points)),
    })
}

/// Observations since [`five_years_back`] plus the series description,
/// transposed to field/value rows.
pub fn inspect_boc(
    fetcher: &Fetcher,
    settings: &Settings,
    input: &str,
    today: NaiveDate,
) -> Result<Inspection, ExploreError> {
    let series = input.trim();
    if series.is_empty() {
        return Err(InputError::NoSeriesName.into());
    }

    let boc = BankOfCanada::with_base_url(fetcher, settings.boc_base_url.as_str());
    let observations = boc.series_observations(series, Some(five_years_back(today)), None)?;
    let details = boc.series_details(series)?;

    Ok(Inspection {
        meta: Table::transposed(&providers::boc::series_metadata(&details)),
        data: Table::from_records(&providers::boc::observation_records(&observations, series)),
    })
}

/// Probe `{api_base_url}/health`.
///
/// Never fails: the JSON body on success, `{"status":"error","code":N}` for a
/// non-success status, `{"status":"error","message":...}` for anything else.
pub fn probe_api(fetcher: &Fetcher, api_base_url: &str) -> Value {
    let url = format!("{}/health", api_base_url.trim_end_matches('/'));
    match fetcher.get_json(&url, &[]) {
        Ok(body) => body,
        Err(FetchError::HttpStatus { status, .. }) => json!({"status": "error", "code": status}),
        Err(e) => json!({"status": "error", "message": e.to_string()}),
    }
}

/// True when a health payload reports `"status": "ok"`.
pub fn health_ok(health: &Value) -> bool {
    health.get("status").and_then(Value::as_str) == Some("ok")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn five_years_back_is_january_first() {
        assert_eq!(five_years_back(date(2026, 10, 19)), date(2021, 1, 1));
        assert_eq!(five_years_back(date(2024, 2, 29)), date(2019, 1, 1));
    }

    #[test]
    fn status_lines() {
        let prompt: ExploreError = InputError::NoVectorIds.into();
        assert_eq!(prompt.status_line(), "Please enter Vector IDs.");

        let none: ExploreError = InputError::NoValidVectorIds.into();
        assert_eq!(none.status_line(), "No valid Vector IDs found.");

        let bad: ExploreError = InputError::from(VectorIdError("x1".into())).into();
        assert!(bad.status_line().starts_with("Error: invalid vector id 'x1'"));

        let http: ExploreError = FetchError::HttpStatus {
            url: "https://x.test".into(),
            status: 404,
        }
        .into();
        assert_eq!(http.status_line(), "Error: HTTP 404 from https://x.test");
    }

    #[test]
    fn health_ok_reads_status() {
        assert!(health_ok(&json!({"status": "ok", "db": "connected"})));
        assert!(!health_ok(&json!({"status": "error", "code": 500})));
        assert!(!health_ok(&json!("ok")));
    }
}
