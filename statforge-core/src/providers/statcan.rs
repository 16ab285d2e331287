//! Statistics Canada Web Data Service (WDS) extractor.
//!
//! Both bulk endpoints answer with one envelope per requested vector:
//! `[{"status": "SUCCESS", "object": {...}}, {"status": "FAILED", ...}]`.
//! Failed envelopes are logged and dropped; a partially failed batch still
//! returns the successful objects.

use chrono::NaiveDate;
use log::warn;
use serde::Serialize;
use serde_json::Value;

use crate::domain::{Record, Row, Scalar};
use crate::error::FetchError;
use crate::http::Fetcher;

use super::vector_id::VectorId;

pub const STATCAN_API_URL: &str = "https://www150.statcan.gc.ca/t1/wds/rest";

/// Start of the reference period when the caller gives none.
pub const DEFAULT_START: &str = "2000-01-01";

/// Open-ended end of the reference period.
pub const OPEN_END: &str = "2099-12-31";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SeriesInfoRequest {
    vector_id: VectorId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PeriodRangeRequest {
    vector_id: VectorId,
    start_reference_period: String,
    end_reference_period: String,
}

pub struct StatCan<'a> {
    fetcher: &'a Fetcher,
    base_url: String,
}

impl<'a> StatCan<'a> {
    pub fn new(fetcher: &'a Fetcher) -> Self {
        Self::with_base_url(fetcher, STATCAN_API_URL)
    }

    pub fn with_base_url(fetcher: &'a Fetcher, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Metadata (title, frequency, scalar factor, ...) for each vector.
    /// Endpoint: `getSeriesInfoFromVector`.
    pub fn series_info(&self, vector_ids: &[VectorId]) -> Result<Vec<Value>, FetchError> {
        let url = format!("{}/getSeriesInfoFromVector", self.base_url);
        let payload: Vec<SeriesInfoRequest> = vector_ids
            .iter()
            .map(|&vector_id| SeriesInfoRequest { vector_id })
            .collect();

        let data = self.fetcher.post_json(&url, to_body(&url, &payload)?)?;
        keep_successful(&url, data, "info")
    }

    /// Data points for each vector from `start` (default 2000-01-01) onward.
    /// Endpoint: `getDataFromVectorByReferencePeriodRange`.
    pub fn data_from_vectors(
        &self,
        vector_ids: &[VectorId],
        start: Option<NaiveDate>,
    ) -> Result<Vec<Value>, FetchError> {
        let url = format!("{}/getDataFromVectorByReferencePeriodRange", self.base_url);
        let start = start
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| DEFAULT_START.to_string());

        let payload: Vec<PeriodRangeRequest> = vector_ids
            .iter()
            .map(|&vector_id| PeriodRangeRequest {
                vector_id,
                start_reference_period: start.clone(),
                end_reference_period: OPEN_END.to_string(),
            })
            .collect();

        let data = self.fetcher.post_json(&url, to_body(&url, &payload)?)?;
        keep_successful(&url, data, "data")
    }
}

fn to_body<T: Serialize>(url: &str, payload: &T) -> Result<Value, FetchError> {
    serde_json::to_value(payload).map_err(|e| FetchError::parse(url, e.to_string()))
}

/// Keep the `object` of every `SUCCESS` envelope, warn about the rest.
///
/// A response that is not a list at all is a parse error; individual failed
/// envelopes never are.
pub fn keep_successful(url: &str, data: Value, what: &str) -> Result<Vec<Value>, FetchError> {
    let Value::Array(envelopes) = data else {
        return Err(FetchError::parse(url, "expected a list of envelopes"));
    };

    let mut results = Vec::with_capacity(envelopes.len());
    for mut item in envelopes {
        if item.get("status").and_then(Value::as_str) == Some("SUCCESS") {
            if let Some(object) = item.get_mut("object") {
                results.push(object.take());
                continue;
            }
        }
        warn!("Failed to fetch {what} for vector: {item}");
    }
    Ok(results)
}

/// Metadata objects as rows.
pub fn info_rows(objects: &[Value]) -> Vec<Row> {
    objects.iter().map(Row::from_json).collect()
}

/// Flatten each object's nested `vectorDataPoint` list into records, one per
/// data point, each carrying its `vectorId`.
pub fn data_point_records(objects: &[Value]) -> Vec<Record> {
    let mut records = Vec::new();
    for series in objects {
        let vector_id = series.get("vectorId").map(Scalar::from).unwrap_or(Scalar::Null);
        let Some(points) = series.get("vectorDataPoint").and_then(Value::as_array) else {
            continue;
        };
        for point in points {
            let mut row = Row::from_json(point);
            row.insert("vectorId", vector_id.clone());
            records.push(Record::StatCan {
                vector_id: vector_id.to_string(),
                row,
            });
        }
    }
    records
}
