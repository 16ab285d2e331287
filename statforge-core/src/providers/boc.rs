//! Bank of Canada Valet extractor.
//!
//! Example series: `FXUSDCAD` (USD to CAD daily exchange rate).
//! Valet observation cells are shaped `{"FXUSDCAD": {"v": "1.3456"}}`; the
//! record helpers flatten them to plain scalars.

use chrono::NaiveDate;
use serde_json::Value;

use crate::domain::{Record, Row, Scalar};
use crate::error::FetchError;
use crate::http::Fetcher;

pub const BOC_API_URL: &str = "https://www.bankofcanada.ca/valet";

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct BankOfCanada<'a> {
    fetcher: &'a Fetcher,
    base_url: String,
}

impl<'a> BankOfCanada<'a> {
    pub fn new(fetcher: &'a Fetcher) -> Self {
        Self::with_base_url(fetcher, BOC_API_URL)
    }

    pub fn with_base_url(fetcher: &'a Fetcher, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn observations_url(&self, series: &str) -> String {
        format!("{}/observations/{series}/json", self.base_url)
    }

    pub fn series_url(&self, series: &str) -> String {
        format!("{}/series/{series}/json", self.base_url)
    }

    /// Observations for a series, optionally bounded. Returns the raw Valet
    /// document; see [`observation_records`] to pull out the rows.
    pub fn series_observations(
        &self,
        series: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Value, FetchError> {
        let start = start.map(|d| d.format(DATE_FORMAT).to_string());
        let end = end.map(|d| d.format(DATE_FORMAT).to_string());

        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(s) = &start {
            params.push(("start_date", s.as_str()));
        }
        if let Some(e) = &end {
            params.push(("end_date", e.as_str()));
        }

        self.fetcher.get_json(&self.observations_url(series), &params)
    }

    /// Series metadata document (label, description, dimension).
    pub fn series_details(&self, series: &str) -> Result<Value, FetchError> {
        self.fetcher.get_json(&self.series_url(series), &[])
    }
}

/// Pull the `observations` list out of a Valet document. A document without
/// observations yields no records.
pub fn observation_records(raw: &Value, series: &str) -> Vec<Record> {
    raw.get("observations")
        .and_then(Value::as_array)
        .map(|obs| {
            obs.iter()
                .map(|o| Record::BankOfCanada {
                    series: series.to_string(),
                    row: flatten_observation(o),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// The `series` object of a details document as a row.
pub fn series_metadata(raw: &Value) -> Row {
    raw.get("series").map(Row::from_json).unwrap_or_default()
}

fn flatten_observation(obs: &Value) -> Row {
    let mut row = Row::new();
    if let Value::Object(map) = obs {
        for (key, cell) in map {
            let value = match cell.get("v") {
                Some(v) if cell.is_object() => Scalar::from(v),
                _ => Scalar::from(cell),
            };
            row.insert(key.clone(), value);
        }
    }
    row
}
