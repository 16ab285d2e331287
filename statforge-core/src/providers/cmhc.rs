//! CMHC extractor: direct CSV downloads from the housing market portal.

use log::error;
use serde::Serialize;

use crate::domain::{Record, Row, Scalar, Table};
use crate::error::FetchError;
use crate::http::{Fetcher, DOWNLOAD_TIMEOUT};

/// A parsed CSV document: header row plus string cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// One tagged record per CSV row, keyed by header.
    pub fn records(&self) -> Vec<Record> {
        self.rows
            .iter()
            .map(|cells| {
                let mut row = Row::new();
                for (header, cell) in self.headers.iter().zip(cells) {
                    row.insert(header.clone(), cell.as_str());
                }
                Record::Cmhc { row }
            })
            .collect()
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new(self.headers.clone());
        for cells in &self.rows {
            table.push_row(cells.iter().map(|c| Scalar::from(c.as_str())).collect());
        }
        table
    }
}

pub struct Cmhc<'a> {
    fetcher: &'a Fetcher,
}

impl<'a> Cmhc<'a> {
    pub fn new(fetcher: &'a Fetcher) -> Self {
        Self { fetcher }
    }

    /// Download a CSV through the retrying fetcher and parse it.
    ///
    /// Download and parse failures are logged, then returned as distinct
    /// errors: transport/HTTP variants for the former, `Parse` for the latter.
    pub fn download_csv(&self, url: &str) -> Result<CsvTable, FetchError> {
        let body = self.fetcher.get_bytes(url, DOWNLOAD_TIMEOUT).map_err(|e| {
            error!("Error downloading CSV from {url}: {e}");
            e
        })?;

        parse_csv(url, &body).map_err(|e| {
            error!("Error parsing CSV from {url}: {e}");
            e
        })
    }
}

/// Parse a CSV body with a header row. Ragged rows, a missing header and
/// fields that are not valid UTF-8 are errors.
pub fn parse_csv(url: &str, data: impl AsRef<[u8]>) -> Result<CsvTable, FetchError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(data.as_ref());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| FetchError::parse(url, e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(FetchError::parse(url, "no columns to parse"));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| FetchError::parse(url, e.to_string()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(CsvTable { headers, rows })
}
