//! Provider-agnostic tabular view over rows.

use serde::Serialize;

use super::record::{Record, Row, Scalar};

/// Columns plus rows of cells, aligned to the columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Scalar>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table whose columns are the union of the rows' keys, in
    /// first-seen order. Missing cells are null.
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a Row>) -> Self {
        let rows: Vec<&Row> = rows.into_iter().collect();
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for key in row.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.to_string());
                }
            }
        }

        let cells = rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|c| row.get(c).cloned().unwrap_or(Scalar::Null))
                    .collect()
            })
            .collect();

        Self {
            columns,
            rows: cells,
        }
    }

    pub fn from_records(records: &[Record]) -> Self {
        Self::from_rows(records.iter().map(Record::row))
    }

    /// One row per field: a `field` / `value` table, for single-object metadata.
    pub fn transposed(row: &Row) -> Self {
        let mut table = Table::new(vec!["field".into(), "value".into()]);
        for (k, v) in row.iter() {
            table.rows.push(vec![Scalar::from(k), v.clone()]);
        }
        table
    }

    pub fn push_row(&mut self, row: Vec<Scalar>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Number of pages of `page_size` rows (at least one).
    pub fn page_count(&self, page_size: usize) -> usize {
        if page_size == 0 {
            return 1;
        }
        self.rows.len().div_ceil(page_size).max(1)
    }

    /// Rows on the zero-based `page`. Out-of-range pages are empty.
    pub fn page(&self, page: usize, page_size: usize) -> &[Vec<Scalar>] {
        if page_size == 0 {
            return &self.rows;
        }
        let start = page.saturating_mul(page_size).min(self.rows.len());
        let end = start.saturating_add(page_size).min(self.rows.len());
        &self.rows[start..end]
    }

    /// Display width of each column: the longest of the header and its cells.
    pub fn column_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, c)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|s| s.to_string().chars().count())
                    .max()
                    .unwrap_or(0)
                    .max(c.chars().count())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        let mut r = Row::new();
        for (k, v) in pairs {
            r.insert(*k, *v);
        }
        r
    }

    #[test]
    fn columns_are_union_in_first_seen_order() {
        let a = row(&[("d", "2024-01-02"), ("x", "1")]);
        let b = row(&[("d", "2024-01-03"), ("y", "2")]);
        let table = Table::from_rows([&a, &b]);
        assert_eq!(table.columns, vec!["d", "x", "y"]);
        assert_eq!(table.rows[0][2], Scalar::Null);
        assert_eq!(table.rows[1][1], Scalar::Null);
        assert_eq!(table.rows[1][2], Scalar::from("2"));
    }

    #[test]
    fn transposed_metadata() {
        let meta = row(&[("label", "USD/CAD"), ("dimension", "d")]);
        let table = Table::transposed(&meta);
        assert_eq!(table.columns, vec!["field", "value"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0][0], Scalar::from("label"));
    }

    #[test]
    fn pagination() {
        let mut table = Table::new(vec!["n".into()]);
        for i in 0..25 {
            table.push_row(vec![Scalar::Number(i as f64)]);
        }
        assert_eq!(table.page_count(10), 3);
        assert_eq!(table.page(0, 10).len(), 10);
        assert_eq!(table.page(2, 10).len(), 5);
        assert!(table.page(3, 10).is_empty());
        assert_eq!(Table::default().page_count(10), 1);
    }

    #[test]
    fn widths_cover_header_and_cells() {
        let a = row(&[("id", "v41690973")]);
        let table = Table::from_rows([&a]);
        assert_eq!(table.column_widths(), vec![9]);
    }
}
