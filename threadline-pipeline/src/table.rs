//! Flat tabular dataset with named columns.
//!
//! The upstream workbook-scanning heuristics live outside this system; what
//! arrives here is an already-flat CSV export, one per source. `Table` keeps
//! cells as raw strings — coercion to numbers happens at the point of
//! aggregation so that a junk cell in one measure never poisons a row.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::error::{EtlError, EtlResult};

/// An in-memory table: header names plus string cells.
#[derive(Clone, Debug)]
pub struct Table {
    /// Source name used in error messages ("POS", "ladder", "velocity").
    name: String,
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table directly from headers and rows. Used by tests and by
    /// callers that already hold parsed data.
    pub fn new<S: Into<String>>(name: S, columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let index = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        Self {
            name: name.into(),
            columns,
            index,
            rows,
        }
    }

    /// Load a table from a CSV reader. Headers are trimmed; so are cells.
    pub fn from_csv<S: Into<String>, R: Read>(name: S, reader: R) -> EtlResult<Self> {
        let name = name.into();
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let columns: Vec<String> = csv_reader
            .headers()
            .map_err(|e| EtlError::Csv {
                table: name.clone(),
                line: 1,
                message: e.to_string(),
            })?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for (line_num, record) in csv_reader.records().enumerate() {
            let record = record.map_err(|e| EtlError::Csv {
                table: name.clone(),
                line: line_num + 2,
                message: e.to_string(),
            })?;
            rows.push(record.iter().map(|c| c.to_string()).collect());
        }

        Ok(Self::new(name, columns, rows))
    }

    /// Load a table from a CSV file path.
    pub fn from_csv_path<S: Into<String>, P: AsRef<Path>>(name: S, path: P) -> EtlResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| EtlError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_csv(name, file)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Column index by name, if present.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Column index by name, or a loud `MissingColumn` error naming this
    /// table. A missing required column signals an upstream schema change
    /// and must never be silently defaulted.
    pub fn require_column(&self, name: &str) -> EtlResult<usize> {
        self.column(name).ok_or_else(|| EtlError::MissingColumn {
            table: self.name.clone(),
            column: name.to_string(),
        })
    }

    /// Raw cell value; `None` when the row is short or the cell is blank.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        let cell = self.rows.get(row)?.get(col)?.as_str();
        if cell.trim().is_empty() {
            None
        } else {
            Some(cell)
        }
    }

    /// Iterate row indexes. Kept as indexes so call sites can pull several
    /// columns from the same row.
    pub fn row_indexes(&self) -> std::ops::Range<usize> {
        0..self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
WD Style/Color,Fineline,Sales Units LW
EU1939RBD,9105,50
 EU1939KH ,9105,
,9105,12
";

    #[test]
    fn csv_headers_and_cells_are_trimmed() {
        let table = Table::from_csv("POS", SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column("WD Style/Color"), Some(0));
        assert_eq!(table.cell(1, 0), Some("EU1939KH"));
    }

    #[test]
    fn blank_cells_read_as_none() {
        let table = Table::from_csv("POS", SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(table.cell(1, 2), None);
        assert_eq!(table.cell(2, 0), None);
    }

    #[test]
    fn require_column_names_table_and_column() {
        let table = Table::from_csv("POS", SAMPLE_CSV.as_bytes()).unwrap();
        let err = table.require_column("Sales Retail $ LW").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Sales Retail $ LW"));
        assert!(message.contains("POS"));
    }
}
