//! Grouping and rollup engine.
//!
//! The central reusable aggregation: group a table by one key column and sum
//! a set of measure columns. Every rollup in the system (SKU master,
//! fineline, YTD joins) goes through here, so the edge policies live in one
//! place:
//!
//! - rows with a blank grouping key are excluded, never grouped under a
//!   null key;
//! - measure cells coerce through `coerce_float` (blank/junk -> 0.0);
//! - a missing key or measure column is a loud `MissingColumn` error;
//! - output is sorted by key, so shuffling input rows cannot change the
//!   result.

use std::collections::BTreeMap;

use crate::error::EtlResult;
use crate::table::Table;
use threadline_metrics::coerce_float;

/// One aggregated output row: the key plus one sum per requested measure,
/// in the order the measures were requested.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupedRow {
    pub key: String,
    pub sums: Vec<f64>,
}

impl GroupedRow {
    /// Sum for the measure at `index` (the position in the `measure_columns`
    /// slice passed to `group_sum`).
    pub fn sum(&self, index: usize) -> f64 {
        self.sums.get(index).copied().unwrap_or(0.0)
    }
}

/// Group `table` by `key_column`, summing each of `measure_columns`.
///
/// Returns one row per distinct key, sorted ascending by key.
pub fn group_sum(
    table: &Table,
    key_column: &str,
    measure_columns: &[&str],
) -> EtlResult<Vec<GroupedRow>> {
    let key_col = table.require_column(key_column)?;
    let measure_cols: Vec<usize> = measure_columns
        .iter()
        .map(|c| table.require_column(c))
        .collect::<EtlResult<_>>()?;

    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for row in table.row_indexes() {
        let key = match table.cell(row, key_col) {
            Some(k) => k.to_string(),
            None => continue,
        };
        let sums = groups
            .entry(key)
            .or_insert_with(|| vec![0.0; measure_cols.len()]);
        for (slot, &col) in measure_cols.iter().enumerate() {
            sums[slot] += coerce_float(table.cell(row, col), 0.0);
        }
    }

    Ok(groups
        .into_iter()
        .map(|(key, sums)| GroupedRow { key, sums })
        .collect())
}

/// Sum a single column across every row of the table, ignoring the grouping
/// key entirely. Used for the company-wide weekly totals.
pub fn column_total(table: &Table, column: &str) -> EtlResult<f64> {
    let col = table.require_column(column)?;
    Ok(table
        .row_indexes()
        .map(|row| coerce_float(table.cell(row, col), 0.0))
        .sum())
}
