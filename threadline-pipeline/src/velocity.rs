//! Size-level (Prime Item) velocity records.
//!
//! The velocity export is one row per item x size. Each row maps to its
//! parent style/color through a vendor category field; the parsed records
//! are grouped by that key for the enrichment stage. The export does not
//! carry on-hand units directly — they are derived from inventory retail
//! dollars and average retail.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::EtlResult;
use crate::schema::VelocityColumns;
use crate::table::Table;
use threadline_metrics::{coerce_float, coerce_int, weeks_of_supply};

/// One size-level record, owned by its parent style/color SKU.
#[derive(Clone, Debug, Serialize)]
pub struct SizeRecord {
    pub prime_item: String,
    pub size: String,
    pub item_status: String,
    pub lw_pos_qty: f64,
    pub lw_inv_units: f64,
    pub lw_inv_retail: f64,
    pub wos: f64,
    pub curr_valid_stores: u32,
    pub unit_retail: f64,
    pub unit_cost: f64,
}

impl SizeRecord {
    /// "A" in the item-status column means the size is active at retail.
    pub fn is_active(&self) -> bool {
        self.item_status == "A"
    }
}

/// Parse the velocity table into size records grouped by style/color.
///
/// The style/color column is required (it is the grouping key); measure and
/// attribute columns tolerate absence and coerce per cell, since a malformed
/// size row must never fail the run.
pub fn size_records_by_style(
    table: &Table,
    columns: &VelocityColumns,
) -> EtlResult<HashMap<String, Vec<SizeRecord>>> {
    let key_col = table.require_column(&columns.style_color)?;
    let prime_item = table.column(&columns.prime_item);
    let size = table.column(&columns.size);
    let item_status = table.column(&columns.item_status);
    let lw_pos_qty = table.column(&columns.lw_pos_qty);
    let lw_inv_retail = table.column(&columns.lw_inv_retail);
    let lw_avg_retail = table.column(&columns.lw_avg_retail);
    let valid_stores = table.column(&columns.valid_stores);
    let unit_retail = table.column(&columns.unit_retail);
    let unit_cost = table.column(&columns.unit_cost);

    let text = |row: usize, col: Option<usize>| -> String {
        col.and_then(|c| table.cell(row, c))
            .unwrap_or_default()
            .to_string()
    };
    let number =
        |row: usize, col: Option<usize>| -> f64 { coerce_float(col.and_then(|c| table.cell(row, c)), 0.0) };

    let mut by_style: HashMap<String, Vec<SizeRecord>> = HashMap::new();
    for row in table.row_indexes() {
        let style_color = match table.cell(row, key_col) {
            Some(k) => k.to_string(),
            None => continue,
        };

        let pos_qty = number(row, lw_pos_qty);
        let inv_retail = number(row, lw_inv_retail);
        let avg_retail = number(row, lw_avg_retail);

        // On-hand units derived from retail dollars; zero average retail
        // means the units cannot be derived and read as zero.
        let inv_units = if avg_retail > 0.0 {
            inv_retail / avg_retail
        } else {
            0.0
        };

        by_style.entry(style_color).or_default().push(SizeRecord {
            prime_item: text(row, prime_item),
            size: text(row, size),
            item_status: text(row, item_status),
            lw_pos_qty: pos_qty,
            lw_inv_units: inv_units,
            lw_inv_retail: inv_retail,
            wos: weeks_of_supply(inv_units, pos_qty),
            curr_valid_stores: coerce_int(
                valid_stores.and_then(|c| table.cell(row, c)),
                0,
            )
            .max(0) as u32,
            unit_retail: number(row, unit_retail),
            unit_cost: number(row, unit_cost),
        });
    }
    Ok(by_style)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn velocity_table(rows: Vec<Vec<String>>) -> Table {
        Table::new(
            "velocity",
            vec![
                "Vndr Category 2".into(),
                "Prime Item Nbr".into(),
                "Prime Size Description".into(),
                "Item Status".into(),
                "LW POS Qty".into(),
                "Total LW Str Inv Retail".into(),
                "LW Avg Retail".into(),
                "Curr Valid Stores".into(),
                "Unit Retail".into(),
                "Unit Cost".into(),
            ],
            rows,
        )
    }

    fn size_row(style: &str, size: &str, qty: &str, inv_retail: &str, avg_retail: &str) -> Vec<String> {
        vec![
            style.into(),
            "574680967".into(),
            size.into(),
            "A".into(),
            qty.into(),
            inv_retail.into(),
            avg_retail.into(),
            "3200".into(),
            "24.98".into(),
            "14.50".into(),
        ]
    }

    #[test]
    fn derives_units_and_wos_from_retail() {
        let table = velocity_table(vec![size_row("EU1939RBD", "32X32", "40", "2498.00", "24.98")]);
        let map = size_records_by_style(&table, &VelocityColumns::default()).unwrap();
        let records = map.get("EU1939RBD").unwrap();
        assert_eq!(records.len(), 1);
        assert!((records[0].lw_inv_units - 100.0).abs() < 1e-9);
        assert!((records[0].wos - 2.5).abs() < 1e-9);
        assert_eq!(records[0].curr_valid_stores, 3200);
        assert!(records[0].is_active());
    }

    #[test]
    fn zero_avg_retail_reads_as_zero_units() {
        let table = velocity_table(vec![size_row("EU1939RBD", "34X32", "10", "500.00", "0")]);
        let map = size_records_by_style(&table, &VelocityColumns::default()).unwrap();
        let record = &map.get("EU1939RBD").unwrap()[0];
        assert_eq!(record.lw_inv_units, 0.0);
        assert_eq!(record.wos, 0.0);
    }

    #[test]
    fn blank_style_rows_are_dropped() {
        let table = velocity_table(vec![
            size_row("", "32X32", "10", "100", "10"),
            size_row("EU1939KH", "32X32", "10", "100", "10"),
        ]);
        let map = size_records_by_style(&table, &VelocityColumns::default()).unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn malformed_measures_coerce_not_fail() {
        let table = velocity_table(vec![size_row("EU1939KH", "36X32", "bad", "junk", "n/a")]);
        let map = size_records_by_style(&table, &VelocityColumns::default()).unwrap();
        let record = &map.get("EU1939KH").unwrap()[0];
        assert_eq!(record.lw_pos_qty, 0.0);
        assert_eq!(record.lw_inv_retail, 0.0);
        assert_eq!(record.wos, 0.0);
    }
}
