//! Company-wide weekly sales summary.
//!
//! One singleton record per run: totals of the additive measures across the
//! whole POS table, simple year-over-year deltas, and overall WOS.
//! Overwritten each run — latest JSON wins.

use serde::Serialize;

use crate::error::EtlResult;
use crate::rollup::column_total;
use crate::schema::PosColumns;
use crate::table::Table;
use threadline_metrics::{percent_change, weeks_of_supply};

#[derive(Clone, Debug, Serialize)]
pub struct WeeklySummary {
    pub sales_units_lw: f64,
    pub sales_units_lwly: f64,
    pub sales_dollars_lw: f64,
    pub sales_dollars_lwly: f64,
    pub inventory_units_lw: f64,
    pub inventory_dollars_lw: f64,
    pub units_delta: f64,
    pub dollars_delta: f64,
    pub units_pct_delta: f64,
    pub dollars_pct_delta: f64,
    pub wos: f64,
}

/// Build the top-line weekly summary from the POS table.
pub fn build_weekly_summary(table: &Table, columns: &PosColumns) -> EtlResult<WeeklySummary> {
    let sales_units_lw = column_total(table, &columns.sales_units_lw)?;
    let sales_units_lwly = column_total(table, &columns.sales_units_lwly)?;
    let sales_dollars_lw = column_total(table, &columns.sales_dollars_lw)?;
    let sales_dollars_lwly = column_total(table, &columns.sales_dollars_lwly)?;
    let inventory_units_lw = column_total(table, &columns.inventory_units_lw)?;
    let inventory_dollars_lw = column_total(table, &columns.inventory_dollars_lw)?;

    Ok(WeeklySummary {
        sales_units_lw,
        sales_units_lwly,
        sales_dollars_lw,
        sales_dollars_lwly,
        inventory_units_lw,
        inventory_dollars_lw,
        units_delta: sales_units_lw - sales_units_lwly,
        dollars_delta: sales_dollars_lw - sales_dollars_lwly,
        units_pct_delta: percent_change(sales_units_lw, sales_units_lwly),
        dollars_pct_delta: percent_change(sales_dollars_lw, sales_dollars_lwly),
        wos: weeks_of_supply(inventory_units_lw, sales_units_lw),
    })
}
