//! Fineline rollup.
//!
//! Same additive measures as the SKU master, summed across every SKU in the
//! fineline, plus WOS computed the same way. Fineline-level tiering and
//! Pareto shares are intentionally out of scope.

use serde::Serialize;

use crate::error::EtlResult;
use crate::rollup::group_sum;
use crate::schema::PosColumns;
use crate::table::Table;
use threadline_metrics::weeks_of_supply;

#[derive(Clone, Debug, Serialize)]
pub struct FinelineRecord {
    pub fineline: String,
    pub sales_units_lw: f64,
    pub sales_units_lwly: f64,
    pub sales_dollars_lw: f64,
    pub sales_dollars_lwly: f64,
    pub inventory_units_lw: f64,
    pub inventory_dollars_lw: f64,
    pub sales_units_ytd: f64,
    pub sales_dollars_ytd: f64,
    pub wos: f64,
}

/// Roll the POS table up by fineline code.
pub fn build_fineline_rollup(table: &Table, columns: &PosColumns) -> EtlResult<Vec<FinelineRecord>> {
    let measures = [
        columns.sales_units_lw.as_str(),
        columns.sales_units_lwly.as_str(),
        columns.sales_dollars_lw.as_str(),
        columns.sales_dollars_lwly.as_str(),
        columns.inventory_units_lw.as_str(),
        columns.inventory_dollars_lw.as_str(),
        columns.sales_units_ytd.as_str(),
        columns.sales_dollars_ytd.as_str(),
    ];
    let grouped = group_sum(table, &columns.fineline, &measures)?;
    Ok(grouped
        .into_iter()
        .map(|row| FinelineRecord {
            fineline: row.key.clone(),
            sales_units_lw: row.sum(0),
            sales_units_lwly: row.sum(1),
            sales_dollars_lw: row.sum(2),
            sales_dollars_lwly: row.sum(3),
            inventory_units_lw: row.sum(4),
            inventory_dollars_lw: row.sum(5),
            sales_units_ytd: row.sum(6),
            sales_dollars_ytd: row.sum(7),
            wos: weeks_of_supply(row.sum(4), row.sum(0)),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos_table() -> Table {
        let columns = vec![
            "WD Style/Color".into(),
            "Fineline".into(),
            "Sales Units LW".into(),
            "Sales Units LWLY".into(),
            "Sales Retail $ LW".into(),
            "Sales Retail $ LWLY".into(),
            "Store On Hand Units LW".into(),
            "Store On Hand Retail LW".into(),
            "Sales Units 2025YTD".into(),
            "Sales Retail $ 2025YTD".into(),
        ];
        let row = |sku: &str, fineline: &str, units: &str, oh: &str| -> Vec<String> {
            vec![
                sku.into(),
                fineline.into(),
                units.into(),
                "0".into(),
                "0".into(),
                "0".into(),
                oh.into(),
                "0".into(),
                "0".into(),
                "0".into(),
            ]
        };
        Table::new(
            "POS",
            columns,
            vec![
                row("11874BK", "9100", "20", "100"),
                row("11874KH", "9100", "30", "100"),
                row("EU1939RBD", "9105", "0", "50"),
            ],
        )
    }

    #[test]
    fn rolls_up_across_skus_in_a_fineline() {
        let rollup = build_fineline_rollup(&pos_table(), &PosColumns::default()).unwrap();
        assert_eq!(rollup.len(), 2);
        let fl_9100 = rollup.iter().find(|f| f.fineline == "9100").unwrap();
        assert_eq!(fl_9100.sales_units_lw, 50.0);
        assert_eq!(fl_9100.inventory_units_lw, 200.0);
        assert_eq!(fl_9100.wos, 4.0);
    }

    #[test]
    fn zero_sales_fineline_has_zero_wos() {
        let rollup = build_fineline_rollup(&pos_table(), &PosColumns::default()).unwrap();
        let fl_9105 = rollup.iter().find(|f| f.fineline == "9105").unwrap();
        assert_eq!(fl_9105.wos, 0.0);
    }

    #[test]
    fn missing_required_column_aborts() {
        let table = Table::new("POS", vec!["Fineline".into()], vec![]);
        assert!(build_fineline_rollup(&table, &PosColumns::default()).is_err());
    }
}
