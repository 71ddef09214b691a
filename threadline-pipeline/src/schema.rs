//! Per-source column schemas.
//!
//! The exact header names are a compatibility surface with the upstream
//! report templates, so they are configuration values with report-template
//! defaults, not hardcoded literals scattered through the builders. Each
//! source is validated once, up front, so every downstream stage can assume
//! the required columns exist.

use crate::error::EtlResult;
use crate::table::Table;
use threadline_metrics::coerce_float;

/// Column names for the store-level POS export (store x week grain).
#[derive(Clone, Debug)]
pub struct PosColumns {
    pub style_color: String,
    pub fineline: String,
    pub sales_units_lw: String,
    pub sales_units_lwly: String,
    pub sales_dollars_lw: String,
    pub sales_dollars_lwly: String,
    pub inventory_units_lw: String,
    pub inventory_dollars_lw: String,
    pub sales_units_ytd: String,
    pub sales_dollars_ytd: String,
}

impl Default for PosColumns {
    fn default() -> Self {
        Self {
            style_color: "WD Style/Color".into(),
            fineline: "Fineline".into(),
            sales_units_lw: "Sales Units LW".into(),
            sales_units_lwly: "Sales Units LWLY".into(),
            sales_dollars_lw: "Sales Retail $ LW".into(),
            sales_dollars_lwly: "Sales Retail $ LWLY".into(),
            inventory_units_lw: "Store On Hand Units LW".into(),
            inventory_dollars_lw: "Store On Hand Retail LW".into(),
            sales_units_ytd: "Sales Units 2025YTD".into(),
            sales_dollars_ytd: "Sales Retail $ 2025YTD".into(),
        }
    }
}

impl PosColumns {
    /// All column names this schema requires of the POS table.
    pub fn required(&self) -> [&str; 10] {
        [
            &self.style_color,
            &self.fineline,
            &self.sales_units_lw,
            &self.sales_units_lwly,
            &self.sales_dollars_lw,
            &self.sales_dollars_lwly,
            &self.inventory_units_lw,
            &self.inventory_dollars_lw,
            &self.sales_units_ytd,
            &self.sales_dollars_ytd,
        ]
    }

    /// Validate that every required column is present. Loud on the first
    /// missing one; runs before any aggregation so a schema drift upstream
    /// can never emit plausible-looking but wrong aggregates.
    pub fn validate(&self, table: &Table) -> EtlResult<()> {
        for column in self.required() {
            table.require_column(column)?;
        }
        Ok(())
    }
}

/// Column names for the item-ladder export (item grain, descriptive
/// attributes).
#[derive(Clone, Debug)]
pub struct LadderColumns {
    pub style_color: String,
    pub fineline: String,
    pub description: String,
    pub color: String,
    pub gender: String,
    pub category: String,
    pub sub_category: String,
    pub aur_ty: String,
    pub aur_ly: String,
}

impl Default for LadderColumns {
    fn default() -> Self {
        Self {
            style_color: "WD Style/Color".into(),
            fineline: "Fineline".into(),
            description: "Item Description".into(),
            color: "Color".into(),
            gender: "Gender".into(),
            category: "Category".into(),
            sub_category: "Sub Category".into(),
            aur_ty: "AUR TY".into(),
            aur_ly: "AUR LY".into(),
        }
    }
}

/// Descriptive attributes for one style/color, pulled from the ladder.
#[derive(Clone, Debug, Default)]
pub struct LadderRow {
    pub fineline: String,
    pub description: String,
    pub color: String,
    pub gender: String,
    pub category: String,
    pub sub_category: String,
    pub aur_ty: f64,
    pub aur_ly: f64,
}

impl LadderColumns {
    /// Extract typed ladder rows keyed by style/color.
    ///
    /// The key column is required; attribute columns are tolerated when
    /// absent (ladder exports vary week to week) and default per field.
    /// Rows with a blank key are dropped. Later duplicates of a key win,
    /// matching the left-join semantics of the upstream report.
    pub fn extract(
        &self,
        table: &Table,
    ) -> EtlResult<std::collections::HashMap<String, LadderRow>> {
        let key_col = table.require_column(&self.style_color)?;
        let fineline = table.column(&self.fineline);
        let description = table.column(&self.description);
        let color = table.column(&self.color);
        let gender = table.column(&self.gender);
        let category = table.column(&self.category);
        let sub_category = table.column(&self.sub_category);
        let aur_ty = table.column(&self.aur_ty);
        let aur_ly = table.column(&self.aur_ly);

        let text = |row: usize, col: Option<usize>| -> String {
            col.and_then(|c| table.cell(row, c))
                .unwrap_or_default()
                .to_string()
        };
        let number = |row: usize, col: Option<usize>| -> f64 {
            coerce_float(col.and_then(|c| table.cell(row, c)), 0.0)
        };

        let mut map = std::collections::HashMap::new();
        for row in table.row_indexes() {
            let key = match table.cell(row, key_col) {
                Some(k) => k.to_string(),
                None => continue,
            };
            map.insert(
                key,
                LadderRow {
                    fineline: text(row, fineline),
                    description: text(row, description),
                    color: text(row, color),
                    gender: text(row, gender),
                    category: text(row, category),
                    sub_category: text(row, sub_category),
                    aur_ty: number(row, aur_ty),
                    aur_ly: number(row, aur_ly),
                },
            );
        }
        Ok(map)
    }
}

/// Column names for the velocity export (item x size grain).
#[derive(Clone, Debug)]
pub struct VelocityColumns {
    /// The style/color code rides in a vendor category field.
    pub style_color: String,
    pub prime_item: String,
    pub size: String,
    pub item_status: String,
    pub lw_pos_qty: String,
    pub lw_inv_retail: String,
    pub lw_avg_retail: String,
    pub valid_stores: String,
    pub unit_retail: String,
    pub unit_cost: String,
}

impl Default for VelocityColumns {
    fn default() -> Self {
        Self {
            style_color: "Vndr Category 2".into(),
            prime_item: "Prime Item Nbr".into(),
            size: "Prime Size Description".into(),
            item_status: "Item Status".into(),
            lw_pos_qty: "LW POS Qty".into(),
            lw_inv_retail: "Total LW Str Inv Retail".into(),
            lw_avg_retail: "LW Avg Retail".into(),
            valid_stores: "Curr Valid Stores".into(),
            unit_retail: "Unit Retail".into(),
            unit_cost: "Unit Cost".into(),
        }
    }
}

/// The full set of source schemas for one run.
#[derive(Clone, Debug, Default)]
pub struct SourceSchemas {
    pub pos: PosColumns,
    pub ladder: LadderColumns,
    pub velocity: VelocityColumns,
}
