//! SKU master builder.
//!
//! Joins the store-level POS rollup (LW and YTD), the ladder attributes, and
//! the per-run tier book into one record per style/color. Records are
//! emitted in descending YTD sales dollar order (stable, ties keep rollup
//! order) so the cumulative Pareto share is monotone and lands on 1.0 at the
//! tail whenever there are sales at all.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::EtlResult;
use crate::rollup::group_sum;
use crate::schema::{LadderRow, PosColumns};
use crate::size_analysis::SizeAnalysis;
use crate::table::Table;
use crate::tiers::{Tier, TierBook};
use crate::velocity::SizeRecord;
use threadline_metrics::{cumulative_shares, percent_change, sell_through, share, weeks_of_supply};

/// One row of the SKU master artifact.
#[derive(Clone, Debug, Serialize)]
pub struct SkuRecord {
    // Identity
    pub sku: String,
    pub fineline: String,
    pub description: String,
    pub color: String,
    pub gender: String,
    pub category: String,
    pub sub_category: String,

    // Price
    pub aur_ty: f64,
    pub aur_ly: f64,

    // YTD measures
    pub sales_units_ytd: f64,
    pub sales_dollars_ytd: f64,

    // Last-week measures (current and year-ago)
    pub sales_units_lw: f64,
    pub sales_units_lwly: f64,
    pub sales_dollars_lw: f64,
    pub sales_dollars_lwly: f64,
    pub inventory_units_lw: f64,
    pub inventory_dollars_lw: f64,

    // Performance
    pub sell_through_ty: f64,
    pub sell_through_ly: f64,
    pub st_change: f64,
    pub unit_pct_change: f64,
    pub dollar_pct_change: f64,
    pub wos: f64,
    pub tier: Tier,

    // Pareto shares
    pub sales_pct_of_total: f64,
    pub cumulative_sales_pct: f64,
    pub inventory_pct_of_total: f64,

    // Size enrichment (populated by `size_analysis::enrich`)
    pub store_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_analysis: Option<SizeAnalysis>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sizes: Vec<SizeRecord>,
}

impl Default for SkuRecord {
    fn default() -> Self {
        Self {
            sku: String::new(),
            fineline: String::new(),
            description: String::new(),
            color: String::new(),
            gender: String::new(),
            category: String::new(),
            sub_category: String::new(),
            aur_ty: 0.0,
            aur_ly: 0.0,
            sales_units_ytd: 0.0,
            sales_dollars_ytd: 0.0,
            sales_units_lw: 0.0,
            sales_units_lwly: 0.0,
            sales_dollars_lw: 0.0,
            sales_dollars_lwly: 0.0,
            inventory_units_lw: 0.0,
            inventory_dollars_lw: 0.0,
            sell_through_ty: 0.0,
            sell_through_ly: 0.0,
            st_change: 0.0,
            unit_pct_change: 0.0,
            dollar_pct_change: 0.0,
            wos: 0.0,
            tier: Tier::C,
            sales_pct_of_total: 0.0,
            cumulative_sales_pct: 0.0,
            inventory_pct_of_total: 0.0,
            store_count: 0,
            size_analysis: None,
            sizes: Vec::new(),
        }
    }
}

/// Per-SKU aggregated sums before derivation. Intermediate shape shared
/// with the tier book computation.
#[derive(Clone, Debug, Default)]
pub struct SkuSums {
    pub sku: String,
    pub sales_units_lw: f64,
    pub sales_units_lwly: f64,
    pub sales_dollars_lw: f64,
    pub sales_dollars_lwly: f64,
    pub inventory_units_lw: f64,
    pub inventory_dollars_lw: f64,
    pub sales_units_ytd: f64,
    pub sales_dollars_ytd: f64,
}

/// Aggregate the POS table to one sum-set per style/color.
pub fn aggregate_pos(table: &Table, columns: &PosColumns) -> EtlResult<Vec<SkuSums>> {
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
    let grouped = group_sum(table, &columns.style_color, &measures)?;
    Ok(grouped
        .into_iter()
        .map(|row| SkuSums {
            sku: row.key.clone(),
            sales_units_lw: row.sum(0),
            sales_units_lwly: row.sum(1),
            sales_dollars_lw: row.sum(2),
            sales_dollars_lwly: row.sum(3),
            inventory_units_lw: row.sum(4),
            inventory_dollars_lw: row.sum(5),
            sales_units_ytd: row.sum(6),
            sales_dollars_ytd: row.sum(7),
        })
        .collect())
}

/// Build the SKU master from aggregated sums, ladder attributes, and the
/// per-run tier book.
pub fn build_sku_master(
    mut sums: Vec<SkuSums>,
    ladder: &HashMap<String, LadderRow>,
    tiers: &TierBook,
) -> Vec<SkuRecord> {
    // Pareto order: descending YTD sales dollars, stable so ties keep the
    // rollup's key order.
    sums.sort_by(|a, b| {
        b.sales_dollars_ytd
            .partial_cmp(&a.sales_dollars_ytd)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let total_sales_ytd: f64 = sums.iter().map(|s| s.sales_dollars_ytd.max(0.0)).sum();
    let total_inventory_lw: f64 = sums.iter().map(|s| s.inventory_dollars_lw.max(0.0)).sum();

    let sales_desc: Vec<f64> = sums.iter().map(|s| s.sales_dollars_ytd.max(0.0)).collect();
    let cumulative = cumulative_shares(&sales_desc);

    sums.into_iter()
        .zip(cumulative)
        .map(|(s, cumulative_pct)| {
            let attrs = ladder.get(&s.sku).cloned().unwrap_or_default();

            let st_ty = sell_through(s.sales_units_lw, s.sales_units_lw + s.inventory_units_lw);
            // LY on-hand is not in the POS export, so LY sell-through is not
            // derivable at SKU grain and reads as zero.
            let st_ly = 0.0;

            SkuRecord {
                sku: s.sku.clone(),
                fineline: attrs.fineline,
                description: attrs.description,
                color: attrs.color,
                gender: attrs.gender,
                category: attrs.category,
                sub_category: attrs.sub_category,
                aur_ty: attrs.aur_ty,
                aur_ly: attrs.aur_ly,
                sales_units_ytd: s.sales_units_ytd,
                sales_dollars_ytd: s.sales_dollars_ytd,
                sales_units_lw: s.sales_units_lw,
                sales_units_lwly: s.sales_units_lwly,
                sales_dollars_lw: s.sales_dollars_lw,
                sales_dollars_lwly: s.sales_dollars_lwly,
                inventory_units_lw: s.inventory_units_lw,
                inventory_dollars_lw: s.inventory_dollars_lw,
                sell_through_ty: st_ty,
                sell_through_ly: st_ly,
                st_change: percent_change(st_ty, st_ly),
                unit_pct_change: percent_change(s.sales_units_lw, s.sales_units_lwly),
                dollar_pct_change: percent_change(s.sales_dollars_lw, s.sales_dollars_lwly),
                wos: weeks_of_supply(s.inventory_units_lw, s.sales_units_lw),
                tier: tiers.classify(&s.sku),
                sales_pct_of_total: share(s.sales_dollars_ytd, total_sales_ytd),
                cumulative_sales_pct: cumulative_pct,
                inventory_pct_of_total: share(s.inventory_dollars_lw, total_inventory_lw),
                store_count: 0,
                size_analysis: None,
                sizes: Vec::new(),
            }
        })
        .collect()
}
