//! Size-level enrichment of the SKU master.
//!
//! For each SKU, look up its size records by exact style/color match and
//! fold them into a size-analysis aggregate. A SKU without size detail is
//! valid, not an error: it keeps `store_count == 0` and carries no
//! size-analysis block. Store count uses max, not sum, across sizes — a
//! store shelves every size of a style, so summing would multiply-count the
//! same physical stores.

use std::collections::HashMap;

use serde::Serialize;

use crate::sku::SkuRecord;
use crate::velocity::SizeRecord;
use threadline_metrics::thresholds::{
    DEAD_SIZE_WOS, HIGH_PRIORITY_DEAD_SIZES, PRODUCTIVE_SIZE_WOS, SIZE_EFFICIENCY_REVIEW_PCT,
};

/// Aggregate view of a SKU's size curve.
#[derive(Clone, Debug, Serialize)]
pub struct SizeAnalysis {
    pub total_sizes: usize,
    pub active_sizes: usize,
    /// Max valid-store count across sizes (sizes share stores).
    pub store_count: u32,
    /// WOS stats over sizes with positive WOS only.
    pub avg_wos: f64,
    pub min_wos: f64,
    pub max_wos: f64,
    /// Positive sales and WOS below the productive ceiling.
    pub productive_sizes: usize,
    /// WOS above the dead ceiling, or zero sales sitting on inventory.
    pub dead_sizes: usize,
    pub size_efficiency_pct: f64,
}

impl SizeAnalysis {
    /// Fold a SKU's size records into the aggregate. Returns `None` for an
    /// empty slice — no size detail means no analysis block.
    pub fn from_sizes(sizes: &[SizeRecord]) -> Option<Self> {
        if sizes.is_empty() {
            return None;
        }

        let active_sizes = sizes.iter().filter(|s| s.is_active()).count();
        let store_count = sizes.iter().map(|s| s.curr_valid_stores).max().unwrap_or(0);

        let wos_values: Vec<f64> = sizes.iter().map(|s| s.wos).filter(|w| *w > 0.0).collect();
        let (avg_wos, min_wos, max_wos) = if wos_values.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            let sum: f64 = wos_values.iter().sum();
            (
                sum / wos_values.len() as f64,
                wos_values.iter().cloned().fold(f64::INFINITY, f64::min),
                wos_values.iter().cloned().fold(0.0, f64::max),
            )
        };

        let productive_sizes = sizes
            .iter()
            .filter(|s| s.lw_pos_qty > 0.0 && s.wos < PRODUCTIVE_SIZE_WOS)
            .count();
        let dead_sizes = sizes
            .iter()
            .filter(|s| s.wos > DEAD_SIZE_WOS || (s.lw_pos_qty == 0.0 && s.lw_inv_units > 0.0))
            .count();

        Some(Self {
            total_sizes: sizes.len(),
            active_sizes,
            store_count,
            avg_wos,
            min_wos,
            max_wos,
            productive_sizes,
            dead_sizes,
            size_efficiency_pct: productive_sizes as f64 / sizes.len() as f64 * 100.0,
        })
    }
}

/// Attach size analysis (and size records) to each SKU that has velocity
/// detail. Pure and total: no size row can fail a SKU.
pub fn enrich(sku_master: &mut [SkuRecord], sizes_by_style: &HashMap<String, Vec<SizeRecord>>) {
    for sku in sku_master.iter_mut() {
        sku.store_count = 0;
        if let Some(sizes) = sizes_by_style.get(&sku.sku) {
            if let Some(analysis) = SizeAnalysis::from_sizes(sizes) {
                sku.store_count = analysis.store_count;
                sku.size_analysis = Some(analysis);
                sku.sizes = sizes.clone();
            }
        }
    }
}

/// A size-curve optimization recommendation for the dashboard.
#[derive(Clone, Debug, Serialize)]
pub struct SizeRecommendation {
    pub sku: String,
    pub fineline: String,
    pub tier: crate::tiers::Tier,
    pub total_sizes: usize,
    pub dead_sizes: usize,
    pub size_efficiency_pct: f64,
    pub recommendation: String,
    pub priority: &'static str,
    pub expected_impact: &'static str,
}

/// Flag SKUs whose size curve is carrying dead sizes at low efficiency.
pub fn size_recommendations(sku_master: &[SkuRecord]) -> Vec<SizeRecommendation> {
    sku_master
        .iter()
        .filter_map(|sku| {
            let analysis = sku.size_analysis.as_ref()?;
            if analysis.dead_sizes == 0 || analysis.size_efficiency_pct >= SIZE_EFFICIENCY_REVIEW_PCT
            {
                return None;
            }
            Some(SizeRecommendation {
                sku: sku.sku.clone(),
                fineline: sku.fineline.clone(),
                tier: sku.tier,
                total_sizes: analysis.total_sizes,
                dead_sizes: analysis.dead_sizes,
                size_efficiency_pct: analysis.size_efficiency_pct,
                recommendation: format!(
                    "Optimize size curve - {} dead sizes out of {}",
                    analysis.dead_sizes, analysis.total_sizes
                ),
                priority: if analysis.dead_sizes > HIGH_PRIORITY_DEAD_SIZES {
                    "high"
                } else {
                    "medium"
                },
                expected_impact: "Reduce inventory bloat, improve WOS",
            })
        })
        .collect()
}
