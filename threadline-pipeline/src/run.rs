//! Pipeline orchestration.
//!
//! One run is a pure function of its input tables: validate, aggregate,
//! derive, enrich, narrate, then hand the whole artifact set back to the
//! caller to write. Validation happens before any derivation, so a schema
//! problem aborts with nothing emitted. The velocity table is the only
//! optional source; a run without it produces the same artifacts minus
//! size-level enrichment.

use std::path::Path;

use crate::artifacts::{
    load_optional_list, ArtifactSet, Meta, MetaMetrics, SourceFiles, ACTION_ITEMS_FILE,
    SEASONAL_RISK_FILE,
};
use crate::error::{EtlError, EtlResult};
use crate::fineline::build_fineline_rollup;
use crate::insights::{generate_weekly_insights, StyleWeek};
use crate::schema::SourceSchemas;
use crate::size_analysis::{enrich, size_recommendations};
use crate::sku::{aggregate_pos, build_sku_master, SkuRecord};
use crate::summary::build_weekly_summary;
use crate::table::Table;
use crate::tiers::TierBook;
use crate::velocity::size_records_by_style;
use threadline_metrics::sell_through;

/// Everything one pipeline run consumes.
#[derive(Debug)]
pub struct RunInputs {
    pub pos: Table,
    pub ladder: Table,
    /// Size-level velocity detail; absent runs skip enrichment.
    pub velocity: Option<Table>,
    pub schemas: SourceSchemas,
    /// Fiscal week number, carried into the insights artifact.
    pub week: u32,
    pub source_files: SourceFiles,
}

/// Execute the full pipeline. Returns the complete artifact set; nothing is
/// written to disk here, so a failed run can never leave partial output.
pub fn run(inputs: &RunInputs, aux_dir: Option<&Path>) -> EtlResult<ArtifactSet> {
    // Validate before deriving anything.
    inputs.schemas.pos.validate(&inputs.pos)?;
    if inputs.pos.row_count() == 0 {
        return Err(EtlError::EmptyTable {
            table: inputs.pos.name().to_string(),
        });
    }

    let ladder = inputs.schemas.ladder.extract(&inputs.ladder)?;

    let sums = aggregate_pos(&inputs.pos, &inputs.schemas.pos)?;
    let tiers = TierBook::from_population(
        sums.iter().map(|s| (s.sku.clone(), s.sales_dollars_ytd)),
    );
    let mut sku_master = build_sku_master(sums, &ladder, &tiers);

    if let Some(velocity) = &inputs.velocity {
        let sizes = size_records_by_style(velocity, &inputs.schemas.velocity)?;
        enrich(&mut sku_master, &sizes);
        log::info!("Size enrichment applied to {} styles", sizes.len());
    } else {
        log::info!("No velocity source, skipping size enrichment");
    }

    let fineline_rollup = build_fineline_rollup(&inputs.pos, &inputs.schemas.pos)?;
    let weekly_summary = build_weekly_summary(&inputs.pos, &inputs.schemas.pos)?;
    let recommendations = size_recommendations(&sku_master);

    let (current, last_year) = style_weeks(&sku_master);
    let insights = generate_weekly_insights(&current, &last_year, inputs.week);

    let (seasonal_risk, action_items) = match aux_dir {
        Some(dir) => (
            load_optional_list(&dir.join(SEASONAL_RISK_FILE)),
            load_optional_list(&dir.join(ACTION_ITEMS_FILE)),
        ),
        None => (Vec::new(), Vec::new()),
    };

    let meta = Meta {
        generated_at: chrono::Utc::now().to_rfc3339(),
        week: inputs.week,
        source_files: inputs.source_files.clone(),
        metrics: MetaMetrics {
            sku_count: sku_master.len(),
            tier_a_count: tiers.a_count(),
            tier_b_count: tiers.b_count(),
            tier_c_count: tiers.c_count(),
            fineline_count: fineline_rollup.len(),
            size_recommendation_count: recommendations.len(),
            total_sales_dollars_lw: weekly_summary.sales_dollars_lw,
            wos: weekly_summary.wos,
        },
    };

    Ok(ArtifactSet {
        sku_master,
        fineline_rollup,
        weekly_summary,
        size_recommendations: recommendations,
        seasonal_risk,
        action_items,
        insights,
        meta,
    })
}

/// Project the SKU master into current-week and year-ago style rows for the
/// insight rules.
///
/// The POS export carries year-ago sales but not year-ago on-hand, so the
/// LY rows reuse current on-hand. Rules gated on OH YoY therefore read a
/// flat on-hand position and stay quiet rather than firing on fabricated
/// data.
fn style_weeks(sku_master: &[SkuRecord]) -> (Vec<StyleWeek>, Vec<StyleWeek>) {
    let current = sku_master
        .iter()
        .map(|s| StyleWeek {
            style_color: s.sku.clone(),
            category: s.category.clone(),
            sales_dollars: s.sales_dollars_lw,
            sales_units: s.sales_units_lw,
            on_hand_units: s.inventory_units_lw,
            sell_through_pct: s.sell_through_ty,
            avg_retail: s.aur_ty,
        })
        .collect();
    let last_year = sku_master
        .iter()
        .map(|s| StyleWeek {
            style_color: s.sku.clone(),
            category: s.category.clone(),
            sales_dollars: s.sales_dollars_lwly,
            sales_units: s.sales_units_lwly,
            on_hand_units: s.inventory_units_lw,
            sell_through_pct: sell_through(
                s.sales_units_lwly,
                s.sales_units_lwly + s.inventory_units_lw,
            ),
            avg_retail: s.aur_ly,
        })
        .collect();
    (current, last_year)
}
