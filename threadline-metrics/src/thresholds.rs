//! Centralized tuning thresholds for tiering, size health, and narrative
//! callouts.
//!
//! These values are calibrated for a mass-retail apparel program (Walmart
//! workwear class). Changing a threshold here affects BOTH the classifier in
//! `threadline-pipeline/src/tiers.rs` and the callout rules in
//! `threadline-pipeline/src/insights.rs`.

// ---------------------------------------------------------------------------
// Tier banding (Pareto over cumulative YTD sales share)
// ---------------------------------------------------------------------------

/// SKUs inside this cumulative sales share band are tier A.
pub const TIER_A_CUMULATIVE_SHARE: f64 = 0.80;

/// SKUs between the A band and this cumulative share are tier B; the
/// remainder is tier C.
pub const TIER_B_CUMULATIVE_SHARE: f64 = 0.95;

// ---------------------------------------------------------------------------
// Size (Prime Item) health
// ---------------------------------------------------------------------------

/// A size with WOS above this is dead weight on the size curve.
pub const DEAD_SIZE_WOS: f64 = 30.0;

/// A size is productive when it has positive sales and WOS below this.
pub const PRODUCTIVE_SIZE_WOS: f64 = 30.0;

/// Size curves with efficiency below this percentage get an optimization
/// recommendation.
pub const SIZE_EFFICIENCY_REVIEW_PCT: f64 = 70.0;

/// Dead-size count above which a size recommendation is high priority.
pub const HIGH_PRIORITY_DEAD_SIZES: usize = 3;

// ---------------------------------------------------------------------------
// Narrative callout rules
// ---------------------------------------------------------------------------

/// Sales YoY decline (percent) that opens an in-stock investigation when
/// on-hand has fallen even harder.
pub const IN_STOCK_SALES_DECLINE_PCT: f64 = -20.0;

/// On-hand YoY decline (percent) that confirms a stockout rather than a
/// demand problem.
pub const IN_STOCK_OH_DECLINE_PCT: f64 = -40.0;

/// On-hand YoY growth (percent) above which reorders should be throttled.
pub const OH_GROWTH_THROTTLE_PCT: f64 = 5.0;

/// Mean seasonal sell-through (percent) below which velocity needs a watch.
pub const SEASONAL_ST_FLOOR_PCT: f64 = 10.0;

/// Item sell-through (percent) above which allocation should be increased.
pub const DOUBLE_DOWN_ST_PCT: f64 = 15.0;

/// Sales YoY (percent) that reads as a strong week in the big picture line.
pub const STRONG_WEEK_SALES_YOY_PCT: f64 = 5.0;

/// Sales YoY (percent) that reads as an exceptional week.
pub const EXCEPTIONAL_WEEK_SALES_YOY_PCT: f64 = 10.0;

/// Sales YoY (percent) below which the big picture line flags a dig-in.
pub const WEAK_WEEK_SALES_YOY_PCT: f64 = -10.0;
