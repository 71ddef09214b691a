//! Derived KPI calculators.
//!
//! Each function is independent and total: edge inputs (zero priors, zero
//! denominators, empty populations) produce a defined fallback value rather
//! than an error. These are the only formulas in the system; the pipeline
//! builders never inline their own division.

/// Floor applied to weekly sales units when dividing for weeks-of-supply.
pub const WOS_EPSILON: f64 = 0.0001;

/// Year-over-year percent change: `(current - prior) / prior * 100`.
///
/// Returns `0.0` when `prior == 0` — a style with no LY history reads as
/// flat, not infinite growth.
pub fn percent_change(current: f64, prior: f64) -> f64 {
    if prior == 0.0 {
        return 0.0;
    }
    (current - prior) / prior * 100.0
}

/// Weeks of supply: on-hand units divided by weekly sales units.
///
/// Zero sales means the metric is undefined and reads as `0.0` rather than
/// blowing up to infinity; downstream dead-size logic handles the
/// zero-sales-with-inventory case separately.
pub fn weeks_of_supply(inventory_units: f64, sales_units: f64) -> f64 {
    if sales_units > 0.0 {
        inventory_units / sales_units.max(WOS_EPSILON)
    } else {
        0.0
    }
}

/// Sell-through percentage: `sold / total_available * 100`.
///
/// `total_available` is sold plus on-hand. Returns `0.0` when the
/// denominator is not positive.
pub fn sell_through(sold: f64, total_available: f64) -> f64 {
    if total_available > 0.0 {
        sold / total_available * 100.0
    } else {
        0.0
    }
}

/// Fraction of `whole` contributed by `part`, in `[0, 1]`.
///
/// Defined only when both are positive; otherwise `0.0`.
pub fn share(part: f64, whole: f64) -> f64 {
    if whole > 0.0 && part > 0.0 {
        part / whole
    } else {
        0.0
    }
}

/// Running cumulative share over a sequence already sorted descending.
///
/// The caller sorts once per run (descending by YTD sales dollars, stable);
/// this returns one cumulative fraction per element. When the total is not
/// positive, every entry is `0.0`. The last entry equals `1.0` within
/// floating tolerance whenever the total is positive.
pub fn cumulative_shares(parts_desc: &[f64]) -> Vec<f64> {
    let whole: f64 = parts_desc.iter().sum();
    if whole <= 0.0 {
        return vec![0.0; parts_desc.len()];
    }
    let mut running = 0.0;
    parts_desc
        .iter()
        .map(|p| {
            running += p;
            running / whole
        })
        .collect()
}
