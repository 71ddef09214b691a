//! Derived retail KPI math for the Threadline weekly dashboard pipeline.
//!
//! Everything in this crate is a pure, total function over already-aggregated
//! sums: no I/O, no table access, no run state. The pipeline crate aggregates
//! rows and then calls into here for weeks-of-supply, sell-through,
//! year-over-year deltas, and Pareto share math.

pub mod calc;
pub mod coerce;
pub mod thresholds;

pub use calc::{cumulative_shares, percent_change, sell_through, share, weeks_of_supply};
pub use coerce::{coerce_float, coerce_int};
