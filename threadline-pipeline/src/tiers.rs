//! A/B/C tier classification.
//!
//! Tiers are a Pareto banding over cumulative YTD sales share: the styles
//! that make up the top share band are A, the next band B, the tail C. The
//! book is computed fresh each run from the full SKU population and is
//! immutable afterwards, so tiering is reproducible for a given input
//! snapshot. A SKU absent from the book classifies as C — never leave a SKU
//! unclassified.

use std::collections::HashSet;

use serde::Serialize;
use threadline_metrics::thresholds::{TIER_A_CUMULATIVE_SHARE, TIER_B_CUMULATIVE_SHARE};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Tier {
    A,
    B,
    C,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::A => write!(f, "A"),
            Tier::B => write!(f, "B"),
            Tier::C => write!(f, "C"),
        }
    }
}

/// Immutable per-run tier lookup.
#[derive(Clone, Debug, Default)]
pub struct TierBook {
    a: HashSet<String>,
    b: HashSet<String>,
    c: HashSet<String>,
}

impl TierBook {
    /// Band the population by descending YTD sales dollars.
    ///
    /// A SKU is placed by the cumulative share *before* it is added, so the
    /// top seller is always tier A even when it alone exceeds the A band.
    /// With zero total sales there is nothing to rank and every SKU is C.
    pub fn from_population<I>(population: I) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let mut ranked: Vec<(String, f64)> = population.into_iter().collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let total: f64 = ranked.iter().map(|(_, sales)| sales.max(0.0)).sum();
        let mut book = Self::default();
        if total <= 0.0 {
            book.c = ranked.into_iter().map(|(key, _)| key).collect();
            return book;
        }

        let mut cumulative = 0.0;
        for (key, sales) in ranked {
            let share_before = cumulative / total;
            cumulative += sales.max(0.0);
            if share_before < TIER_A_CUMULATIVE_SHARE {
                book.a.insert(key);
            } else if share_before < TIER_B_CUMULATIVE_SHARE {
                book.b.insert(key);
            } else {
                book.c.insert(key);
            }
        }
        book
    }

    /// Classify a SKU key. Unknown keys default to C.
    pub fn classify(&self, sku: &str) -> Tier {
        if self.a.contains(sku) {
            Tier::A
        } else if self.b.contains(sku) {
            Tier::B
        } else {
            Tier::C
        }
    }

    pub fn a_count(&self) -> usize {
        self.a.len()
    }

    pub fn b_count(&self) -> usize {
        self.b.len()
    }

    pub fn c_count(&self) -> usize {
        self.c.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn population(entries: &[(&str, f64)]) -> Vec<(String, f64)> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn pareto_banding_splits_population() {
        // Total = 1000. Cumulative before each (desc): 0, 0.50, 0.80, 0.90, 0.96.
        let book = TierBook::from_population(population(&[
            ("S1", 500.0),
            ("S2", 300.0),
            ("S3", 100.0),
            ("S4", 60.0),
            ("S5", 40.0),
        ]));
        assert_eq!(book.classify("S1"), Tier::A);
        assert_eq!(book.classify("S2"), Tier::A);
        assert_eq!(book.classify("S3"), Tier::B);
        assert_eq!(book.classify("S4"), Tier::B);
        assert_eq!(book.classify("S5"), Tier::C);
        assert_eq!((book.a_count(), book.b_count(), book.c_count()), (2, 2, 1));
    }

    #[test]
    fn dominant_top_seller_is_still_tier_a() {
        let book = TierBook::from_population(population(&[("BIG", 950.0), ("SMALL", 50.0)]));
        assert_eq!(book.classify("BIG"), Tier::A);
        assert_eq!(book.classify("SMALL"), Tier::C);
    }

    #[test]
    fn zero_sales_population_is_all_c() {
        let book = TierBook::from_population(population(&[("S1", 0.0), ("S2", 0.0)]));
        assert_eq!(book.classify("S1"), Tier::C);
        assert_eq!(book.classify("S2"), Tier::C);
        assert_eq!(book.c_count(), 2);
    }

    #[test]
    fn unknown_sku_defaults_to_c() {
        let book = TierBook::from_population(population(&[("S1", 100.0)]));
        assert_eq!(book.classify("NEVER-SEEN"), Tier::C);
    }
}
