//! Weekly retail apparel ETL pipeline.
//!
//! Transforms three weekly CSV exports (store-level POS, item ladder,
//! size-level velocity) into the JSON artifacts behind the weekly
//! merchandising dashboard: a SKU master with derived KPIs and A/B/C
//! tiers, a fineline rollup, a company-wide summary, size-curve
//! recommendations, and a narrative insights block.
//!
//! Structural problems (missing required columns, unreadable files) abort
//! loudly before any artifact is written. Value-level problems (junk cells,
//! missing optional sources) degrade gracefully with a logged warning.

pub mod artifacts;
pub mod error;
pub mod fineline;
pub mod insights;
pub mod rollup;
pub mod run;
pub mod schema;
pub mod size_analysis;
pub mod sku;
pub mod summary;
pub mod table;
pub mod tiers;
pub mod velocity;

pub use artifacts::{ArtifactSet, Meta, SourceFiles};
pub use error::{EtlError, EtlResult};
pub use run::{run, RunInputs};
pub use schema::SourceSchemas;
pub use table::Table;
pub use tiers::{Tier, TierBook};
