//! JSON artifact emission.
//!
//! Every run produces the full artifact set in one directory. Artifacts are
//! only written after the whole pipeline has succeeded, so a failed run
//! leaves the previous run's files untouched rather than a partial mix.
//! Aux artifacts (seasonal risk, action items) are pass-through lists
//! produced upstream; a missing or unparseable aux file degrades to an
//! empty list with a warning, never an error.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::error::{EtlError, EtlResult};
use crate::fineline::FinelineRecord;
use crate::insights::WeeklyInsights;
use crate::size_analysis::SizeRecommendation;
use crate::sku::SkuRecord;
use crate::summary::WeeklySummary;

pub const SKU_MASTER_FILE: &str = "sku_master.json";
pub const FINELINE_ROLLUP_FILE: &str = "fineline_rollup.json";
pub const WEEKLY_SUMMARY_FILE: &str = "weekly_sales_summary.json";
pub const SIZE_RECOMMENDATIONS_FILE: &str = "size_recommendations.json";
pub const SEASONAL_RISK_FILE: &str = "seasonal_risk.json";
pub const ACTION_ITEMS_FILE: &str = "action_items.json";
pub const WEEKLY_INSIGHTS_FILE: &str = "weekly_insights.json";
pub const META_FILE: &str = "meta.json";

/// The complete output of one pipeline run, held in memory until
/// [`ArtifactSet::write_all`].
#[derive(Clone, Debug, Serialize)]
pub struct ArtifactSet {
    pub sku_master: Vec<SkuRecord>,
    pub fineline_rollup: Vec<FinelineRecord>,
    pub weekly_summary: WeeklySummary,
    pub size_recommendations: Vec<SizeRecommendation>,
    pub seasonal_risk: Vec<Value>,
    pub action_items: Vec<Value>,
    pub insights: WeeklyInsights,
    pub meta: Meta,
}

/// Run provenance and headline metrics, written alongside the data
/// artifacts so the dashboard can show freshness.
#[derive(Clone, Debug, Serialize)]
pub struct Meta {
    /// RFC 3339 timestamp of the run.
    pub generated_at: String,
    pub week: u32,
    pub source_files: SourceFiles,
    pub metrics: MetaMetrics,
}

#[derive(Clone, Debug, Serialize)]
pub struct SourceFiles {
    pub pos: String,
    pub ladder: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub velocity: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct MetaMetrics {
    pub sku_count: usize,
    pub tier_a_count: usize,
    pub tier_b_count: usize,
    pub tier_c_count: usize,
    pub fineline_count: usize,
    pub size_recommendation_count: usize,
    pub total_sales_dollars_lw: f64,
    pub wos: f64,
}

impl ArtifactSet {
    /// Write every artifact as pretty-printed JSON under `dir`, creating
    /// the directory if needed. Latest run wins.
    pub fn write_all(&self, dir: &Path) -> EtlResult<()> {
        fs::create_dir_all(dir).map_err(|source| EtlError::Io {
            path: dir.display().to_string(),
            source,
        })?;

        write_json(dir, SKU_MASTER_FILE, &self.sku_master)?;
        write_json(dir, FINELINE_ROLLUP_FILE, &self.fineline_rollup)?;
        write_json(dir, WEEKLY_SUMMARY_FILE, &self.weekly_summary)?;
        write_json(dir, SIZE_RECOMMENDATIONS_FILE, &self.size_recommendations)?;
        write_json(dir, SEASONAL_RISK_FILE, &self.seasonal_risk)?;
        write_json(dir, ACTION_ITEMS_FILE, &self.action_items)?;
        write_json(dir, WEEKLY_INSIGHTS_FILE, &self.insights)?;
        write_json(dir, META_FILE, &self.meta)?;

        log::info!(
            "Wrote {} SKUs, {} finelines, {} size recommendations to {}",
            self.sku_master.len(),
            self.fineline_rollup.len(),
            self.size_recommendations.len(),
            dir.display()
        );
        Ok(())
    }
}

fn write_json<T: Serialize>(dir: &Path, file: &str, value: &T) -> EtlResult<()> {
    let path = dir.join(file);
    let json = serde_json::to_string_pretty(value)?;
    fs::write(&path, json).map_err(|source| EtlError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Load an optional aux artifact (a JSON array) for pass-through.
///
/// Missing file, unreadable file, or a non-array payload all degrade to an
/// empty list with a warning.
pub fn load_optional_list(path: &Path) -> Vec<Value> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            log::warn!("Aux artifact {} not loaded: {}", path.display(), err);
            return Vec::new();
        }
    };
    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            log::warn!(
                "Aux artifact {} is not a JSON array, ignoring",
                path.display()
            );
            Vec::new()
        }
        Err(err) => {
            log::warn!("Aux artifact {} is not valid JSON: {}", path.display(), err);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("threadline-artifacts-{}", name));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_aux_file_degrades_to_empty() {
        let dir = temp_dir("missing-aux");
        assert!(load_optional_list(&dir.join("nope.json")).is_empty());
    }

    #[test]
    fn malformed_aux_file_degrades_to_empty() {
        let dir = temp_dir("bad-aux");
        let path = dir.join("seasonal_risk.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, "{{not json").unwrap();
        assert!(load_optional_list(&path).is_empty());
    }

    #[test]
    fn non_array_aux_payload_degrades_to_empty() {
        let dir = temp_dir("object-aux");
        let path = dir.join("action_items.json");
        fs::write(&path, r#"{"a": 1}"#).unwrap();
        assert!(load_optional_list(&path).is_empty());
    }

    #[test]
    fn aux_array_passes_through() {
        let dir = temp_dir("good-aux");
        let path = dir.join("action_items.json");
        fs::write(&path, r#"[{"priority": 1}, {"priority": 2}]"#).unwrap();
        let items = load_optional_list(&path);
        assert_eq!(items.len(), 2);
    }
}
