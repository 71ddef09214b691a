//! End-to-end pipeline tests: CSV text in, JSON artifact set out.

use std::collections::HashSet;

use threadline_pipeline::artifacts::{self, ArtifactSet};
use threadline_pipeline::run::{run, RunInputs};
use threadline_pipeline::{EtlError, SourceFiles, SourceSchemas, Table, Tier};

const POS_CSV: &str = "\
WD Style/Color,Fineline,Sales Units LW,Sales Units LWLY,Sales Retail $ LW,Sales Retail $ LWLY,Store On Hand Units LW,Store On Hand Retail LW,Sales Units 2025YTD,Sales Retail $ 2025YTD
11874BK,9100,30,25,600,500,60,1200,1200,24000
11874BK,9100,20,15,400,300,40,800,800,16000
EU1939RBD,9105,0,10,0,200,20,400,80,1600
";

const LADDER_CSV: &str = "\
WD Style/Color,Fineline,Item Description,Color,Gender,Category,Sub Category,AUR TY,AUR LY
11874BK,9100,WORK PANT BLACK,Black,Mens,Modular,Bottoms,$20.00,$19.50
EU1939RBD,9105,DUCK PANT RINSED BLACK,Rinsed Black,Mens,Modular,Bottoms,$24.98,$24.98
";

const VELOCITY_CSV: &str = "\
Vndr Category 2,Prime Item Nbr,Prime Size Description,Item Status,LW POS Qty,Total LW Str Inv Retail,LW Avg Retail,Curr Valid Stores,Unit Retail,Unit Cost
EU1939RBD,574680967,32X32,A,10,\"2,498.00\",24.98,3100,24.98,14.50
EU1939RBD,574680968,34X32,A,0,499.60,24.98,3000,24.98,14.50
EU1939RBD,574680969,36X32,A,1,\"1,249.00\",24.98,3200,24.98,14.50
";

fn base_inputs(velocity: Option<Table>) -> RunInputs {
    RunInputs {
        pos: Table::from_csv("POS", POS_CSV.as_bytes()).unwrap(),
        ladder: Table::from_csv("ladder", LADDER_CSV.as_bytes()).unwrap(),
        velocity,
        schemas: SourceSchemas::default(),
        week: 40,
        source_files: SourceFiles {
            pos: "pos.csv".into(),
            ladder: "ladder.csv".into(),
            velocity: None,
        },
    }
}

#[test]
fn sku_master_aggregates_and_derives() {
    let artifacts = run(&base_inputs(None), None).unwrap();

    // Two POS rows for 11874BK collapse into one record, sorted first by
    // YTD dollars.
    assert_eq!(artifacts.sku_master.len(), 2);
    let top = &artifacts.sku_master[0];
    assert_eq!(top.sku, "11874BK");
    assert_eq!(top.sales_units_lw, 50.0);
    assert_eq!(top.inventory_units_lw, 100.0);
    assert_eq!(top.wos, 2.0);
    assert_eq!(top.tier, Tier::A);
    assert_eq!(top.description, "WORK PANT BLACK");

    // Zero-sales SKU carries zero WOS, not a division blowup.
    let tail = &artifacts.sku_master[1];
    assert_eq!(tail.sku, "EU1939RBD");
    assert_eq!(tail.wos, 0.0);
    assert_eq!(tail.unit_pct_change, -100.0);
}

#[test]
fn weekly_summary_totals_whole_table() {
    let artifacts = run(&base_inputs(None), None).unwrap();
    let summary = &artifacts.weekly_summary;
    assert_eq!(summary.sales_units_lw, 50.0);
    assert_eq!(summary.inventory_units_lw, 120.0);
    assert_eq!(summary.sales_dollars_lw, 1000.0);
    assert_eq!(summary.wos, 2.4);
    assert_eq!(summary.units_delta, 0.0);
}

#[test]
fn fineline_rollup_covers_every_fineline() {
    let artifacts = run(&base_inputs(None), None).unwrap();
    let finelines: HashSet<&str> = artifacts
        .fineline_rollup
        .iter()
        .map(|f| f.fineline.as_str())
        .collect();
    assert_eq!(finelines, HashSet::from(["9100", "9105"]));
}

#[test]
fn row_order_does_not_change_aggregates() {
    let artifacts_a = run(&base_inputs(None), None).unwrap();

    let reordered: String = {
        let mut lines: Vec<&str> = POS_CSV.trim_end().lines().collect();
        lines[1..].reverse();
        lines.join("\n")
    };
    let mut inputs = base_inputs(None);
    inputs.pos = Table::from_csv("POS", reordered.as_bytes()).unwrap();
    let artifacts_b = run(&inputs, None).unwrap();

    let keys = |set: &ArtifactSet| -> Vec<(String, f64, f64)> {
        set.sku_master
            .iter()
            .map(|s| (s.sku.clone(), s.sales_units_lw, s.cumulative_sales_pct))
            .collect()
    };
    assert_eq!(keys(&artifacts_a), keys(&artifacts_b));
}

#[test]
fn velocity_enrichment_attaches_size_analysis() {
    let velocity = Table::from_csv("velocity", VELOCITY_CSV.as_bytes()).unwrap();
    let artifacts = run(&base_inputs(Some(velocity)), None).unwrap();

    let duck = artifacts
        .sku_master
        .iter()
        .find(|s| s.sku == "EU1939RBD")
        .unwrap();
    let analysis = duck.size_analysis.as_ref().unwrap();
    assert_eq!(analysis.total_sizes, 3);
    // Store count is the max across sizes, not the sum.
    assert_eq!(duck.store_count, 3200);
    // 34X32 sits on inventory with no sales; 36X32 runs 50 weeks of supply.
    assert_eq!(analysis.dead_sizes, 2);
    assert_eq!(analysis.productive_sizes, 1);

    // 2 dead of 3 sizes at 33.3% efficiency trips a recommendation.
    assert_eq!(artifacts.size_recommendations.len(), 1);
    assert_eq!(artifacts.size_recommendations[0].sku, "EU1939RBD");
    assert_eq!(artifacts.size_recommendations[0].priority, "medium");
}

#[test]
fn missing_required_column_aborts_before_artifacts() {
    let broken = POS_CSV.replace("Sales Retail $ LW,", "Mystery Column,");
    let mut inputs = base_inputs(None);
    inputs.pos = Table::from_csv("POS", broken.as_bytes()).unwrap();

    let err = run(&inputs, None).unwrap_err();
    match err {
        EtlError::MissingColumn { table, column } => {
            assert_eq!(table, "POS");
            assert_eq!(column, "Sales Retail $ LW");
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn write_all_emits_the_full_artifact_set() {
    let out = std::env::temp_dir().join("threadline-etl-integration");
    let _ = std::fs::remove_dir_all(&out);

    let artifact_set = run(&base_inputs(None), None).unwrap();
    artifact_set.write_all(&out).unwrap();

    for file in [
        artifacts::SKU_MASTER_FILE,
        artifacts::FINELINE_ROLLUP_FILE,
        artifacts::WEEKLY_SUMMARY_FILE,
        artifacts::SIZE_RECOMMENDATIONS_FILE,
        artifacts::SEASONAL_RISK_FILE,
        artifacts::ACTION_ITEMS_FILE,
        artifacts::WEEKLY_INSIGHTS_FILE,
        artifacts::META_FILE,
    ] {
        assert!(out.join(file).exists(), "missing artifact {file}");
    }

    let meta: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join(artifacts::META_FILE)).unwrap())
            .unwrap();
    assert_eq!(meta["week"], 40);
    assert_eq!(meta["metrics"]["sku_count"], 2);
    assert_eq!(meta["metrics"]["tier_a_count"], 1);
}
