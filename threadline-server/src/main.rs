use std::env;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use serde::Serialize;

use threadline_pipeline::artifacts::ArtifactSet;
use threadline_pipeline::insights::{ActionItem, SectionInsights};
use threadline_pipeline::run::{run, RunInputs};
use threadline_pipeline::{SourceFiles, SourceSchemas, Table};

// ---------------------------------------------------------------------------
// JSON output contract
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct DigestJson<'a> {
    generated_at: &'a str,
    week: u32,
    big_picture: &'a str,
    summary: SummaryJson,
    action_items: &'a [ActionItem],
    artifacts_dir: String,
}

#[derive(Serialize)]
struct SummaryJson {
    sku_count: usize,
    fineline_count: usize,
    tier_a_count: usize,
    tier_b_count: usize,
    tier_c_count: usize,
    sales_dollars_lw: f64,
    dollars_pct_delta: f64,
    wos: f64,
    size_recommendation_count: usize,
}

fn build_json<'a>(artifacts: &'a ArtifactSet, out_dir: &PathBuf) -> DigestJson<'a> {
    DigestJson {
        generated_at: &artifacts.meta.generated_at,
        week: artifacts.insights.week,
        big_picture: &artifacts.insights.big_picture,
        summary: SummaryJson {
            sku_count: artifacts.meta.metrics.sku_count,
            fineline_count: artifacts.meta.metrics.fineline_count,
            tier_a_count: artifacts.meta.metrics.tier_a_count,
            tier_b_count: artifacts.meta.metrics.tier_b_count,
            tier_c_count: artifacts.meta.metrics.tier_c_count,
            sales_dollars_lw: artifacts.weekly_summary.sales_dollars_lw,
            dollars_pct_delta: artifacts.weekly_summary.dollars_pct_delta,
            wos: artifacts.weekly_summary.wos,
            size_recommendation_count: artifacts.meta.metrics.size_recommendation_count,
        },
        action_items: &artifacts.insights.action_items,
        artifacts_dir: out_dir.display().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable output
// ---------------------------------------------------------------------------

/// Format a number with comma thousands separators.
fn format_dollars(amount: f64) -> String {
    let whole = amount.abs() as u64;
    let sign = if amount < 0.0 { "-" } else { "" };

    if whole < 1_000 {
        return format!("{}{}", sign, whole);
    }

    let s = whole.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    format!("{}{}", sign, result.chars().rev().collect::<String>())
}

fn print_section(title: &str, section: &SectionInsights) {
    if section.summary.is_empty() && section.callouts.is_empty() {
        return;
    }
    println!("  {:\u{2500}<64}", "");
    println!("  {}", title);
    if !section.summary.is_empty() {
        println!("    {}", section.summary);
    }
    for callout in &section.callouts {
        println!("    \u{00b7} {}", callout);
    }
    println!();
}

fn print_human(artifacts: &ArtifactSet, load_ms: u128, pipeline_ms: u128) {
    let metrics = &artifacts.meta.metrics;
    let summary = &artifacts.weekly_summary;

    println!();
    println!("  \u{2554}{:\u{2550}<62}\u{2557}", "");
    println!(
        "  \u{2551}{:^62}\u{2551}",
        format!("THREADLINE \u{2014} Week {} Merch Digest", artifacts.insights.week)
    );
    println!("  \u{255a}{:\u{2550}<62}\u{255d}", "");
    println!();

    println!(
        "  {} SKUs \u{00b7} {} finelines \u{00b7} tiers A/B/C {}/{}/{}",
        metrics.sku_count,
        metrics.fineline_count,
        metrics.tier_a_count,
        metrics.tier_b_count,
        metrics.tier_c_count,
    );
    println!(
        "  LW sales ${} ({:+.1}% to LY) \u{00b7} {:.1} WOS \u{00b7} {} size recommendations",
        format_dollars(summary.sales_dollars_lw),
        summary.dollars_pct_delta,
        summary.wos,
        metrics.size_recommendation_count,
    );
    println!();
    println!("  {}", artifacts.insights.big_picture);
    println!();

    print_section("MODULAR DEEP DIVE", &artifacts.insights.modular_deep_dive);
    print_section("SEASONAL SPOTLIGHT", &artifacts.insights.seasonal_spotlight);

    if !artifacts.insights.action_items.is_empty() {
        println!("  {:\u{2500}<64}", "");
        println!("  ACTION ITEMS");
        for item in &artifacts.insights.action_items {
            println!("    {}. {} \u{2014} {}", item.priority, item.action, item.detail);
        }
        println!();
    }

    println!(
        "  \u{23f1}  CSVs loaded in {}ms \u{00b7} Pipeline ran in {}ms \u{00b7} Total {}ms",
        load_ms,
        pipeline_ms,
        load_ms + pipeline_ms
    );
    println!();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn usage() -> ! {
    eprintln!("Usage: threadline-server <pos.csv> <ladder.csv> [velocity.csv] [--out DIR] [--aux DIR] [--week N] [--json]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --out      Directory for JSON artifacts (default: ./artifacts)");
    eprintln!("  --aux      Directory holding optional seasonal_risk.json / action_items.json");
    eprintln!("  --week     Fiscal week number (default: 0)");
    eprintln!("  --json     Output digest as JSON instead of formatted text");
    eprintln!();
    eprintln!("Example:");
    eprintln!("  threadline-server fixtures/pos.csv fixtures/ladder.csv");
    eprintln!("  threadline-server pos.csv ladder.csv velocity.csv --out dashboard/data --week 40 --json");
    process::exit(1);
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        usage();
    }

    let pos_path = &args[1];
    let ladder_path = &args[2];

    // Parse optional positional velocity path and flags.
    let mut velocity_path: Option<String> = None;
    let mut out_dir = PathBuf::from("artifacts");
    let mut aux_dir: Option<PathBuf> = None;
    let mut week: u32 = 0;
    let mut json_output = false;
    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--out" => {
                if i + 1 < args.len() {
                    out_dir = PathBuf::from(&args[i + 1]);
                    i += 2;
                } else {
                    eprintln!("Error: --out requires a directory path");
                    process::exit(1);
                }
            }
            "--aux" => {
                if i + 1 < args.len() {
                    aux_dir = Some(PathBuf::from(&args[i + 1]));
                    i += 2;
                } else {
                    eprintln!("Error: --aux requires a directory path");
                    process::exit(1);
                }
            }
            "--week" => {
                if i + 1 < args.len() {
                    week = args[i + 1].parse().unwrap_or_else(|_| {
                        eprintln!("Error: --week requires a positive integer");
                        process::exit(1);
                    });
                    i += 2;
                } else {
                    eprintln!("Error: --week requires a number");
                    process::exit(1);
                }
            }
            "--json" => {
                json_output = true;
                i += 1;
            }
            other if !other.starts_with("--") && velocity_path.is_none() => {
                velocity_path = Some(other.to_string());
                i += 1;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
    }

    // Required sources: failure to load either is fatal.
    let load_start = Instant::now();
    let pos = match Table::from_csv_path("POS", pos_path) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("Error loading POS export: {}", err);
            process::exit(1);
        }
    };
    let ladder = match Table::from_csv_path("ladder", ladder_path) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("Error loading ladder export: {}", err);
            process::exit(1);
        }
    };

    // The velocity export is optional: a week without it still produces the
    // full artifact set, just without size-level enrichment.
    let velocity = match &velocity_path {
        Some(path) => match Table::from_csv_path("velocity", path) {
            Ok(table) => Some(table),
            Err(err) => {
                log::warn!("Velocity export not loaded, continuing without sizes: {}", err);
                None
            }
        },
        None => None,
    };
    let load_ms = load_start.elapsed().as_millis();

    let inputs = RunInputs {
        pos,
        ladder,
        velocity,
        schemas: SourceSchemas::default(),
        week,
        source_files: SourceFiles {
            pos: pos_path.clone(),
            ladder: ladder_path.clone(),
            velocity: velocity_path.clone(),
        },
    };

    let pipeline_start = Instant::now();
    let artifacts = match run(&inputs, aux_dir.as_deref()) {
        Ok(artifacts) => artifacts,
        Err(err) => {
            eprintln!("Pipeline failed: {}", err);
            process::exit(1);
        }
    };
    let pipeline_ms = pipeline_start.elapsed().as_millis();

    if let Err(err) = artifacts.write_all(&out_dir) {
        eprintln!("Failed to write artifacts: {}", err);
        process::exit(1);
    }

    if json_output {
        let digest = build_json(&artifacts, &out_dir);
        match serde_json::to_string_pretty(&digest) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                eprintln!("Failed to serialize digest: {}", err);
                process::exit(1);
            }
        }
    } else {
        print_human(&artifacts, load_ms, pipeline_ms);
    }
}
