//! Weekly narrative insight selection.
//!
//! Compares the current week against the same calendar week last year and
//! selects callout-worthy conditions. The decision logic here is pure data:
//! each rule is a threshold test producing a typed `Callout`, evaluated
//! independently and collected in a fixed priority order. Turning a callout
//! into display text is a separate rendering step, so the rules are testable
//! without string matching. Every rule degrades gracefully: a category with
//! no rows yields an empty callout list, never an error.
//!
//! All thresholds live in `threadline_metrics::thresholds`.

use serde::Serialize;

use threadline_metrics::percent_change;
use threadline_metrics::thresholds::{
    DOUBLE_DOWN_ST_PCT, EXCEPTIONAL_WEEK_SALES_YOY_PCT, IN_STOCK_OH_DECLINE_PCT,
    IN_STOCK_SALES_DECLINE_PCT, OH_GROWTH_THROTTLE_PCT, SEASONAL_ST_FLOOR_PCT,
    STRONG_WEEK_SALES_YOY_PCT, WEAK_WEEK_SALES_YOY_PCT,
};

/// One style/color's aggregated week, the input grain for insight rules.
#[derive(Clone, Debug)]
pub struct StyleWeek {
    pub style_color: String,
    /// "Modular" or "Seasonal" (case-insensitive); anything else only
    /// counts toward the total block.
    pub category: String,
    pub sales_dollars: f64,
    pub sales_units: f64,
    pub on_hand_units: f64,
    pub sell_through_pct: f64,
    pub avg_retail: f64,
}

/// Structured weekly insights artifact, consumed by the rendering layer.
#[derive(Clone, Debug, Serialize)]
pub struct WeeklyInsights {
    pub week: u32,
    pub header_metrics: HeaderMetrics,
    pub big_picture: String,
    pub modular_deep_dive: SectionInsights,
    pub seasonal_spotlight: SectionInsights,
    pub action_items: Vec<ActionItem>,
}

#[derive(Clone, Debug, Serialize)]
pub struct HeaderMetrics {
    pub total: HeaderBlock,
    pub modular: HeaderBlock,
    pub seasonal: HeaderBlock,
}

#[derive(Clone, Debug, Serialize)]
pub struct HeaderBlock {
    pub sales: f64,
    pub sales_yoy: f64,
    pub on_hand: f64,
    pub on_hand_yoy: f64,
    pub sell_through: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct SectionInsights {
    pub summary: String,
    pub callouts: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ActionItem {
    pub priority: u8,
    pub action: String,
    pub detail: String,
}

// ---------------------------------------------------------------------------
// Tracked style families
// ---------------------------------------------------------------------------

/// Style families the merchant team tracks by name each week.
const VOLUME_DRIVERS: &[(&[&str], &str)] = &[
    (&["GP338"], "Cargo Pant"),
    (&["GP738"], "Double Knee Pant"),
    (&["HIVS", "HI-VIS", "HI VIS"], "Hi-Vis Vest"),
];

const WORK_PANT_TOKENS: &[&str] = &["11874"];
const DUCK_PANT_TOKENS: &[&str] = &["EU1939"];
const HEADWEAR_TOKENS: &[&str] = &["HEAD", "CAP", "HAT"];
const OUTERWEAR_TOKENS: &[&str] = &["JACKET", "SHACKET", "COAT"];
const SHACKET_TOKENS: &[&str] = &["SHACKET"];
const GRAPHIC_TEE_TOKENS: &[&str] = &["GRAPHIC", "TEE"];

/// Work-pant streak rule: current family sales within this fraction of LY
/// (or better) reads as the streak continuing.
const STREAK_HOLD_RATIO: f64 = 0.97;

// ---------------------------------------------------------------------------
// Typed callouts (decision layer)
// ---------------------------------------------------------------------------

/// A callout-worthy condition with its computed values. Rendering to text
/// happens in [`Callout::render`].
#[derive(Clone, Debug, PartialEq)]
pub enum Callout {
    /// Tracked family holding its sales streak vs LY.
    FamilyStreak {
        name: &'static str,
        top_color: String,
        top_sales: f64,
        top_st: f64,
    },
    /// Tracked family losing ground vs LY.
    FamilyWatch {
        name: &'static str,
        top_color: String,
        top_sales: f64,
        top_st: f64,
    },
    /// Simple YoY posting for a tracked family.
    FamilyYoY { name: &'static str, sales_yoy: f64 },
    /// High-volume family worth a line, optionally an allocation
    /// opportunity when sell-through is hot.
    VolumeDriver {
        name: &'static str,
        sales: f64,
        st: f64,
        opportunity: bool,
    },
    /// Sales down hard but on-hand down harder: a stockout, not a demand
    /// problem.
    InStockOpportunity {
        name: &'static str,
        sales_yoy: f64,
        oh_yoy: f64,
        st: f64,
    },
    /// Seasonal family posting.
    SeasonalItem {
        name: &'static str,
        sales: f64,
        st: f64,
    },
}

impl Callout {
    /// Render the callout as dashboard text. Presentation only; no
    /// thresholds or data decisions here.
    pub fn render(&self) -> String {
        match self {
            Callout::FamilyStreak {
                name,
                top_color,
                top_sales,
                top_st,
            } => format!(
                "The {} continues its streak - {} was top seller generating ${:.0}k in sales at {:.1}% ST",
                name,
                top_color,
                top_sales / 1000.0,
                top_st
            ),
            Callout::FamilyWatch {
                name,
                top_color,
                top_sales,
                top_st,
            } => format!(
                "The {} posted ${:.0}k ({}) at {:.1}% ST - need to watch velocity here",
                name,
                top_sales / 1000.0,
                top_color,
                top_st
            ),
            Callout::FamilyYoY { name, sales_yoy } => {
                format!("{} posted {}{:.0}% to LY", name, sign(*sales_yoy), sales_yoy)
            }
            Callout::VolumeDriver {
                name,
                sales,
                st,
                opportunity,
            } => {
                if *opportunity {
                    format!(
                        "{} generated ${:.0}k at {:.1}% ST - opportunity for stronger in-stock position",
                        name,
                        sales / 1000.0,
                        st
                    )
                } else {
                    format!("{} generated ${:.0}k at {:.1}% ST", name, sales / 1000.0, st)
                }
            }
            Callout::InStockOpportunity {
                name,
                sales_yoy,
                oh_yoy,
                st,
            } => format!(
                "{} {:.0}% to LY at {:.1}% ST, OH {:.0}% to LY - in-stock opportunity",
                name, sales_yoy, st, oh_yoy
            ),
            Callout::SeasonalItem { name, sales, st } => {
                format!("{} posted ${:.0}k at {:.1}% ST", name, sales / 1000.0, st)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Generate the full weekly insights block from current-week and
/// last-year-week style aggregates.
pub fn generate_weekly_insights(
    current: &[StyleWeek],
    last_year: &[StyleWeek],
    week: u32,
) -> WeeklyInsights {
    let header_metrics = header_metrics(current, last_year);

    WeeklyInsights {
        week,
        big_picture: big_picture(&header_metrics.total),
        modular_deep_dive: modular_deep_dive(current, last_year),
        seasonal_spotlight: seasonal_spotlight(current, last_year),
        action_items: action_items(current, last_year, &header_metrics),
        header_metrics,
    }
}

fn subset<'a>(rows: &'a [StyleWeek], category: &str) -> Vec<&'a StyleWeek> {
    rows.iter()
        .filter(|r| r.category.eq_ignore_ascii_case(category))
        .collect()
}

fn sum_sales(rows: &[&StyleWeek]) -> f64 {
    rows.iter().map(|r| r.sales_dollars).sum()
}

fn sum_on_hand(rows: &[&StyleWeek]) -> f64 {
    rows.iter().map(|r| r.on_hand_units).sum()
}

fn mean_st(rows: &[&StyleWeek]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    rows.iter().map(|r| r.sell_through_pct).sum::<f64>() / rows.len() as f64
}

fn style_matches(style_color: &str, tokens: &[&str]) -> bool {
    let upper = style_color.to_ascii_uppercase();
    tokens.iter().any(|t| upper.contains(t))
}

fn family<'a>(rows: &'a [StyleWeek], tokens: &[&str]) -> Vec<&'a StyleWeek> {
    rows.iter()
        .filter(|r| style_matches(&r.style_color, tokens))
        .collect()
}

fn block(rows: &[&StyleWeek], ly_rows: &[&StyleWeek]) -> HeaderBlock {
    let sales = sum_sales(rows);
    let on_hand = sum_on_hand(rows);
    HeaderBlock {
        sales,
        sales_yoy: percent_change(sales, sum_sales(ly_rows)),
        on_hand,
        on_hand_yoy: percent_change(on_hand, sum_on_hand(ly_rows)),
        sell_through: mean_st(rows),
    }
}

fn header_metrics(current: &[StyleWeek], last_year: &[StyleWeek]) -> HeaderMetrics {
    let all_current: Vec<&StyleWeek> = current.iter().collect();
    let all_ly: Vec<&StyleWeek> = last_year.iter().collect();
    HeaderMetrics {
        total: block(&all_current, &all_ly),
        modular: block(&subset(current, "Modular"), &subset(last_year, "Modular")),
        seasonal: block(&subset(current, "Seasonal"), &subset(last_year, "Seasonal")),
    }
}

fn sign(value: f64) -> &'static str {
    if value >= 0.0 {
        "+"
    } else {
        ""
    }
}

fn big_picture(total: &HeaderBlock) -> String {
    let enthusiasm = if total.sales_yoy >= EXCEPTIONAL_WEEK_SALES_YOY_PCT {
        " - WHAT A WEEK!"
    } else if total.sales_yoy >= STRONG_WEEK_SALES_YOY_PCT {
        " - Strong performance!"
    } else if total.sales_yoy < WEAK_WEEK_SALES_YOY_PCT {
        " - Need to dig in here."
    } else {
        ""
    };
    format!(
        "Overall Sales {}{:.1}% to LY on {}{:.1}% OH{}",
        sign(total.sales_yoy),
        total.sales_yoy,
        sign(total.on_hand_yoy),
        total.on_hand_yoy,
        enthusiasm
    )
}

fn section_summary(label: &str, rows: &[&StyleWeek], ly_rows: &[&StyleWeek]) -> String {
    let header = block(rows, ly_rows);
    format!(
        "{}: {}{:.1}% to LY on {}{:.1}% OH, posting a {:.1}% ST",
        label,
        sign(header.sales_yoy),
        header.sales_yoy,
        sign(header.on_hand_yoy),
        header.on_hand_yoy,
        header.sell_through
    )
}

/// Human color name for a style code suffix.
fn color_name(style_color: &str) -> String {
    const COLOR_CODES: &[(&str, &str)] = &[
        ("BK", "Black"),
        ("NV", "Navy"),
        ("KH", "Khaki"),
        ("CH", "Charcoal"),
        ("RB", "Rinsed Black"),
        ("BD", "Brown Duck"),
        ("BN", "Brown"),
    ];
    let upper = style_color.to_ascii_uppercase();
    for (code, name) in COLOR_CODES {
        if upper.contains(code) {
            return (*name).to_string();
        }
    }
    "Black".to_string()
}

/// Work-pant rule: streak holds when family sales are within
/// `STREAK_HOLD_RATIO` of LY or better.
fn work_pant_callout(modular: &[&StyleWeek], ly_modular: &[&StyleWeek]) -> Option<Callout> {
    let family: Vec<&StyleWeek> = modular
        .iter()
        .copied()
        .filter(|r| style_matches(&r.style_color, WORK_PANT_TOKENS))
        .collect();
    let top = family
        .iter()
        .copied()
        .max_by(|a, b| a.sales_dollars.total_cmp(&b.sales_dollars))?;

    let current_total: f64 = family.iter().map(|r| r.sales_dollars).sum();
    let ly_total: f64 = ly_modular
        .iter()
        .filter(|r| style_matches(&r.style_color, WORK_PANT_TOKENS))
        .map(|r| r.sales_dollars)
        .sum();
    // No LY family data: treat the streak as holding rather than broken.
    let holding = ly_total == 0.0 || current_total > ly_total * STREAK_HOLD_RATIO;

    let callout = if holding {
        Callout::FamilyStreak {
            name: "11874 Work Pant",
            top_color: color_name(&top.style_color),
            top_sales: top.sales_dollars,
            top_st: top.sell_through_pct,
        }
    } else {
        Callout::FamilyWatch {
            name: "11874 Work Pant",
            top_color: color_name(&top.style_color),
            top_sales: top.sales_dollars,
            top_st: top.sell_through_pct,
        }
    };
    Some(callout)
}

fn duck_pant_callout(modular: &[&StyleWeek], ly_modular: &[&StyleWeek]) -> Option<Callout> {
    let current: f64 = modular
        .iter()
        .filter(|r| style_matches(&r.style_color, DUCK_PANT_TOKENS))
        .map(|r| r.sales_dollars)
        .sum();
    let any = modular
        .iter()
        .any(|r| style_matches(&r.style_color, DUCK_PANT_TOKENS));
    if !any {
        return None;
    }
    let ly: f64 = ly_modular
        .iter()
        .filter(|r| style_matches(&r.style_color, DUCK_PANT_TOKENS))
        .map(|r| r.sales_dollars)
        .sum();
    Some(Callout::FamilyYoY {
        name: "Duck Pant EU1939",
        sales_yoy: percent_change(current, ly),
    })
}

/// Volume-driver rule: tracked families at or above the median of the top
/// 15 sellers get a line; hot sell-through upgrades it to an opportunity.
fn volume_driver_callouts(modular: &[&StyleWeek]) -> Vec<Callout> {
    if modular.is_empty() {
        return Vec::new();
    }
    let mut top_sales: Vec<f64> = modular.iter().map(|r| r.sales_dollars).collect();
    top_sales.sort_by(|a, b| b.total_cmp(a));
    top_sales.truncate(15);
    let median = top_sales[top_sales.len() / 2];

    let mut callouts = Vec::new();
    for &(tokens, name) in VOLUME_DRIVERS {
        let rows: Vec<&StyleWeek> = modular
            .iter()
            .copied()
            .filter(|r| style_matches(&r.style_color, tokens))
            .collect();
        if rows.is_empty() {
            continue;
        }
        let sales = sum_sales(&rows);
        if sales < median {
            continue;
        }
        let st = mean_st(&rows);
        callouts.push(Callout::VolumeDriver {
            name,
            sales,
            st,
            opportunity: st > DOUBLE_DOWN_ST_PCT,
        });
    }
    callouts
}

/// In-stock rule: the family's sales fell past the decline threshold while
/// on-hand fell even harder — demand outran supply.
fn in_stock_callout(
    name: &'static str,
    tokens: &[&str],
    rows: &[&StyleWeek],
    ly_rows: &[&StyleWeek],
) -> Option<Callout> {
    let family: Vec<&StyleWeek> = rows
        .iter()
        .copied()
        .filter(|r| style_matches(&r.style_color, tokens))
        .collect();
    if family.is_empty() {
        return None;
    }
    let ly_family: Vec<&StyleWeek> = ly_rows
        .iter()
        .copied()
        .filter(|r| style_matches(&r.style_color, tokens))
        .collect();
    if ly_family.is_empty() {
        return None;
    }

    let sales_yoy = percent_change(sum_sales(&family), sum_sales(&ly_family));
    let oh_yoy = percent_change(sum_on_hand(&family), sum_on_hand(&ly_family));
    if sales_yoy < IN_STOCK_SALES_DECLINE_PCT && oh_yoy < sales_yoy {
        Some(Callout::InStockOpportunity {
            name,
            sales_yoy,
            oh_yoy,
            st: mean_st(&family),
        })
    } else {
        None
    }
}

fn modular_deep_dive(current: &[StyleWeek], last_year: &[StyleWeek]) -> SectionInsights {
    let modular = subset(current, "Modular");
    let ly_modular = subset(last_year, "Modular");
    if modular.is_empty() {
        return SectionInsights {
            summary: String::new(),
            callouts: Vec::new(),
        };
    }

    // Fixed priority order: key families, then volume drivers, then
    // in-stock opportunities.
    let mut callouts: Vec<Callout> = Vec::new();
    callouts.extend(work_pant_callout(&modular, &ly_modular));
    callouts.extend(duck_pant_callout(&modular, &ly_modular));
    callouts.extend(volume_driver_callouts(&modular));
    callouts.extend(in_stock_callout(
        "Headwear",
        HEADWEAR_TOKENS,
        &modular,
        &ly_modular,
    ));

    SectionInsights {
        summary: section_summary("Modular", &modular, &ly_modular),
        callouts: callouts.iter().map(Callout::render).collect(),
    }
}

fn seasonal_spotlight(current: &[StyleWeek], last_year: &[StyleWeek]) -> SectionInsights {
    let seasonal = subset(current, "Seasonal");
    let ly_seasonal = subset(last_year, "Seasonal");
    if seasonal.is_empty() {
        return SectionInsights {
            summary: String::new(),
            callouts: Vec::new(),
        };
    }

    let mut callouts: Vec<Callout> = Vec::new();

    let outerwear: Vec<&StyleWeek> = seasonal
        .iter()
        .copied()
        .filter(|r| style_matches(&r.style_color, OUTERWEAR_TOKENS))
        .collect();
    if !outerwear.is_empty() {
        let ly_outerwear: Vec<&StyleWeek> = ly_seasonal
            .iter()
            .copied()
            .filter(|r| style_matches(&r.style_color, OUTERWEAR_TOKENS))
            .collect();
        let sales_yoy = percent_change(sum_sales(&outerwear), sum_sales(&ly_outerwear));
        callouts.push(Callout::FamilyYoY {
            name: "Outerwear",
            sales_yoy,
        });
    }

    for (tokens, name) in [
        (SHACKET_TOKENS, "Shacket"),
        (GRAPHIC_TEE_TOKENS, "Graphic Tees"),
    ] {
        let rows: Vec<&StyleWeek> = seasonal
            .iter()
            .copied()
            .filter(|r| style_matches(&r.style_color, tokens))
            .collect();
        if rows.is_empty() {
            continue;
        }
        callouts.push(Callout::SeasonalItem {
            name,
            sales: sum_sales(&rows),
            st: mean_st(&rows),
        });
    }

    SectionInsights {
        summary: section_summary("Seasonal", &seasonal, &ly_seasonal),
        callouts: callouts.iter().map(Callout::render).collect(),
    }
}

fn action_items(
    current: &[StyleWeek],
    last_year: &[StyleWeek],
    header: &HeaderMetrics,
) -> Vec<ActionItem> {
    let mut items = Vec::new();

    // 1. Inventory breathing room.
    if header.total.on_hand_yoy > OH_GROWTH_THROTTLE_PCT {
        items.push(ActionItem {
            priority: 1,
            action: "Throttle Modular Reorders".into(),
            detail: "Reduce next PO by 15-20% to let inventory breathe (WOS too high)".into(),
        });
    }

    // 2. Seasonal velocity watch.
    let seasonal = subset(current, "Seasonal");
    if !seasonal.is_empty() {
        let st = mean_st(&seasonal);
        if st < SEASONAL_ST_FLOOR_PCT {
            items.push(ActionItem {
                priority: 2,
                action: "Monitor Seasonal Velocity".into(),
                detail: format!(
                    "Hit {:.0}% ST or flag for markdown consideration (currently {:.1}%)",
                    SEASONAL_ST_FLOOR_PCT, st
                ),
            });
        }
    }

    // 3. Double down on the hottest seller.
    let hot: Option<&StyleWeek> = current
        .iter()
        .filter(|r| r.sell_through_pct > DOUBLE_DOWN_ST_PCT)
        .max_by(|a, b| a.sales_dollars.total_cmp(&b.sales_dollars));
    if let Some(item) = hot {
        items.push(ActionItem {
            priority: 3,
            action: format!("Double Down on {}", simplify_style_name(&item.style_color)),
            detail: format!(
                "{:.1}% ST (2x modular average) - increase allocation to capture demand",
                item.sell_through_pct
            ),
        });
    }

    // 4. Headwear in-stock fix: sales down hard AND on-hand past the
    // stockout-confirmation threshold.
    let headwear = family(current, HEADWEAR_TOKENS);
    let ly_headwear = family(last_year, HEADWEAR_TOKENS);
    if !headwear.is_empty() && !ly_headwear.is_empty() {
        let sales_yoy = percent_change(sum_sales(&headwear), sum_sales(&ly_headwear));
        let oh_yoy = percent_change(sum_on_hand(&headwear), sum_on_hand(&ly_headwear));
        if sales_yoy < IN_STOCK_SALES_DECLINE_PCT && oh_yoy < IN_STOCK_OH_DECLINE_PCT {
            items.push(ActionItem {
                priority: 4,
                action: "Fix Headwear In-Stock".into(),
                detail: format!(
                    "Sales down {:.0}% but OH down {:.0}% - clear stockout issue",
                    sales_yoy.abs(),
                    oh_yoy.abs()
                ),
            });
        }
    }

    items
}

/// Short display name for action items.
fn simplify_style_name(style_color: &str) -> String {
    let upper = style_color.to_ascii_uppercase();
    if upper.contains("HIVS") || upper.contains("VIS") {
        "Hi-Vis Vest".into()
    } else if upper.contains("11874") {
        "11874 Work Pant".into()
    } else if upper.contains("EU1939") {
        "Duck Pant".into()
    } else if upper.contains("SHACKET") {
        "Shacket".into()
    } else {
        style_color.chars().take(20).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(
        code: &str,
        category: &str,
        sales: f64,
        on_hand: f64,
        st: f64,
    ) -> StyleWeek {
        StyleWeek {
            style_color: code.into(),
            category: category.into(),
            sales_dollars: sales,
            sales_units: sales / 20.0,
            on_hand_units: on_hand,
            sell_through_pct: st,
            avg_retail: 20.0,
        }
    }

    #[test]
    fn empty_seasonal_category_yields_empty_section() {
        let current = vec![style("11874BK", "Modular", 1000.0, 100.0, 12.0)];
        let insights = generate_weekly_insights(&current, &current, 40);
        assert!(insights.seasonal_spotlight.summary.is_empty());
        assert!(insights.seasonal_spotlight.callouts.is_empty());
    }

    #[test]
    fn big_picture_enthusiasm_bands() {
        let current = vec![style("11874BK", "Modular", 1200.0, 100.0, 12.0)];
        let ly = vec![style("11874BK", "Modular", 1000.0, 100.0, 12.0)];
        let insights = generate_weekly_insights(&current, &ly, 40);
        assert!(insights.big_picture.contains("WHAT A WEEK"));

        let weak = vec![style("11874BK", "Modular", 800.0, 100.0, 12.0)];
        let insights = generate_weekly_insights(&weak, &ly, 40);
        assert!(insights.big_picture.contains("dig in"));
    }

    #[test]
    fn in_stock_rule_requires_oh_below_sales_decline() {
        let current = vec![style("CAP01BK", "Modular", 700.0, 30.0, 8.0)];
        let ly = vec![style("CAP01BK", "Modular", 1000.0, 100.0, 8.0)];
        // sales -30%, oh -70%: stockout signature.
        let callout = in_stock_callout(
            "Headwear",
            HEADWEAR_TOKENS,
            &current.iter().collect::<Vec<_>>(),
            &ly.iter().collect::<Vec<_>>(),
        )
        .unwrap();
        match callout {
            Callout::InStockOpportunity { sales_yoy, oh_yoy, .. } => {
                assert!((sales_yoy - -30.0).abs() < 1e-9);
                assert!((oh_yoy - -70.0).abs() < 1e-9);
            }
            other => panic!("unexpected callout {:?}", other),
        }

        // sales -30%, oh -10%: demand problem, no callout.
        let mild = vec![style("CAP01BK", "Modular", 700.0, 90.0, 8.0)];
        assert!(in_stock_callout(
            "Headwear",
            HEADWEAR_TOKENS,
            &mild.iter().collect::<Vec<_>>(),
            &ly.iter().collect::<Vec<_>>(),
        )
        .is_none());
    }

    #[test]
    fn work_pant_streak_vs_watch() {
        let ly = vec![style("11874BK", "Modular", 1000.0, 100.0, 14.0)];
        let holding = vec![style("11874BK", "Modular", 990.0, 100.0, 14.0)];
        let callout = work_pant_callout(
            &holding.iter().collect::<Vec<_>>(),
            &ly.iter().collect::<Vec<_>>(),
        )
        .unwrap();
        assert!(matches!(callout, Callout::FamilyStreak { .. }));

        let slipping = vec![style("11874BK", "Modular", 600.0, 100.0, 9.0)];
        let callout = work_pant_callout(
            &slipping.iter().collect::<Vec<_>>(),
            &ly.iter().collect::<Vec<_>>(),
        )
        .unwrap();
        assert!(matches!(callout, Callout::FamilyWatch { .. }));
    }

    #[test]
    fn action_items_follow_priority_order() {
        let current = vec![
            style("11874BK", "Modular", 1000.0, 300.0, 18.0),
            style("SHACKETBK", "Seasonal", 200.0, 400.0, 4.0),
            style("CAP01BK", "Modular", 300.0, 20.0, 8.0),
        ];
        let ly = vec![
            style("11874BK", "Modular", 1000.0, 200.0, 14.0),
            style("SHACKETBK", "Seasonal", 250.0, 350.0, 6.0),
            style("CAP01BK", "Modular", 500.0, 100.0, 8.0),
        ];
        let items = action_items(&current, &ly, &header_metrics(&current, &ly));
        let priorities: Vec<u8> = items.iter().map(|i| i.priority).collect();
        assert_eq!(priorities, vec![1, 2, 3, 4]);
        assert!(items[2].action.contains("11874 Work Pant"));
    }

    #[test]
    fn volume_driver_opportunity_flag_tracks_sell_through() {
        let hot = Callout::VolumeDriver {
            name: "Cargo Pant",
            sales: 42_000.0,
            st: 17.0,
            opportunity: true,
        };
        assert!(hot.render().contains("opportunity"));
        let warm = Callout::VolumeDriver {
            name: "Cargo Pant",
            sales: 42_000.0,
            st: 9.0,
            opportunity: false,
        };
        assert!(!warm.render().contains("opportunity"));
    }

    #[test]
    fn color_names_extracted_from_style_codes() {
        assert_eq!(color_name("11874KH"), "Khaki");
        assert_eq!(color_name("EU1939RBD"), "Rinsed Black");
        assert_eq!(color_name("UNKNOWN"), "Black");
    }
}
