use clap::Args;
use serde_json::Value;

use menu_profit_core::analytics::breakdown::{
    category_breakdown, rank_products, DEFAULT_RANKING_LIMIT,
};
use menu_profit_core::analytics::enrichment::enrich;
use menu_profit_core::analytics::period::{project_period, quarterly_summary, Period};

use super::DataArgs;
use crate::input;

/// Arguments for full-year enrichment
#[derive(Args)]
pub struct EnrichArgs {
    #[command(flatten)]
    pub source: DataArgs,
}

/// Arguments for period projection
#[derive(Args)]
pub struct ProjectArgs {
    #[command(flatten)]
    pub source: DataArgs,

    /// Period selector: q1, q2, q3, q4 or full-year
    #[arg(long, default_value = "full-year")]
    pub period: Period,
}

/// Arguments for the quarter-by-quarter summary
#[derive(Args)]
pub struct QuarterlyArgs {
    #[command(flatten)]
    pub source: DataArgs,
}

/// Arguments for the per-category breakdown
#[derive(Args)]
pub struct CategoriesArgs {
    #[command(flatten)]
    pub source: DataArgs,

    /// Period selector: q1, q2, q3, q4 or full-year
    #[arg(long, default_value = "full-year")]
    pub period: Period,
}

/// Arguments for top/bottom product ranking
#[derive(Args)]
pub struct RankArgs {
    #[command(flatten)]
    pub source: DataArgs,

    /// Period selector: q1, q2, q3, q4 or full-year
    #[arg(long, default_value = "full-year")]
    pub period: Period,

    /// Products per list
    #[arg(long, default_value_t = DEFAULT_RANKING_LIMIT)]
    pub limit: usize,
}

pub fn run_enrich(args: EnrichArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rows = input::load_catalog(args.source.data.as_deref())?;
    let enriched = enrich(&rows)?;
    Ok(serde_json::to_value(enriched)?)
}

pub fn run_project(args: ProjectArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rows = input::load_catalog(args.source.data.as_deref())?;
    let projected = project_period(&rows, args.period)?;
    Ok(serde_json::to_value(projected)?)
}

pub fn run_quarterly(args: QuarterlyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rows = input::load_catalog(args.source.data.as_deref())?;
    let summary = quarterly_summary(&rows)?;
    Ok(serde_json::to_value(summary)?)
}

pub fn run_categories(args: CategoriesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rows = input::load_catalog(args.source.data.as_deref())?;
    let projected = project_period(&rows, args.period)?;
    Ok(serde_json::to_value(category_breakdown(&projected))?)
}

pub fn run_rank(args: RankArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.limit == 0 {
        return Err("--limit must be at least 1".into());
    }
    let rows = input::load_catalog(args.source.data.as_deref())?;
    let projected = project_period(&rows, args.period)?;
    Ok(serde_json::to_value(rank_products(&projected, args.limit))?)
}
