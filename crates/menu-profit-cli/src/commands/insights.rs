use clap::Args;
use serde_json::Value;

use menu_profit_core::analytics::enrichment::enrich;
use menu_profit_core::analytics::kpi::compute_kpis;
use menu_profit_core::analytics::period::{project_period, Period};
use menu_profit_core::insights::{analyze_structure, analyze_structure_with, analyze_trend};

use super::DataArgs;
use crate::input;

/// Arguments for rule-based insights
#[derive(Args)]
pub struct InsightsArgs {
    #[command(flatten)]
    pub source: DataArgs,

    /// Period for the margin trend rule; quarters 2-4 compare with the previous quarter
    #[arg(long)]
    pub period: Option<Period>,

    /// Structural rules to run (pareto, long_tail, workhorse, goldmine); all when omitted
    #[arg(long = "rule", value_delimiter = ',')]
    pub rules: Vec<String>,
}

pub fn run_insights(args: InsightsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rows = input::load_catalog(args.source.data.as_deref())?;

    let mut insights = Vec::new();

    if let Some(period) = args.period {
        let current = compute_kpis(&project_period(&rows, period)?);
        let prior = match period.previous() {
            Some(p) => Some(compute_kpis(&project_period(&rows, p)?)),
            None => None,
        };
        insights.extend(analyze_trend(&current, prior.as_ref()));
    }

    let annual = enrich(&rows)?;
    if args.rules.is_empty() {
        insights.extend(analyze_structure(&annual));
    } else {
        let names: Vec<&str> = args.rules.iter().map(String::as_str).collect();
        insights.extend(analyze_structure_with(&annual, &names)?);
    }

    tracing::debug!(count = insights.len(), "insights evaluated");
    Ok(serde_json::to_value(insights)?)
}
