use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use menu_profit_core::analytics::breakeven::{break_even_curve, calculate_break_even};
use menu_profit_core::analytics::period::{project_period, Period};

use super::DataArgs;
use crate::input;

/// Arguments for break-even analysis
#[derive(Args)]
pub struct BreakevenArgs {
    #[command(flatten)]
    pub source: DataArgs,

    /// Period selector: q1, q2, q3, q4 or full-year
    #[arg(long, default_value = "full-year")]
    pub period: Period,

    /// Fixed costs for the selected period
    #[arg(long)]
    pub fixed_costs: Decimal,

    /// Include the sampled revenue/cost curve
    #[arg(long)]
    pub curve: bool,
}

pub fn run_breakeven(args: BreakevenArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rows = input::load_catalog(args.source.data.as_deref())?;
    let projected = project_period(&rows, args.period)?;
    let result = calculate_break_even(args.fixed_costs, &projected)?;

    if result.is_unreachable() {
        tracing::warn!("average unit margin is negative; break-even cannot be reached");
    }

    if !args.curve {
        return Ok(serde_json::to_value(result)?);
    }

    let curve = break_even_curve(args.fixed_costs, &projected)?;
    Ok(json!({
        "period": args.period,
        "break_even": result,
        "curve": curve,
    }))
}
