use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use menu_profit_core::analytics::period::Period;
use menu_profit_core::dashboard::{build_dashboard, DashboardInput};

use super::DataArgs;
use crate::input;

/// Arguments for the full period dashboard
#[derive(Args)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub source: DataArgs,

    /// Period selector: q1, q2, q3, q4 or full-year
    #[arg(long, default_value = "full-year")]
    pub period: Period,

    /// Fixed costs for the period; omit to skip break-even analysis
    #[arg(long)]
    pub fixed_costs: Option<Decimal>,

    /// Products per ranking list
    #[arg(long)]
    pub limit: Option<usize>,
}

pub fn run_dashboard(args: DashboardArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let products = input::load_catalog(args.source.data.as_deref())?;
    let dashboard_input = DashboardInput {
        products,
        period: args.period,
        fixed_costs: args.fixed_costs,
        ranking_limit: args.limit,
    };
    let result = build_dashboard(&dashboard_input)?;
    Ok(serde_json::to_value(result)?)
}
