use clap::Args;
use serde_json::{json, Value};

use menu_profit_core::analytics::kpi::{compute_kpis, KpiDeltas};
use menu_profit_core::analytics::period::{project_period, Period};

use super::DataArgs;
use crate::input;

/// Arguments for the period KPI snapshot
#[derive(Args)]
pub struct KpiArgs {
    #[command(flatten)]
    pub source: DataArgs,

    /// Period selector: q1, q2, q3, q4 or full-year
    #[arg(long, default_value = "full-year")]
    pub period: Period,

    /// Also report the previous quarter and the relative change
    #[arg(long)]
    pub compare: bool,
}

pub fn run_kpi(args: KpiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rows = input::load_catalog(args.source.data.as_deref())?;
    let kpis = compute_kpis(&project_period(&rows, args.period)?);

    if !args.compare {
        return Ok(json!({ "period": args.period, "kpis": kpis }));
    }

    let Some(prior_period) = args.period.previous() else {
        tracing::info!(period = %args.period, "no previous quarter to compare with");
        return Ok(json!({
            "period": args.period,
            "kpis": kpis,
            "prior_period": null,
            "prior_kpis": null,
            "deltas": null,
        }));
    };

    let prior = compute_kpis(&project_period(&rows, prior_period)?);
    let deltas = KpiDeltas::between(&kpis, &prior);
    Ok(json!({
        "period": args.period,
        "kpis": kpis,
        "prior_period": prior_period,
        "prior_kpis": prior,
        "deltas": deltas,
    }))
}
