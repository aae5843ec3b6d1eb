use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::period::PeriodRow;
use crate::error::MenuProfitError;
use crate::types::{checked_ratio, safe_div, Money, Quantity, Rate};
use crate::MenuProfitResult;

/// Upper bound of the charted volume range, relative to actual volume.
pub const CURVE_VOLUME_HEADROOM: Decimal = dec!(1.5);
/// Charted volume range when the period sold nothing.
pub const CURVE_DEFAULT_MAX_UNITS: Decimal = dec!(100);
/// Target number of sampled volumes along the curve.
pub const CURVE_SAMPLE_POINTS: Decimal = dec!(100);
/// Largest accepted fixed-cost figure.
pub const MAX_FIXED_COSTS: Money = dec!(1000000000000000);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Break-even analysis under a linear cost model.
///
/// Every ratio that would divide by zero is reported as zero, which reads as
/// "break-even undefined for this period" rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenResult {
    pub total_revenue: Money,
    pub total_margin: Money,
    pub total_quantity: Quantity,
    /// total_margin / total_revenue
    pub contribution_margin_ratio: Rate,
    /// fixed_costs / contribution_margin_ratio
    pub break_even_revenue: Money,
    /// total_margin / total_quantity
    pub average_unit_margin: Money,
    /// fixed_costs / average_unit_margin
    pub break_even_units: Quantity,
    pub fixed_costs: Money,
}

impl BreakEvenResult {
    /// True when the period's average contribution cannot cover fixed costs
    /// at any volume.
    pub fn is_unreachable(&self) -> bool {
        self.average_unit_margin < Decimal::ZERO || self.contribution_margin_ratio < Decimal::ZERO
    }
}

/// One sampled volume on the cost/revenue chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub units: Quantity,
    pub revenue: Money,
    pub variable_costs: Money,
    pub fixed_costs: Money,
    pub total_costs: Money,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct PeriodTotals {
    revenue: Money,
    margin: Money,
    quantity: Quantity,
}

fn period_totals(rows: &[PeriodRow]) -> PeriodTotals {
    rows.iter().fold(
        PeriodTotals {
            revenue: Decimal::ZERO,
            margin: Decimal::ZERO,
            quantity: Decimal::ZERO,
        },
        |acc, r| PeriodTotals {
            revenue: acc.revenue + r.period_revenue,
            margin: acc.margin + r.period_margin,
            quantity: acc.quantity + r.period_quantity,
        },
    )
}

fn validate_fixed_costs(fixed_costs: Money) -> MenuProfitResult<()> {
    if fixed_costs < Decimal::ZERO {
        return Err(MenuProfitError::InvalidInput {
            field: "fixed_costs".to_string(),
            reason: "Fixed costs cannot be negative".to_string(),
        });
    }
    if fixed_costs > MAX_FIXED_COSTS {
        return Err(MenuProfitError::InvalidInput {
            field: "fixed_costs".to_string(),
            reason: format!("Fixed costs must not exceed {}", MAX_FIXED_COSTS),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Function 1: calculate_break_even
// ---------------------------------------------------------------------------

/// Compute the break-even revenue and unit volume for a period-projected
/// table given the period's fixed costs.
pub fn calculate_break_even(
    fixed_costs: Money,
    rows: &[PeriodRow],
) -> MenuProfitResult<BreakEvenResult> {
    validate_fixed_costs(fixed_costs)?;

    let totals = period_totals(rows);

    // A period with no revenue or no units has no meaningful break-even,
    // including zero-priced catalogs that still sold units.
    let undefined = totals.revenue.is_zero() || totals.quantity.is_zero();

    let (contribution_margin_ratio, average_unit_margin) = if undefined {
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        (
            safe_div(totals.margin, totals.revenue),
            safe_div(totals.margin, totals.quantity),
        )
    };

    // A positive but vanishing margin pushes break-even beyond Decimal range
    let break_even_revenue =
        checked_ratio("break_even_revenue", fixed_costs, contribution_margin_ratio)?;
    let break_even_units = checked_ratio("break_even_units", fixed_costs, average_unit_margin)?;

    tracing::debug!(
        %fixed_costs,
        %break_even_revenue,
        %break_even_units,
        "computed break-even point"
    );

    Ok(BreakEvenResult {
        total_revenue: totals.revenue,
        total_margin: totals.margin,
        total_quantity: totals.quantity,
        contribution_margin_ratio,
        break_even_revenue,
        average_unit_margin,
        break_even_units,
        fixed_costs,
    })
}

// ---------------------------------------------------------------------------
// Function 2: break_even_curve
// ---------------------------------------------------------------------------

/// Sample revenue and cost lines over a range of hypothetical volumes.
///
/// Volumes run from 0 to 1.5x the period's actual quantity (0 to 100 when
/// nothing sold) in whole-unit steps of `max(1, max / 100)`. Prices and
/// variable costs are the period's volume-weighted averages, so the crossing
/// matches [`calculate_break_even`] to within one step.
pub fn break_even_curve(
    fixed_costs: Money,
    rows: &[PeriodRow],
) -> MenuProfitResult<Vec<CurvePoint>> {
    validate_fixed_costs(fixed_costs)?;

    let totals = period_totals(rows);
    let average_price = safe_div(totals.revenue, totals.quantity);
    let average_variable_cost = safe_div(totals.revenue - totals.margin, totals.quantity);

    let max_volume = if totals.quantity > Decimal::ZERO {
        (totals.quantity * CURVE_VOLUME_HEADROOM).trunc()
    } else {
        CURVE_DEFAULT_MAX_UNITS
    };
    let step = (max_volume / CURVE_SAMPLE_POINTS).floor().max(Decimal::ONE);

    let mut points = Vec::new();
    let mut units = Decimal::ZERO;
    while units <= max_volume {
        let revenue = average_price * units;
        let variable_costs = average_variable_cost * units;
        points.push(CurvePoint {
            units,
            revenue,
            variable_costs,
            fixed_costs,
            total_costs: fixed_costs + variable_costs,
        });
        units += step;
    }

    Ok(points)
}
