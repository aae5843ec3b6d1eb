use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::period::PeriodRow;
use crate::types::{safe_div, Money, Percent, Quantity, Rate};

/// Headline business metrics for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    pub total_revenue: Money,
    /// Total contribution margin
    pub total_margin: Money,
    /// Aggregate margin / aggregate revenue * 100
    pub gross_profit_pct: Percent,
    pub units_sold: Quantity,
}

/// Reduce a period-projected table to its KPI snapshot.
///
/// The gross-profit percentage is the ratio of the totals, not the mean of
/// per-row percentages, so high-volume items weigh in proportionally.
pub fn compute_kpis(rows: &[PeriodRow]) -> KpiSnapshot {
    let total_revenue: Money = rows.iter().map(|r| r.period_revenue).sum();
    let total_margin: Money = rows.iter().map(|r| r.period_margin).sum();
    let units_sold: Quantity = rows.iter().map(|r| r.period_quantity).sum();

    let gross_profit_pct = if total_revenue > Decimal::ZERO {
        safe_div(total_margin, total_revenue) * dec!(100)
    } else {
        Decimal::ZERO
    };

    KpiSnapshot {
        total_revenue,
        total_margin,
        gross_profit_pct,
        units_sold,
    }
}

/// Relative change of each KPI against a prior period. A field is `None`
/// when the prior value is zero and the change is undefined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiDeltas {
    pub revenue_change: Option<Rate>,
    pub margin_change: Option<Rate>,
    pub gross_profit_pct_change: Option<Rate>,
    pub units_change: Option<Rate>,
}

impl KpiDeltas {
    pub fn between(current: &KpiSnapshot, prior: &KpiSnapshot) -> Self {
        KpiDeltas {
            revenue_change: relative_change(current.total_revenue, prior.total_revenue),
            margin_change: relative_change(current.total_margin, prior.total_margin),
            gross_profit_pct_change: relative_change(
                current.gross_profit_pct,
                prior.gross_profit_pct,
            ),
            units_change: relative_change(current.units_sold, prior.units_sold),
        }
    }
}

/// (current - prior) / prior, `None` when prior is zero or the change is
/// outside `Decimal` range.
pub fn relative_change(current: Decimal, prior: Decimal) -> Option<Rate> {
    if prior.is_zero() {
        return None;
    }
    (current - prior).checked_div(prior)
}
