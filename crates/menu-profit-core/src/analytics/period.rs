use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::catalog::schema::{validate_rows, ProductRow};
use crate::error::MenuProfitError;
use crate::types::{safe_div, Money, Percent, Quantity};
use crate::MenuProfitResult;

// ---------------------------------------------------------------------------
// Period selector
// ---------------------------------------------------------------------------

/// Analysis window: a single quarter or the whole year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Q1,
    Q2,
    Q3,
    Q4,
    FullYear,
}

impl Period {
    pub const QUARTERS: [Period; 4] = [Period::Q1, Period::Q2, Period::Q3, Period::Q4];

    /// Zero-based quarter index, `None` for the full year.
    pub fn quarter_index(self) -> Option<usize> {
        match self {
            Period::Q1 => Some(0),
            Period::Q2 => Some(1),
            Period::Q3 => Some(2),
            Period::Q4 => Some(3),
            Period::FullYear => None,
        }
    }

    /// The quarter immediately before this one. Q1 and the full year have no
    /// comparable prior period within a single-year dataset.
    pub fn previous(self) -> Option<Period> {
        match self {
            Period::Q2 => Some(Period::Q1),
            Period::Q3 => Some(Period::Q2),
            Period::Q4 => Some(Period::Q3),
            Period::Q1 | Period::FullYear => None,
        }
    }

    /// Units sold by `row` within this period.
    pub fn quantity_of(self, row: &ProductRow) -> Quantity {
        let quarters = row.quarterly_sales();
        match self.quarter_index() {
            Some(i) => quarters[i],
            None => quarters.iter().copied().sum(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Period::Q1 => "Q1",
            Period::Q2 => "Q2",
            Period::Q3 => "Q3",
            Period::Q4 => "Q4",
            Period::FullYear => "Full Year",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Period {
    type Err = MenuProfitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "q1" => Ok(Period::Q1),
            "q2" => Ok(Period::Q2),
            "q3" => Ok(Period::Q3),
            "q4" => Ok(Period::Q4),
            "full-year" | "full_year" | "fullyear" | "full year" | "fy" | "year" => {
                Ok(Period::FullYear)
            }
            _ => Err(MenuProfitError::InvalidPeriod(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Period projection
// ---------------------------------------------------------------------------

/// A product row re-derived for one analysis period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRow {
    #[serde(flatten)]
    pub product: ProductRow,
    pub period: Period,
    pub period_quantity: Quantity,
    /// sale_price * period_quantity
    pub period_revenue: Money,
    /// sale_price - prime_cost
    pub unit_margin: Money,
    /// unit_margin * period_quantity
    pub period_margin: Money,
}

impl PeriodRow {
    /// Derive the period figures. Expects a row that passed
    /// [`ProductRow::validate`].
    pub fn from_product(product: &ProductRow, period: Period) -> Self {
        let period_quantity = period.quantity_of(product);
        let unit_margin = product.unit_margin();
        PeriodRow {
            product: product.clone(),
            period,
            period_quantity,
            period_revenue: product.sale_price * period_quantity,
            unit_margin,
            period_margin: unit_margin * period_quantity,
        }
    }
}

/// Project every row onto `period`. Pure: the input is left untouched and
/// row order is preserved.
pub fn project_period(rows: &[ProductRow], period: Period) -> MenuProfitResult<Vec<PeriodRow>> {
    validate_rows(rows)?;
    Ok(rows
        .iter()
        .map(|row| PeriodRow::from_product(row, period))
        .collect())
}

// ---------------------------------------------------------------------------
// Quarter-by-quarter summary
// ---------------------------------------------------------------------------

/// Catalog-wide totals for one quarter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterSummary {
    pub period: Period,
    pub revenue: Money,
    pub margin: Money,
    /// margin / revenue * 100, zero when revenue is not positive
    pub profitability_pct: Percent,
}

/// Revenue, margin and profitability for each of the four quarters, in
/// calendar order. Feeds the full-year trend chart.
pub fn quarterly_summary(rows: &[ProductRow]) -> MenuProfitResult<Vec<QuarterSummary>> {
    validate_rows(rows)?;
    Ok(Period::QUARTERS
        .iter()
        .map(|&period| {
            let (revenue, margin) = rows.iter().fold(
                (Decimal::ZERO, Decimal::ZERO),
                |(rev, mar), row| {
                    let qty = period.quantity_of(row);
                    (rev + row.sale_price * qty, mar + row.unit_margin() * qty)
                },
            );
            let profitability_pct = if revenue > Decimal::ZERO {
                safe_div(margin, revenue) * dec!(100)
            } else {
                Decimal::ZERO
            };
            QuarterSummary {
                period,
                revenue,
                margin,
                profitability_pct,
            }
        })
        .collect())
}
