use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

use crate::analytics::breakdown::{
    category_breakdown, rank_products, CategoryTotals, ProductRanking, DEFAULT_RANKING_LIMIT,
};
use crate::analytics::breakeven::{
    break_even_curve, calculate_break_even, BreakEvenResult, CurvePoint,
};
use crate::analytics::enrichment::enrich;
use crate::analytics::kpi::{compute_kpis, KpiDeltas, KpiSnapshot};
use crate::analytics::period::{project_period, quarterly_summary, Period, QuarterSummary};
use crate::catalog::json::catalog_from_json;
use crate::catalog::schema::{parse_decimal, ProductRow};
use crate::error::MenuProfitError;
use crate::insights::{analyze_structure, analyze_trend, Insight};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::MenuProfitResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Everything needed to build the dashboard for one period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardInput {
    pub products: Vec<ProductRow>,
    pub period: Period,
    /// Fixed costs for the period. Absent or zero skips break-even analysis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_costs: Option<Money>,
    /// Products per ranking list, defaults to 10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranking_limit: Option<usize>,
}

/// Full dashboard for one period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardOutput {
    pub period: Period,
    pub kpis: KpiSnapshot,
    /// Previous quarter, when the period has one
    pub prior_period: Option<Period>,
    pub prior_kpis: Option<KpiSnapshot>,
    pub kpi_deltas: Option<KpiDeltas>,
    pub break_even: Option<BreakEvenResult>,
    pub break_even_curve: Vec<CurvePoint>,
    /// Quarter-by-quarter totals, only for the full-year view
    pub quarterly: Vec<QuarterSummary>,
    pub categories: Vec<CategoryTotals>,
    pub ranking: ProductRanking,
    /// Trend insight (if any) followed by structural insights
    pub insights: Vec<Insight>,
}

// ---------------------------------------------------------------------------
// Input parsing
// ---------------------------------------------------------------------------

/// Parse a dashboard request from JSON, routing the product table through
/// the catalog loader so missing columns surface as such.
///
/// `period` defaults to the full year when absent.
pub fn dashboard_input_from_json(value: &Value) -> MenuProfitResult<DashboardInput> {
    let products = catalog_from_json(value)?;

    let period = match value.get("period") {
        Some(Value::String(s)) => s.parse::<Period>()?,
        Some(Value::Null) | None => Period::FullYear,
        Some(other) => return Err(MenuProfitError::InvalidPeriod(other.to_string())),
    };

    let fixed_costs = match value.get("fixed_costs") {
        Some(Value::Null) | None => None,
        Some(Value::Number(n)) => Some(decimal_field("fixed_costs", &n.to_string())?),
        Some(Value::String(s)) => Some(decimal_field("fixed_costs", s)?),
        Some(other) => Some(decimal_field("fixed_costs", &other.to_string())?),
    };

    let ranking_limit = match value.get("ranking_limit") {
        Some(Value::Null) | None => None,
        Some(v) => Some(v.as_u64().ok_or_else(|| MenuProfitError::InvalidInput {
            field: "ranking_limit".to_string(),
            reason: "expected a non-negative integer".to_string(),
        })? as usize),
    };

    Ok(DashboardInput {
        products,
        period,
        fixed_costs,
        ranking_limit,
    })
}

fn decimal_field(field: &str, raw: &str) -> MenuProfitResult<Decimal> {
    parse_decimal(raw).ok_or_else(|| MenuProfitError::InvalidInput {
        field: field.to_string(),
        reason: format!("expected a number, got '{}'", raw),
    })
}

// ---------------------------------------------------------------------------
// Function: build_dashboard
// ---------------------------------------------------------------------------

/// Compose KPIs, prior-quarter comparison, break-even, breakdowns, rankings
/// and insights for the selected period.
pub fn build_dashboard(
    input: &DashboardInput,
) -> MenuProfitResult<ComputationOutput<DashboardOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if let Some(fc) = input.fixed_costs {
        if fc < Decimal::ZERO {
            return Err(MenuProfitError::InvalidInput {
                field: "fixed_costs".to_string(),
                reason: "Fixed costs cannot be negative".to_string(),
            });
        }
    }

    if input.products.is_empty() {
        warnings.push("Catalog is empty; all figures are zero".to_string());
    }

    // --- Period KPIs ---
    let period_rows = project_period(&input.products, input.period)?;
    let kpis = compute_kpis(&period_rows);
    if kpis.total_revenue.is_zero() && !input.products.is_empty() {
        tracing::warn!(period = %input.period, "period has no revenue");
        warnings.push(format!(
            "{} has no revenue; ratios default to zero",
            input.period
        ));
    }

    // --- Prior quarter ---
    let prior_period = input.period.previous();
    let prior_kpis = match prior_period {
        Some(p) => Some(compute_kpis(&project_period(&input.products, p)?)),
        None => None,
    };
    let kpi_deltas = prior_kpis
        .as_ref()
        .map(|prior| KpiDeltas::between(&kpis, prior));

    // --- Break-even ---
    let (break_even, curve) = match input.fixed_costs {
        Some(fc) if fc > Decimal::ZERO => {
            let result = calculate_break_even(fc, &period_rows)?;
            if result.is_unreachable() {
                warnings.push(
                    "Average contribution margin is negative; break-even is unreachable"
                        .to_string(),
                );
            }
            (Some(result), break_even_curve(fc, &period_rows)?)
        }
        _ => {
            warnings.push("Fixed costs not provided; break-even analysis skipped".to_string());
            (None, Vec::new())
        }
    };

    // --- Breakdowns ---
    let quarterly = if input.period == Period::FullYear {
        quarterly_summary(&input.products)?
    } else {
        Vec::new()
    };
    let categories = category_breakdown(&period_rows);
    let ranking = rank_products(
        &period_rows,
        input.ranking_limit.unwrap_or(DEFAULT_RANKING_LIMIT),
    );

    // --- Insights ---
    let annual_rows = enrich(&input.products)?;
    let mut insights = analyze_trend(&kpis, prior_kpis.as_ref());
    insights.extend(analyze_structure(&annual_rows));

    tracing::debug!(
        period = %input.period,
        products = input.products.len(),
        insights = insights.len(),
        "dashboard built"
    );

    let output = DashboardOutput {
        period: input.period,
        kpis,
        prior_period,
        prior_kpis,
        kpi_deltas,
        break_even,
        break_even_curve: curve,
        quarterly,
        categories,
        ranking,
        insights,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Period KPI, Break-even and Rule-based Insight Dashboard",
        &serde_json::json!({
            "period": input.period,
            "products": input.products.len(),
            "fixed_costs": input.fixed_costs.map(|fc| fc.to_string()),
            "ranking_limit": input.ranking_limit.unwrap_or(DEFAULT_RANKING_LIMIT),
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::schema::fixtures::product;
    use crate::insights::InsightRule;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn menu() -> Vec<ProductRow> {
        vec![
            product(
                "Margherita",
                "Pizza",
                dec!(8),
                dec!(2),
                [dec!(100), dec!(120), dec!(90), dec!(110)],
            ),
            product("Diavola", "Pizza", dec!(9), dec!(3), [dec!(60), dec!(70), dec!(50), dec!(65)]),
            product(
                "Tiramisu",
                "Dessert",
                dec!(6),
                dec!(1.5),
                [dec!(30), dec!(35), dec!(20), dec!(40)],
            ),
        ]
    }

    fn input(period: Period, fixed_costs: Option<Money>) -> DashboardInput {
        DashboardInput {
            products: menu(),
            period,
            fixed_costs,
            ranking_limit: None,
        }
    }

    #[test]
    fn test_full_year_dashboard() {
        let out = build_dashboard(&input(Period::FullYear, Some(dec!(3000)))).unwrap();
        let r = &out.result;
        assert_eq!(r.period, Period::FullYear);
        assert_eq!(r.quarterly.len(), 4);
        assert!(r.prior_kpis.is_none());
        assert!(r.break_even.is_some());
        assert!(!r.break_even_curve.is_empty());
        assert_eq!(r.categories.len(), 2);
        assert_eq!(r.ranking.top.len(), 3);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_quarter_dashboard_has_prior_comparison() {
        let out = build_dashboard(&input(Period::Q3, Some(dec!(1000)))).unwrap();
        let r = &out.result;
        assert_eq!(r.prior_period, Some(Period::Q2));
        assert!(r.prior_kpis.is_some());
        assert!(r.kpi_deltas.is_some());
        assert!(r.quarterly.is_empty());
        // Q2 margin = 720 + 420 + 157.5 = 1297.5, Q3 = 540 + 300 + 90 = 930 (-28%)
        assert_eq!(r.insights[0].rule, InsightRule::NegativeTrend);
    }

    #[test]
    fn test_missing_fixed_costs_warns() {
        let out = build_dashboard(&input(Period::Q1, None)).unwrap();
        assert!(out.result.break_even.is_none());
        assert!(out.result.break_even_curve.is_empty());
        assert!(out
            .warnings
            .iter()
            .any(|w| w.contains("break-even analysis skipped")));
    }

    #[test]
    fn test_zero_fixed_costs_skips_break_even() {
        let out = build_dashboard(&input(Period::Q1, Some(dec!(0)))).unwrap();
        assert!(out.result.break_even.is_none());
    }

    #[test]
    fn test_negative_fixed_costs_rejected() {
        assert!(build_dashboard(&input(Period::Q1, Some(dec!(-5)))).is_err());
    }

    #[test]
    fn test_empty_catalog_warns() {
        let out = build_dashboard(&DashboardInput {
            products: vec![],
            period: Period::Q2,
            fixed_costs: Some(dec!(100)),
            ranking_limit: Some(5),
        })
        .unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("Catalog is empty")));
        assert_eq!(out.result.kpis.total_revenue, Decimal::ZERO);
        assert!(out.result.insights.is_empty());
    }

    #[test]
    fn test_input_from_json() {
        let value = json!({
            "period": "q2",
            "fixed_costs": 2500,
            "ranking_limit": 3,
            "products": [{
                "product_name": "Margherita",
                "category": "Pizza",
                "sale_price": 8,
                "prime_cost": 2,
                "sales_q1": 1, "sales_q2": 2, "sales_q3": 3, "sales_q4": 4
            }]
        });
        let parsed = dashboard_input_from_json(&value).unwrap();
        assert_eq!(parsed.period, Period::Q2);
        assert_eq!(parsed.fixed_costs, Some(dec!(2500)));
        assert_eq!(parsed.ranking_limit, Some(3));
        assert_eq!(parsed.products.len(), 1);
    }

    #[test]
    fn test_input_from_json_defaults_to_full_year() {
        let parsed = dashboard_input_from_json(&json!({ "products": [] })).unwrap();
        assert_eq!(parsed.period, Period::FullYear);
        assert_eq!(parsed.fixed_costs, None);
    }

    #[test]
    fn test_input_from_json_bad_period() {
        let value = json!({ "products": [], "period": "Q9" });
        let err = dashboard_input_from_json(&value).unwrap_err();
        assert!(matches!(err, MenuProfitError::InvalidPeriod(_)));
    }
}
