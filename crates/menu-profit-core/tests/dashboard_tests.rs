#![cfg(feature = "dashboard")]

use menu_profit_core::analytics::period::Period;
use menu_profit_core::dashboard::{build_dashboard, dashboard_input_from_json};
use menu_profit_core::insights::InsightRule;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

fn request(period: &str, fixed_costs: serde_json::Value) -> serde_json::Value {
    json!({
        "period": period,
        "fixed_costs": fixed_costs,
        "products": [
            { "product_name": "Margherita", "category": "Pizza", "sale_price": 8, "prime_cost": 2,
              "sales_q1": 100, "sales_q2": 120, "sales_q3": 140, "sales_q4": 160 },
            { "product_name": "Lemonade", "category": "Drinks",
              "sale_price": "3.5", "prime_cost": "0.5",
              "sales_q1": 50, "sales_q2": 50, "sales_q3": 60, "sales_q4": 70 },
            { "product_name": "Cannoli", "category": "Dessert", "sale_price": 4, "prime_cost": 1.5,
              "sales_q1": 20, "sales_q2": 25, "sales_q3": 30, "sales_q4": 10 }
        ]
    })
}

#[test]
fn test_quarter_dashboard_end_to_end() {
    let input = dashboard_input_from_json(&request("Q2", json!(1500))).unwrap();
    let out = build_dashboard(&input).unwrap();
    let r = out.result;

    // Q2: revenue 960 + 175 + 100 = 1235, margin 720 + 150 + 62.5 = 932.5
    assert_eq!(r.kpis.total_revenue, dec!(1235));
    assert_eq!(r.kpis.total_margin, dec!(932.5));
    assert_eq!(r.prior_period, Some(Period::Q1));

    // Q1 margin: 600 + 150 + 50 = 800 => +16.6%
    assert_eq!(r.insights[0].rule, InsightRule::PositiveTrend);
    assert!(r.insights[0].observation.contains("grew by 16.6%"));

    let be = r.break_even.unwrap();
    assert_eq!(be.fixed_costs, dec!(1500));
    assert!(be.break_even_revenue > Decimal::ZERO);
    assert!(!r.break_even_curve.is_empty());
    assert!(r.quarterly.is_empty());
    assert!(out.warnings.is_empty());
}

#[test]
fn test_full_year_dashboard_includes_quarters() {
    let input = dashboard_input_from_json(&request("full-year", json!(null))).unwrap();
    let out = build_dashboard(&input).unwrap();
    assert_eq!(out.result.quarterly.len(), 4);
    assert!(out.result.prior_kpis.is_none());
    assert!(out.result.break_even.is_none());
    assert_eq!(out.warnings.len(), 1);
    assert_eq!(out.metadata.precision, "rust_decimal_128bit");
}

#[test]
fn test_zero_revenue_period_warns() {
    let input = dashboard_input_from_json(&json!({
        "period": "q3",
        "fixed_costs": "100",
        "products": [
            { "product_name": "Pie", "category": "Dessert", "sale_price": 4, "prime_cost": 1,
              "sales_q1": 10, "sales_q2": 10, "sales_q3": 0, "sales_q4": 10 }
        ]
    }))
    .unwrap();
    let out = build_dashboard(&input).unwrap();
    assert!(out.warnings.iter().any(|w| w.contains("has no revenue")));
    let be = out.result.break_even.unwrap();
    assert_eq!(be.break_even_units, Decimal::ZERO);
    assert_eq!(out.result.break_even_curve.len(), 101);
}

#[test]
fn test_missing_column_rejected() {
    let err = dashboard_input_from_json(&json!({
        "products": [{ "product_name": "Pie", "category": "Dessert" }]
    }))
    .unwrap_err();
    assert!(err.to_string().contains("sale_price"));
}
