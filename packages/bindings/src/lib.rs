//! Node bindings. Every function takes a JSON request string and returns a
//! JSON string.
//!
//! Requests share one shape: `{ "products": [...], "period": "q2",
//! "fixed_costs": 1500, "ranking_limit": 10, "rules": ["pareto"] }`, with
//! only the fields an operation needs. A bare product array is accepted where
//! nothing else is needed.

use napi::Result as NapiResult;
use napi_derive::napi;
use serde_json::Value;

use menu_profit_core::analytics::{breakeven, enrichment, kpi, period};
use menu_profit_core::catalog::json::catalog_from_json;
use menu_profit_core::dashboard::{self, DashboardInput};
use menu_profit_core::insights;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_request(input_json: &str) -> NapiResult<DashboardInput> {
    let value: Value = serde_json::from_str(input_json).map_err(to_napi_error)?;
    if value.is_array() {
        let products = catalog_from_json(&value).map_err(to_napi_error)?;
        return Ok(DashboardInput {
            products,
            period: period::Period::FullYear,
            fixed_costs: None,
            ranking_limit: None,
        });
    }
    dashboard::dashboard_input_from_json(&value).map_err(to_napi_error)
}

fn require_fixed_costs(request: &DashboardInput) -> NapiResult<rust_decimal::Decimal> {
    request
        .fixed_costs
        .ok_or_else(|| napi::Error::from_reason("fixed_costs is required".to_string()))
}

// ---------------------------------------------------------------------------
// Catalog analytics
// ---------------------------------------------------------------------------

#[napi]
pub fn enrich_catalog(input_json: String) -> NapiResult<String> {
    let request = parse_request(&input_json)?;
    let output = enrichment::enrich(&request.products).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn project_period(input_json: String) -> NapiResult<String> {
    let request = parse_request(&input_json)?;
    let output =
        period::project_period(&request.products, request.period).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compute_kpis(input_json: String) -> NapiResult<String> {
    let request = parse_request(&input_json)?;
    let rows = period::project_period(&request.products, request.period).map_err(to_napi_error)?;
    serde_json::to_string(&kpi::compute_kpis(&rows)).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Break-even
// ---------------------------------------------------------------------------

#[napi]
pub fn break_even(input_json: String) -> NapiResult<String> {
    let request = parse_request(&input_json)?;
    let fixed_costs = require_fixed_costs(&request)?;
    let rows = period::project_period(&request.products, request.period).map_err(to_napi_error)?;
    let output = breakeven::calculate_break_even(fixed_costs, &rows).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn break_even_curve(input_json: String) -> NapiResult<String> {
    let request = parse_request(&input_json)?;
    let fixed_costs = require_fixed_costs(&request)?;
    let rows = period::project_period(&request.products, request.period).map_err(to_napi_error)?;
    let output = breakeven::break_even_curve(fixed_costs, &rows).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Insights
// ---------------------------------------------------------------------------

#[napi]
pub fn trend_insights(input_json: String) -> NapiResult<String> {
    let request = parse_request(&input_json)?;
    let current = kpi::compute_kpis(
        &period::project_period(&request.products, request.period).map_err(to_napi_error)?,
    );
    let prior = match request.period.previous() {
        Some(p) => Some(kpi::compute_kpis(
            &period::project_period(&request.products, p).map_err(to_napi_error)?,
        )),
        None => None,
    };
    let output = insights::analyze_trend(&current, prior.as_ref());
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn structural_insights(input_json: String) -> NapiResult<String> {
    let value: Value = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let products = catalog_from_json(&value).map_err(to_napi_error)?;
    let rows = enrichment::enrich(&products).map_err(to_napi_error)?;

    let rules: Vec<&str> = value
        .get("rules")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let output = if rules.is_empty() {
        insights::analyze_structure(&rows)
    } else {
        insights::analyze_structure_with(&rows, &rules).map_err(to_napi_error)?
    };
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[napi]
pub fn build_dashboard(input_json: String) -> NapiResult<String> {
    let request = parse_request(&input_json)?;
    let output = dashboard::build_dashboard(&request).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
