//! Catalog-wide structural rules over full-year figures.

use super::format::{format_pct_value, format_ratio_as_pct, slice_len};
use super::thresholds::{
    GOLDMINE_GAP_PP, LONG_TAIL_BOTTOM_FRACTION, LONG_TAIL_SHARE_THRESHOLD, PARETO_SHARE_THRESHOLD,
    PARETO_TOP_FRACTION, WORKHORSE_GAP_PP,
};
use super::{Insight, InsightRule};
use crate::analytics::breakdown::{group_by_category, CategoryTotals};
use crate::analytics::enrichment::AnnualizedRow;
use crate::error::MenuProfitError;
use crate::types::{safe_div, Money};
use crate::MenuProfitResult;

/// Signature shared by every structural rule.
pub type StructuralRuleFn = fn(&[AnnualizedRow]) -> Vec<Insight>;

/// A named entry in the rule registry.
#[derive(Clone, Copy)]
pub struct StructuralRule {
    pub name: &'static str,
    pub evaluate: StructuralRuleFn,
}

/// Registry in reporting order.
pub const STRUCTURAL_RULES: [StructuralRule; 4] = [
    StructuralRule {
        name: "pareto",
        evaluate: pareto_concentration,
    },
    StructuralRule {
        name: "long_tail",
        evaluate: long_tail,
    },
    StructuralRule {
        name: "workhorse",
        evaluate: workhorse_categories,
    },
    StructuralRule {
        name: "goldmine",
        evaluate: goldmine_categories,
    },
];

/// Run every structural rule and concatenate their findings in registry order.
pub fn analyze_structure(rows: &[AnnualizedRow]) -> Vec<Insight> {
    STRUCTURAL_RULES
        .iter()
        .flat_map(|rule| (rule.evaluate)(rows))
        .collect()
}

/// Run a caller-selected subset of rules, still in registry order. Names are
/// matched case-insensitively and `-` is accepted for `_`.
pub fn analyze_structure_with(
    rows: &[AnnualizedRow],
    names: &[&str],
) -> MenuProfitResult<Vec<Insight>> {
    let wanted: Vec<String> = names
        .iter()
        .map(|n| n.trim().to_ascii_lowercase().replace('-', "_"))
        .collect();

    if let Some(unknown) = wanted
        .iter()
        .find(|w| !STRUCTURAL_RULES.iter().any(|r| r.name == w.as_str()))
    {
        return Err(MenuProfitError::InvalidInput {
            field: "rule".to_string(),
            reason: format!(
                "unknown rule '{}' (expected one of: {})",
                unknown,
                rule_names().join(", ")
            ),
        });
    }

    Ok(STRUCTURAL_RULES
        .iter()
        .filter(|rule| wanted.iter().any(|w| w == rule.name))
        .flat_map(|rule| (rule.evaluate)(rows))
        .collect())
}

pub fn rule_names() -> Vec<&'static str> {
    STRUCTURAL_RULES.iter().map(|r| r.name).collect()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn total_margin(rows: &[AnnualizedRow]) -> Money {
    rows.iter().map(|r| r.total_margin).sum()
}

fn total_revenue(rows: &[AnnualizedRow]) -> Money {
    rows.iter().map(|r| r.total_revenue).sum()
}

/// Margins sorted descending (`descending = true`) or ascending.
fn sorted_margins(rows: &[AnnualizedRow], descending: bool) -> Vec<Money> {
    let mut margins: Vec<Money> = rows.iter().map(|r| r.total_margin).collect();
    if descending {
        margins.sort_by(|a, b| b.cmp(a));
    } else {
        margins.sort();
    }
    margins
}

/// Category totals, or `None` when catalog revenue or margin is zero and
/// shares are undefined.
fn category_shares(rows: &[AnnualizedRow]) -> Option<Vec<CategoryTotals>> {
    if total_revenue(rows).is_zero() || total_margin(rows).is_zero() {
        tracing::debug!("zero catalog revenue or margin; category rules skipped");
        return None;
    }
    Some(group_by_category(rows.iter().map(|r| {
        (r.product.category.as_str(), r.total_revenue, r.total_margin)
    })))
}

// ---------------------------------------------------------------------------
// Rule 1: Pareto concentration
// ---------------------------------------------------------------------------

/// Flag when the top 20% of products by margin hold more than 80% of it.
pub fn pareto_concentration(rows: &[AnnualizedRow]) -> Vec<Insight> {
    let total = total_margin(rows);
    if total.is_zero() {
        return Vec::new();
    }

    let top_n = slice_len(rows.len(), PARETO_TOP_FRACTION);
    let top_margin: Money = sorted_margins(rows, true).into_iter().take(top_n).sum();
    let share = safe_div(top_margin, total);

    if share <= PARETO_SHARE_THRESHOLD {
        return Vec::new();
    }
    tracing::debug!(%share, top_n, "pareto concentration detected");

    vec![Insight::new(
        InsightRule::ParetoConcentration,
        None,
        "Strong Profit Concentration (Pareto Principle)",
        format!(
            "Roughly {}% of total margin is generated by just 20% of the products \
             on the menu ({} of {}).",
            format_ratio_as_pct(share, 0),
            top_n,
            rows.len()
        ),
        "The business rests on a very strong core of 'champion' products, but this \
         creates a strong strategic dependency on them.",
        "Protecting these key products (quality, availability, pricing) is the top \
         priority. Consider marketing that uses them as a draw to bring customers in.",
    )]
}

// ---------------------------------------------------------------------------
// Rule 2: Long tail
// ---------------------------------------------------------------------------

/// Flag when the bottom half of products by margin hold less than 5% of it.
pub fn long_tail(rows: &[AnnualizedRow]) -> Vec<Insight> {
    let total = total_margin(rows);
    if total.is_zero() {
        return Vec::new();
    }

    let bottom_n = slice_len(rows.len(), LONG_TAIL_BOTTOM_FRACTION);
    let bottom_margin: Money = sorted_margins(rows, false).into_iter().take(bottom_n).sum();
    let share = safe_div(bottom_margin, total);

    if share >= LONG_TAIL_SHARE_THRESHOLD {
        return Vec::new();
    }
    tracing::debug!(%share, bottom_n, "unproductive long tail detected");

    vec![Insight::new(
        InsightRule::LongTail,
        None,
        "Unproductive Long Tail",
        format!(
            "The weakest half of the product portfolio ({} of {} products) generates \
             just {}% of total margin.",
            bottom_n,
            rows.len(),
            format_ratio_as_pct(share, 1)
        ),
        "A significant number of menu items add operational complexity and inventory \
         cost without contributing meaningfully to profitability.",
        "Consider a strategic slimming of the menu. Removing the weakest performers \
         reduces complexity and steers customers toward the most profitable offer.",
    )]
}

// ---------------------------------------------------------------------------
// Rule 3: Workhorse categories
// ---------------------------------------------------------------------------

/// Flag each category whose revenue share exceeds its margin share by more
/// than 15 percentage points.
pub fn workhorse_categories(rows: &[AnnualizedRow]) -> Vec<Insight> {
    let Some(categories) = category_shares(rows) else {
        return Vec::new();
    };

    categories
        .into_iter()
        .filter(|c| c.revenue_share_pct - c.margin_share_pct > WORKHORSE_GAP_PP)
        .map(|c| {
            tracing::debug!(category = %c.category, "workhorse category detected");
            Insight::new(
                InsightRule::WorkhorseCategory,
                Some(c.category.clone()),
                "Workhorse Category Identified",
                format!(
                    "The '{}' category is very popular, generating {}% of total revenue, \
                     but contributes only {}% of overall margin.",
                    c.category,
                    format_pct_value(c.revenue_share_pct, 0),
                    format_pct_value(c.margin_share_pct, 0)
                ),
                "This category draws a high volume of customers, but its low average \
                 profitability is weighing down the company's total margin.",
                "Start a targeted optimization of this category. Review the prime costs of \
                 its three best-selling products and evaluate small, strategic price increases.",
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Rule 4: Goldmine categories
// ---------------------------------------------------------------------------

/// Flag each category whose margin share exceeds its revenue share by more
/// than 10 percentage points.
pub fn goldmine_categories(rows: &[AnnualizedRow]) -> Vec<Insight> {
    let Some(categories) = category_shares(rows) else {
        return Vec::new();
    };

    categories
        .into_iter()
        .filter(|c| c.margin_share_pct - c.revenue_share_pct > GOLDMINE_GAP_PP)
        .map(|c| {
            tracing::debug!(category = %c.category, "goldmine category detected");
            Insight::new(
                InsightRule::GoldmineCategory,
                Some(c.category.clone()),
                "Goldmine Category Identified",
                format!(
                    "The '{}' category is a hidden profit engine. It contributes only {}% \
                     of revenue, but generates {}% of total margin.",
                    c.category,
                    format_pct_value(c.revenue_share_pct, 0),
                    format_pct_value(c.margin_share_pct, 0)
                ),
                "Every sale in this category has an outsized impact on profitability. \
                 There is a large opportunity if its volumes can be grown.",
                "Use up-selling and cross-selling to steer customers toward this category, \
                 and train staff to propose it actively.",
            )
        })
        .collect()
}
