use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::period::PeriodRow;
use crate::types::{safe_div, Money, Percent};

/// Default number of products shown in each ranking list.
pub const DEFAULT_RANKING_LIMIT: usize = 10;

/// Revenue and margin summed over one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub category: String,
    pub revenue: Money,
    pub margin: Money,
    /// Share of catalog revenue, 0-100
    pub revenue_share_pct: Percent,
    /// Share of catalog margin, 0-100
    pub margin_share_pct: Percent,
}

/// Best and worst products of a period by margin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRanking {
    /// Highest period margin first
    pub top: Vec<PeriodRow>,
    /// Lowest period margin first
    pub bottom: Vec<PeriodRow>,
}

/// Group `(category, revenue, margin)` triples by category, ascending by
/// category name. Shares are zero when the corresponding catalog total is zero.
pub fn group_by_category<'a, I>(items: I) -> Vec<CategoryTotals>
where
    I: IntoIterator<Item = (&'a str, Money, Money)>,
{
    let mut groups: BTreeMap<&'a str, (Money, Money)> = BTreeMap::new();
    for (category, revenue, margin) in items {
        let entry = groups.entry(category).or_insert((Decimal::ZERO, Decimal::ZERO));
        entry.0 += revenue;
        entry.1 += margin;
    }

    let total_revenue: Money = groups.values().map(|(r, _)| *r).sum();
    let total_margin: Money = groups.values().map(|(_, m)| *m).sum();

    groups
        .into_iter()
        .map(|(category, (revenue, margin))| CategoryTotals {
            category: category.to_string(),
            revenue,
            margin,
            revenue_share_pct: safe_div(revenue, total_revenue) * dec!(100),
            margin_share_pct: safe_div(margin, total_margin) * dec!(100),
        })
        .collect()
}

/// Per-category revenue and margin for a period.
pub fn category_breakdown(rows: &[PeriodRow]) -> Vec<CategoryTotals> {
    group_by_category(
        rows.iter()
            .map(|r| (r.product.category.as_str(), r.period_revenue, r.period_margin)),
    )
}

/// Top and bottom `limit` products by period margin. Ties keep input order.
pub fn rank_products(rows: &[PeriodRow], limit: usize) -> ProductRanking {
    let mut ascending: Vec<&PeriodRow> = rows.iter().collect();
    ascending.sort_by(|a, b| a.period_margin.cmp(&b.period_margin));

    let mut descending: Vec<&PeriodRow> = rows.iter().collect();
    descending.sort_by(|a, b| b.period_margin.cmp(&a.period_margin));

    ProductRanking {
        top: descending.into_iter().take(limit).cloned().collect(),
        bottom: ascending.into_iter().take(limit).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::period::{project_period, Period};
    use crate::catalog::schema::fixtures::product;
    use crate::catalog::ProductRow;

    fn menu() -> Vec<ProductRow> {
        vec![
            product("Margherita", "Pizza", dec!(8), dec!(2), [dec!(10); 4]),
            product("Tiramisu", "Dessert", dec!(5), dec!(1), [dec!(5); 4]),
            product("Diavola", "Pizza", dec!(9), dec!(3), [dec!(2); 4]),
            product("Cola", "Drinks", dec!(3), dec!(1), [dec!(20); 4]),
        ]
    }

    #[test]
    fn test_categories_sorted_by_name() {
        let rows = project_period(&menu(), Period::Q1).unwrap();
        let cats = category_breakdown(&rows);
        let names: Vec<&str> = cats.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Dessert", "Drinks", "Pizza"]);
    }

    #[test]
    fn test_category_sums_and_shares() {
        let rows = project_period(&menu(), Period::Q1).unwrap();
        let cats = category_breakdown(&rows);
        // Pizza revenue = 80 + 18 = 98, margin = 60 + 12 = 72
        let pizza = cats.iter().find(|c| c.category == "Pizza").unwrap();
        assert_eq!(pizza.revenue, dec!(98));
        assert_eq!(pizza.margin, dec!(72));
        // Total revenue = 98 + 25 + 60 = 183, total margin = 72 + 20 + 40 = 132
        assert_eq!(pizza.margin_share_pct, dec!(72) / dec!(132) * dec!(100));
        let share_sum: Decimal = cats.iter().map(|c| c.revenue_share_pct).sum();
        assert!((share_sum - dec!(100)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_zero_totals_give_zero_shares() {
        let cats = group_by_category(vec![("A", dec!(0), dec!(0)), ("B", dec!(0), dec!(0))]);
        assert!(cats
            .iter()
            .all(|c| c.revenue_share_pct.is_zero() && c.margin_share_pct.is_zero()));
    }

    #[test]
    fn test_rank_products() {
        let rows = project_period(&menu(), Period::Q1).unwrap();
        let ranking = rank_products(&rows, 2);
        let top: Vec<&str> = ranking.top.iter().map(|r| r.product.product_name.as_str()).collect();
        let bottom: Vec<&str> = ranking
            .bottom
            .iter()
            .map(|r| r.product.product_name.as_str())
            .collect();
        // Margins: Margherita 60, Tiramisu 20, Diavola 12, Cola 40
        assert_eq!(top, vec!["Margherita", "Cola"]);
        assert_eq!(bottom, vec!["Diavola", "Tiramisu"]);
    }

    #[test]
    fn test_rank_limit_larger_than_table() {
        let rows = project_period(&menu(), Period::Q1).unwrap();
        let ranking = rank_products(&rows, DEFAULT_RANKING_LIMIT);
        assert_eq!(ranking.top.len(), 4);
        assert_eq!(ranking.bottom.len(), 4);
    }
}
